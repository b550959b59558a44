pub mod bbox;
pub mod config;
pub mod contour;
pub mod extract;
pub mod threshold;

pub use bbox::bounding_box;
pub use config::{ExtractionConfig, ThresholdMethod};
pub use contour::largest_contour;
pub use extract::extract_geometry;
