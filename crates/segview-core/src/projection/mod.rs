pub mod overlay;
pub mod project;
pub mod shapes;

pub use overlay::{AnnotationLog, AnnotationSink, OverlayEvent, ProjectedOverlay};
pub use project::{project_geometry, OverlayTarget};
pub use shapes::{Annotation, CoordinateSpace, OverlayShape, ShapeMode};
