use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_CONTOUR_TOLERANCE;

/// Global threshold used to binarize mask intensity before contour tracing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum ThresholdMethod {
    /// Otsu's method: maximizes between-class variance of the histogram.
    #[default]
    Otsu,
    /// User-specified fixed threshold in [0.0, 1.0].
    Fixed(f32),
}

impl fmt::Display for ThresholdMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Otsu => write!(f, "Otsu"),
            Self::Fixed(v) => write!(f, "Fixed ({v})"),
        }
    }
}

/// Settings for turning an alpha mask into overlay geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Trace the contour polygon in addition to the bounding box.
    #[serde(default = "default_contour")]
    pub contour: bool,
    #[serde(default)]
    pub threshold_method: ThresholdMethod,
    /// Douglas-Peucker tolerance in mask pixels.
    #[serde(default = "default_contour_tolerance")]
    pub contour_tolerance: f64,
}

fn default_contour() -> bool {
    true
}
fn default_contour_tolerance() -> f64 {
    DEFAULT_CONTOUR_TOLERANCE
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            contour: true,
            threshold_method: ThresholdMethod::default(),
            contour_tolerance: DEFAULT_CONTOUR_TOLERANCE,
        }
    }
}
