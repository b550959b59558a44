use serde::{Deserialize, Serialize};

use crate::consts::MODEL_LONG_SIDE;
use crate::error::{Result, SegviewError};
use crate::geometry::Size;

/// Natural image size and the resize factor used before embedding.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelScale {
    pub width: f64,
    pub height: f64,
    /// Factor applied so that the longest side becomes the model input size.
    pub sam_scale: f64,
}

impl ModelScale {
    /// Compute the scale for an image of the given natural size.
    pub fn for_image(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SegviewError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width: width as f64,
            height: height as f64,
            sam_scale: MODEL_LONG_SIDE / width.max(height) as f64,
        })
    }

    pub fn natural_size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
