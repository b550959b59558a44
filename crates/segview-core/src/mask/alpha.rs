use std::path::Path;

use image::{ImageFormat, RgbaImage};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_OVERLAY_COLOR, DEFAULT_OVERLAY_OPACITY};
use crate::error::Result;
use crate::geometry::Size;

/// Colour and opacity used for foreground mask cells.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlayStyle {
    pub color: [u8; 3],
    /// Opacity in [0.0, 1.0].
    pub opacity: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_OVERLAY_COLOR,
            opacity: DEFAULT_OVERLAY_OPACITY,
        }
    }
}

impl OverlayStyle {
    /// Foreground RGBA value. Never fully transparent, so foreground cells
    /// stay distinguishable even at zero opacity.
    pub fn rgba(&self) -> [u8; 4] {
        let alpha = (self.opacity.clamp(0.0, 1.0) * 255.0).round().max(1.0) as u8;
        [self.color[0], self.color[1], self.color[2], alpha]
    }
}

/// Displayable mask raster. A cell with non-zero alpha is foreground.
#[derive(Clone, Debug, PartialEq)]
pub struct AlphaMask {
    pub image: RgbaImage,
}

impl AlphaMask {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width() as f64, self.height() as f64)
    }

    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        self.image.get_pixel(x, y).0[3] > 0
    }

    pub fn foreground_count(&self) -> usize {
        self.image.pixels().filter(|p| p.0[3] > 0).count()
    }

    /// True when no cell is foreground.
    pub fn is_empty(&self) -> bool {
        self.image.pixels().all(|p| p.0[3] == 0)
    }

    /// Single-channel intensity in [0.0, 1.0] taken from the alpha channel.
    pub fn intensity(&self) -> Array2<f32> {
        let (w, h) = self.image.dimensions();
        Array2::from_shape_fn((h as usize, w as usize), |(row, col)| {
            self.image.get_pixel(col as u32, row as u32).0[3] as f32 / 255.0
        })
    }

    /// Save as an RGBA PNG.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}
