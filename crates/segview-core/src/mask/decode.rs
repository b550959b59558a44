use image::RgbaImage;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::{Result, SegviewError};

use super::alpha::{AlphaMask, OverlayStyle};
use super::raw::RawMask;

/// Threshold raw scores into a displayable mask.
///
/// A score `> 0` becomes a foreground cell in `style`; anything else
/// (including NaN) is fully transparent. The raster keeps the predictor's
/// native resolution. `width`/`height` are the dimensions the predictor
/// declared; disagreement with the data is a decode error.
pub fn decode(
    raw: &RawMask,
    width: usize,
    height: usize,
    style: &OverlayStyle,
) -> Result<AlphaMask> {
    if raw.width() != width || raw.height() != height {
        return Err(SegviewError::DimensionMismatch {
            width,
            height,
            len: raw.scores.len(),
        });
    }

    let fg = style.rgba();
    let stride = width * 4;
    let mut buf = vec![0u8; stride * height];

    let fill_row = |row: usize, out: &mut [u8]| {
        for col in 0..width {
            if raw.scores[[row, col]] > 0.0 {
                out[col * 4..col * 4 + 4].copy_from_slice(&fg);
            }
        }
    };

    if width * height >= PARALLEL_PIXEL_THRESHOLD {
        buf.par_chunks_mut(stride)
            .enumerate()
            .for_each(|(row, out)| fill_row(row, out));
    } else if stride > 0 {
        buf.chunks_mut(stride)
            .enumerate()
            .for_each(|(row, out)| fill_row(row, out));
    }

    let image = RgbaImage::from_raw(width as u32, height as u32, buf).ok_or(
        SegviewError::InvalidDimensions {
            width: width as u32,
            height: height as u32,
        },
    )?;
    Ok(AlphaMask::new(image))
}

impl RawMask {
    /// Decode at the mask's own dimensions.
    pub fn to_alpha(&self, style: &OverlayStyle) -> Result<AlphaMask> {
        decode(self, self.width(), self.height(), style)
    }
}
