use std::path::Path;

use crate::error::Result;
use crate::mask::AlphaMask;

/// Load a previously exported mask image. Any pixel with alpha > 0 is
/// foreground.
pub fn load_alpha_mask(path: &Path) -> Result<AlphaMask> {
    let img = image::open(path)?;
    Ok(AlphaMask::new(img.to_rgba8()))
}

/// Save a mask, always as PNG so the alpha channel survives.
pub fn save_alpha_mask(mask: &AlphaMask, path: &Path) -> Result<()> {
    mask.save_png(path)
}
