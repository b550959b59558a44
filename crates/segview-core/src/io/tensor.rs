use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::Result;
use crate::mask::raw::{RawMask, TensorJson};

/// Load a raw mask saved as `{ "dims": [...], "data": [...] }`.
pub fn load_raw_mask(path: &Path) -> Result<RawMask> {
    let reader = BufReader::new(File::open(path)?);
    let tensor: TensorJson = serde_json::from_reader(reader)?;
    RawMask::try_from(tensor)
}

/// Save a raw mask in the `[1, 1, H, W]` JSON layout.
pub fn save_raw_mask(mask: &RawMask, path: &Path) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(writer, &mask.to_tensor_json())?;
    Ok(())
}
