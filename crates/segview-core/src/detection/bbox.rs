use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::geometry::BoundingBox;
use crate::mask::AlphaMask;

/// Running extents: (min_x, min_y, max_x, max_y).
type Extents = (u32, u32, u32, u32);

/// Bounding box of every foreground (alpha > 0) cell.
///
/// Returns [`BoundingBox::EMPTY`] when the mask has no foreground, which
/// callers must treat as "no detection".
pub fn bounding_box(mask: &AlphaMask) -> BoundingBox {
    let (w, h) = mask.image.dimensions();
    let extents = if (w as usize) * (h as usize) >= PARALLEL_PIXEL_THRESHOLD {
        extents_parallel(mask, w, h)
    } else {
        extents_sequential(mask, w, h)
    };

    match extents {
        Some((min_x, min_y, max_x, max_y)) => BoundingBox {
            min_x: min_x as f64,
            min_y: min_y as f64,
            width: (max_x - min_x + 1) as f64,
            height: (max_y - min_y + 1) as f64,
        },
        None => BoundingBox::EMPTY,
    }
}

fn row_extents(mask: &AlphaMask, row: u32, w: u32) -> Option<(u32, u32)> {
    let first = (0..w).find(|&col| mask.is_foreground(col, row))?;
    let last = (first..w).rev().find(|&col| mask.is_foreground(col, row))?;
    Some((first, last))
}

fn merge(acc: Option<Extents>, next: Option<Extents>) -> Option<Extents> {
    match (acc, next) {
        (Some(a), Some(b)) => Some((a.0.min(b.0), a.1.min(b.1), a.2.max(b.2), a.3.max(b.3))),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Sequential single pass over every row.
fn extents_sequential(mask: &AlphaMask, w: u32, h: u32) -> Option<Extents> {
    (0..h)
        .filter_map(|row| row_extents(mask, row, w).map(|(lo, hi)| (lo, row, hi, row)))
        .fold(None, |acc, e| merge(acc, Some(e)))
}

/// Row-parallel pass using Rayon.
fn extents_parallel(mask: &AlphaMask, w: u32, h: u32) -> Option<Extents> {
    (0..h)
        .into_par_iter()
        .map(|row| row_extents(mask, row, w).map(|(lo, hi)| (lo, row, hi, row)))
        .reduce(|| None, merge)
}
