use tracing::debug;

use crate::geometry::{ContourPolygon, Geometry};
use crate::mask::AlphaMask;

use super::bbox::bounding_box;
use super::config::ExtractionConfig;
use super::contour::largest_contour;

/// Bounding box and (optionally) contour of a mask, in mask pixels.
///
/// The contour pass is skipped for masks without foreground.
pub fn extract_geometry(mask: &AlphaMask, config: &ExtractionConfig) -> Geometry {
    let bbox = bounding_box(mask);
    let contour = if config.contour && !bbox.is_empty() {
        largest_contour(mask, config)
    } else {
        ContourPolygon::default()
    };

    debug!(
        min_x = bbox.min_x,
        min_y = bbox.min_y,
        width = bbox.width,
        height = bbox.height,
        vertices = contour.len(),
        "Geometry extracted"
    );

    Geometry { bbox, contour }
}
