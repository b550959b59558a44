use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType};
use imageproc::geometry::approximate_polygon_dp;
use imageproc::point::Point as PixelPoint;
use ndarray::Array2;
use tracing::debug;

use crate::geometry::{polygon_area, ContourPolygon, Point};
use crate::mask::AlphaMask;

use super::config::ExtractionConfig;
use super::threshold::threshold_for;

/// Outer contour of the largest foreground region, simplified.
///
/// Pipeline: alpha intensity -> global threshold -> outer border tracing ->
/// Douglas-Peucker simplification -> pick the largest enclosed area.
///
/// Contours are visited in raster order of their first border pixel (top to
/// bottom, then left to right); on equal areas the first one visited wins.
/// Returns an empty polygon when nothing is traced.
pub fn largest_contour(mask: &AlphaMask, config: &ExtractionConfig) -> ContourPolygon {
    let intensity = mask.intensity();
    if intensity.is_empty() {
        return ContourPolygon::default();
    }

    let threshold = threshold_for(&intensity, &config.threshold_method);
    let binary = binarize(&intensity, threshold);

    let mut best: Option<(f64, Vec<Point>)> = None;
    let mut outer_count = 0usize;

    for contour in find_contours::<i32>(&binary) {
        if !matches!(contour.border_type, BorderType::Outer) {
            continue;
        }
        outer_count += 1;

        let simplified = simplify(&contour.points, config.contour_tolerance);
        let area = polygon_area(&simplified);
        let is_larger = match &best {
            Some((best_area, _)) => area > *best_area,
            None => true,
        };
        if is_larger {
            best = Some((area, simplified));
        }
    }

    debug!(threshold, outer_count, "Contours traced");

    best.map(|(_, points)| ContourPolygon::new(points))
        .unwrap_or_default()
}

/// Binary image with foreground = 255 where `intensity > threshold`.
fn binarize(intensity: &Array2<f32>, threshold: f32) -> GrayImage {
    let (h, w) = intensity.dim();
    GrayImage::from_fn(w as u32, h as u32, |x, y| {
        if intensity[[y as usize, x as usize]] > threshold {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

fn simplify(points: &[PixelPoint<i32>], tolerance: f64) -> Vec<Point> {
    let reduced = if points.len() > 2 && tolerance > 0.0 {
        approximate_polygon_dp(points, tolerance, true)
    } else {
        points.to_vec()
    };
    reduced
        .iter()
        .map(|p| Point::new(p.x as f64, p.y as f64))
        .collect()
}
