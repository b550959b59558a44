mod common;

use ndarray::Array2;

use segview_core::detection::{
    bounding_box, extract_geometry, largest_contour, ExtractionConfig, ThresholdMethod,
};
use segview_core::detection::threshold::otsu_threshold;
use segview_core::geometry::{BoundingBox, ContourPolygon, Point};

use common::alpha_with_rects;

fn x_range(contour: &ContourPolygon) -> (f64, f64) {
    let xs = contour.points.iter().map(|p| p.x);
    let min = xs.clone().fold(f64::INFINITY, f64::min);
    let max = xs.fold(f64::NEG_INFINITY, f64::max);
    (min, max)
}

fn y_range(contour: &ContourPolygon) -> (f64, f64) {
    let ys = contour.points.iter().map(|p| p.y);
    let min = ys.clone().fold(f64::INFINITY, f64::min);
    let max = ys.fold(f64::NEG_INFINITY, f64::max);
    (min, max)
}

// ---------------------------------------------------------------------------
// Bounding box
// ---------------------------------------------------------------------------

#[test]
fn test_bbox_single_pixel_is_one_by_one() {
    let mask = alpha_with_rects(10, 10, &[(4, 7, 1, 1)]);
    let bbox = bounding_box(&mask);
    assert_eq!(
        bbox,
        BoundingBox {
            min_x: 4.0,
            min_y: 7.0,
            width: 1.0,
            height: 1.0
        }
    );
}

#[test]
fn test_bbox_covers_every_foreground_cell() {
    let mask = alpha_with_rects(40, 30, &[(3, 5, 4, 2), (20, 1, 2, 20), (35, 28, 5, 2)]);
    let bbox = bounding_box(&mask);

    assert_eq!(bbox.min_x, 3.0);
    assert_eq!(bbox.min_y, 1.0);
    assert_eq!(bbox.max_x(), 40.0);
    assert_eq!(bbox.max_y(), 30.0);

    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if mask.is_foreground(x, y) {
                let (fx, fy) = (x as f64, y as f64);
                assert!(fx >= bbox.min_x && fx < bbox.max_x());
                assert!(fy >= bbox.min_y && fy < bbox.max_y());
            }
        }
    }
}

#[test]
fn test_bbox_parallel_path_matches_sequential() {
    let rects = [(17, 250, 3, 3), (200, 12, 40, 9)];
    let small = bounding_box(&alpha_with_rects(255, 255, &rects));
    let large = bounding_box(&alpha_with_rects(300, 300, &rects));
    assert_eq!(small, large);
    assert_eq!(
        large,
        BoundingBox {
            min_x: 17.0,
            min_y: 12.0,
            width: 223.0,
            height: 241.0
        }
    );
}

#[test]
fn test_bbox_empty_mask() {
    let mask = alpha_with_rects(16, 16, &[]);
    let bbox = bounding_box(&mask);
    assert_eq!(bbox, BoundingBox::EMPTY);
    assert!(bbox.is_empty());
}

// ---------------------------------------------------------------------------
// Contour
// ---------------------------------------------------------------------------

#[test]
fn test_rectangle_contour_is_simplified_to_corners() {
    let mask = alpha_with_rects(30, 30, &[(5, 6, 12, 8)]);
    let contour = largest_contour(&mask, &ExtractionConfig::default());

    assert!(contour.len() >= 4 && contour.len() <= 5, "{:?}", contour);
    for corner in [
        Point::new(5.0, 6.0),
        Point::new(16.0, 6.0),
        Point::new(16.0, 13.0),
        Point::new(5.0, 13.0),
    ] {
        assert!(contour.points.contains(&corner), "missing {:?}", corner);
    }
}

#[test]
fn test_largest_region_wins() {
    let small_first = alpha_with_rects(40, 20, &[(2, 2, 5, 10), (20, 2, 8, 10)]);
    let contour = largest_contour(&small_first, &ExtractionConfig::default());
    assert_eq!(x_range(&contour), (20.0, 27.0));

    let large_first = alpha_with_rects(40, 20, &[(2, 2, 8, 10), (20, 2, 5, 10)]);
    let contour = largest_contour(&large_first, &ExtractionConfig::default());
    assert_eq!(x_range(&contour), (2.0, 9.0));
}

#[test]
fn test_equal_areas_pick_first_in_raster_order() {
    let mask = alpha_with_rects(20, 40, &[(3, 25, 6, 6), (10, 2, 6, 6)]);
    let contour = largest_contour(&mask, &ExtractionConfig::default());
    assert_eq!(y_range(&contour), (2.0, 7.0));
}

#[test]
fn test_no_foreground_gives_empty_contour() {
    let mask = alpha_with_rects(12, 12, &[]);
    let contour = largest_contour(&mask, &ExtractionConfig::default());
    assert!(contour.is_empty());
    assert_eq!(contour.area(), 0.0);
}

#[test]
fn test_threshold_methods_agree_on_binary_mask() {
    let mask = alpha_with_rects(30, 30, &[(4, 4, 10, 10)]);
    for method in [ThresholdMethod::Otsu, ThresholdMethod::Fixed(0.1)] {
        let config = ExtractionConfig {
            threshold_method: method.clone(),
            ..ExtractionConfig::default()
        };
        let contour = largest_contour(&mask, &config);
        assert_eq!(x_range(&contour), (4.0, 13.0), "{method}");
        assert_eq!(y_range(&contour), (4.0, 13.0), "{method}");
    }
}

#[test]
fn test_otsu_splits_bimodal_intensity_between_modes() {
    let intensity = Array2::from_shape_fn((20, 20), |(_, x)| if x < 12 { 0.2 } else { 0.8 });
    let t = otsu_threshold(&intensity);
    assert!(t > 0.2 && t < 0.8, "threshold {t}");
    let foreground = intensity.iter().filter(|&&v| v > t).count();
    assert_eq!(foreground, 20 * 8);
}

#[test]
fn test_otsu_on_flat_intensity_keeps_nonzero_values_foreground() {
    let intensity = Array2::from_elem((8, 8), 0.5_f32);
    let t = otsu_threshold(&intensity);
    assert!(t < 0.5, "threshold {t}");
}

#[test]
fn test_fixed_threshold_above_overlay_alpha_removes_everything() {
    let mask = alpha_with_rects(30, 30, &[(4, 4, 10, 10)]);
    let config = ExtractionConfig {
        threshold_method: ThresholdMethod::Fixed(0.9),
        ..ExtractionConfig::default()
    };
    assert!(largest_contour(&mask, &config).is_empty());
}

// ---------------------------------------------------------------------------
// Combined extraction
// ---------------------------------------------------------------------------

#[test]
fn test_extract_geometry_with_and_without_contour() {
    let mask = alpha_with_rects(50, 50, &[(10, 20, 15, 5)]);

    let full = extract_geometry(&mask, &ExtractionConfig::default());
    assert!(full.is_detection());
    assert_eq!(full.bbox.width, 15.0);
    assert_eq!(full.bbox.height, 5.0);
    assert!(!full.contour.is_empty());

    let config = ExtractionConfig {
        contour: false,
        ..ExtractionConfig::default()
    };
    let box_only = extract_geometry(&mask, &config);
    assert_eq!(box_only.bbox, full.bbox);
    assert!(box_only.contour.is_empty());
}

#[test]
fn test_extract_geometry_empty_mask_is_no_detection() {
    let mask = alpha_with_rects(50, 50, &[]);
    let geometry = extract_geometry(&mask, &ExtractionConfig::default());
    assert!(!geometry.is_detection());
    assert!(geometry.contour.is_empty());
}
