use approx::assert_relative_eq;

use segview_core::coords::{map_click, ClickTarget, DisplayedImage, PointerEvent};
use segview_core::geometry::{ElementRect, Point, Size};
use segview_core::viewport::ViewportTransform;

// ---------------------------------------------------------------------------
// Direct image widget
// ---------------------------------------------------------------------------

#[test]
fn test_image_click_scenario_scale_four() {
    let widget = DisplayedImage::new(
        ElementRect::new(0.0, 0.0, 500.0, 250.0),
        Size::new(2000.0, 1000.0),
    );
    let p = map_click(&PointerEvent::new(100.0, 50.0), ClickTarget::Image(&widget)).unwrap();
    assert_relative_eq!(p.x, 400.0);
    assert_relative_eq!(p.y, 200.0);
}

#[test]
fn test_image_click_subtracts_element_offset() {
    let widget = DisplayedImage::new(
        ElementRect::new(30.0, 20.0, 500.0, 250.0),
        Size::new(2000.0, 1000.0),
    );
    let p = map_click(&PointerEvent::new(130.0, 70.0), ClickTarget::Image(&widget)).unwrap();
    assert_relative_eq!(p.x, 400.0);
    assert_relative_eq!(p.y, 200.0);
}

#[test]
fn test_image_click_scales_linearly_for_any_scale() {
    for &s in &[0.25, 0.5, 1.0, 1.7, 3.0, 12.5] {
        let widget = DisplayedImage::new(
            ElementRect::new(0.0, 0.0, 400.0, 300.0),
            Size::new(400.0 * s, 300.0 * s),
        );
        for &(dx, dy) in &[(0.0, 0.0), (12.0, 7.5), (399.0, 299.0)] {
            let p = map_click(&PointerEvent::new(dx, dy), ClickTarget::Image(&widget)).unwrap();
            assert_relative_eq!(p.x, dx * s, epsilon = 1e-9);
            assert_relative_eq!(p.y, dy * s, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_image_click_outside_is_not_clamped() {
    let widget = DisplayedImage::new(
        ElementRect::new(100.0, 100.0, 500.0, 250.0),
        Size::new(2000.0, 1000.0),
    );
    let p = map_click(&PointerEvent::new(90.0, 400.0), ClickTarget::Image(&widget)).unwrap();
    assert_relative_eq!(p.x, -40.0);
    assert_relative_eq!(p.y, 1200.0);
}

// ---------------------------------------------------------------------------
// Deep-zoom viewer
// ---------------------------------------------------------------------------

#[test]
fn test_viewer_not_ready_drops_click() {
    let p = map_click(&PointerEvent::new(10.0, 10.0), ClickTarget::Viewer(None));
    assert!(p.is_none());
}

#[test]
fn test_viewer_home_view_matching_pyramid() {
    let t = ViewportTransform::home(
        ElementRect::new(10.0, 20.0, 500.0, 250.0),
        Size::new(2000.0, 1000.0),
        Size::new(2000.0, 1000.0),
    );
    let p = map_click(&PointerEvent::new(110.0, 70.0), ClickTarget::Viewer(Some(&t))).unwrap();
    assert_relative_eq!(p.x, 400.0, epsilon = 1e-9);
    assert_relative_eq!(p.y, 200.0, epsilon = 1e-9);
}

#[test]
fn test_viewer_corrects_pyramid_content_size() {
    // Pyramid generated from a scan twice the size of the original image.
    let t = ViewportTransform::home(
        ElementRect::new(10.0, 20.0, 500.0, 250.0),
        Size::new(4000.0, 2000.0),
        Size::new(2000.0, 1000.0),
    );
    let p = map_click(&PointerEvent::new(110.0, 70.0), ClickTarget::Viewer(Some(&t))).unwrap();
    assert_relative_eq!(p.x, 400.0, epsilon = 1e-9);
    assert_relative_eq!(p.y, 200.0, epsilon = 1e-9);
}

#[test]
fn test_viewer_ratio_follows_loaded_image() {
    let element = ElementRect::new(0.0, 0.0, 500.0, 250.0);
    let event = PointerEvent::new(250.0, 0.0);

    let first = ViewportTransform::home(element, Size::new(1000.0, 500.0), Size::new(1000.0, 500.0));
    let second = ViewportTransform::home(element, Size::new(1000.0, 500.0), Size::new(500.0, 250.0));

    let a = map_click(&event, ClickTarget::Viewer(Some(&first))).unwrap();
    let b = map_click(&event, ClickTarget::Viewer(Some(&second))).unwrap();
    assert_relative_eq!(a.x, 500.0, epsilon = 1e-9);
    assert_relative_eq!(b.x, 250.0, epsilon = 1e-9);
}

#[test]
fn test_viewer_zoomed_and_panned() {
    let t = ViewportTransform::with_zoom(
        ElementRect::new(0.0, 0.0, 500.0, 250.0),
        Size::new(2000.0, 1000.0),
        Size::new(2000.0, 1000.0),
        2.0,
        Point::new(0.5, 0.25),
    );
    assert_relative_eq!(t.zoom(), 2.0);
    let p = map_click(&PointerEvent::new(100.0, 50.0), ClickTarget::Viewer(Some(&t))).unwrap();
    // 0.5 + 100 / 1000 = 0.6 viewport units -> 1200 content px.
    assert_relative_eq!(p.x, 1200.0, epsilon = 1e-9);
    assert_relative_eq!(p.y, 600.0, epsilon = 1e-9);
}

#[test]
fn test_viewer_image_to_element_inverts_click_mapping() {
    let t = ViewportTransform::with_zoom(
        ElementRect::new(0.0, 0.0, 640.0, 480.0),
        Size::new(3000.0, 1500.0),
        Size::new(1200.0, 600.0),
        3.5,
        Point::new(0.1, 0.05),
    );
    let local = Point::new(123.0, 321.0);
    let image = t.client_to_image(local);
    let back = t.image_to_element(image);
    assert_relative_eq!(back.x, local.x, epsilon = 1e-9);
    assert_relative_eq!(back.y, local.y, epsilon = 1e-9);
}
