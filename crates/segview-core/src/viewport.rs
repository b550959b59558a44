//! Deep-zoom viewer transform.
//!
//! The viewer works in normalized "viewport units": the tiled image item is
//! placed at `item` (by default `x = 0`, `width = 1`) and the visible region of
//! the world is `bounds`. Element pixels, viewport units and content pixels are
//! related by two scale/offset pairs; the tile pyramid's content size may in
//! turn differ from the natural size of the original image.

use serde::{Deserialize, Serialize};

use crate::geometry::{ElementRect, Point, Size};

/// Rectangle in viewport units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Snapshot of the viewer's zoom/pan state and of the loaded tiled image.
///
/// Owned by the viewer; the pipeline only reads snapshots of it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportTransform {
    /// On-screen rectangle of the viewer element.
    pub element: ElementRect,
    /// Visible region of the world, in viewport units.
    pub bounds: ViewRect,
    /// Placement of the tiled image item, in viewport units.
    pub item: ViewRect,
    /// Pixel size the tile pyramid declares for its source image.
    pub content_size: Size,
    /// Natural size of the original full-resolution image.
    pub natural_size: Size,
}

impl ViewportTransform {
    /// Home view: the item spans one unit horizontally and the element shows
    /// exactly its full width.
    pub fn home(element: ElementRect, content_size: Size, natural_size: Size) -> Self {
        Self::with_zoom(element, content_size, natural_size, 1.0, Point::default())
    }

    /// View at `zoom` (1.0 = whole item width visible) with the top-left of
    /// the visible region at `origin` (viewport units). `zoom` must be finite
    /// and positive; callers validate user input.
    pub fn with_zoom(
        element: ElementRect,
        content_size: Size,
        natural_size: Size,
        zoom: f64,
        origin: Point,
    ) -> Self {
        let aspect = if element.width > 0.0 {
            element.height / element.width
        } else {
            1.0
        };
        let width = 1.0 / zoom;
        let item_height = if content_size.width > 0.0 {
            content_size.height / content_size.width
        } else {
            1.0
        };
        Self {
            element,
            bounds: ViewRect::new(origin.x, origin.y, width, width * aspect),
            item: ViewRect::new(0.0, 0.0, 1.0, item_height),
            content_size,
            natural_size,
        }
    }

    /// Current zoom relative to an item of unit width.
    pub fn zoom(&self) -> f64 {
        1.0 / self.bounds.width
    }

    /// Element pixels per viewport unit.
    fn pixels_per_unit(&self) -> f64 {
        self.element.width / self.bounds.width
    }

    /// Content pixels per viewport unit.
    fn content_per_unit(&self) -> f64 {
        self.content_size.width / self.item.width
    }

    pub fn element_to_viewport(&self, p: Point) -> Point {
        let scale = self.pixels_per_unit();
        Point::new(p.x / scale + self.bounds.x, p.y / scale + self.bounds.y)
    }

    pub fn viewport_to_element(&self, v: Point) -> Point {
        let scale = self.pixels_per_unit();
        Point::new((v.x - self.bounds.x) * scale, (v.y - self.bounds.y) * scale)
    }

    pub fn viewport_to_content(&self, v: Point) -> Point {
        let scale = self.content_per_unit();
        Point::new((v.x - self.item.x) * scale, (v.y - self.item.y) * scale)
    }

    pub fn content_to_viewport(&self, c: Point) -> Point {
        let scale = self.content_per_unit();
        Point::new(c.x / scale + self.item.x, c.y / scale + self.item.y)
    }

    /// Ratio `(content / natural)` per axis. Recomputed on every call because
    /// it depends on which image is currently loaded.
    pub fn content_ratio(&self) -> (f64, f64) {
        (
            self.content_size.width / self.natural_size.width,
            self.content_size.height / self.natural_size.height,
        )
    }

    pub fn content_to_image(&self, c: Point) -> Point {
        let (rx, ry) = self.content_ratio();
        Point::new(c.x / rx, c.y / ry)
    }

    pub fn image_to_content(&self, p: Point) -> Point {
        let (rx, ry) = self.content_ratio();
        Point::new(p.x * rx, p.y * ry)
    }

    /// Full chain: client position → image pixels.
    pub fn client_to_image(&self, client: Point) -> Point {
        let local = self.element.to_local(client);
        let viewport = self.element_to_viewport(local);
        let content = self.viewport_to_content(viewport);
        self.content_to_image(content)
    }

    /// Full chain: image pixels → element-local pixels.
    pub fn image_to_element(&self, p: Point) -> Point {
        let content = self.image_to_content(p);
        let viewport = self.content_to_viewport(content);
        self.viewport_to_element(viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_view_maps_element_corner_to_content_width() {
        let t = ViewportTransform::home(
            ElementRect::new(0.0, 0.0, 500.0, 200.0),
            Size::new(1000.0, 400.0),
            Size::new(1000.0, 400.0),
        );
        let v = t.element_to_viewport(Point::new(500.0, 0.0));
        let c = t.viewport_to_content(v);
        assert!((c.x - 1000.0).abs() < 1e-9);
        assert!(c.y.abs() < 1e-9);
    }
}
