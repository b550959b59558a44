//! Screen → image-pixel mapping for click events.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::{ElementRect, Point, Size};
use crate::viewport::ViewportTransform;

/// Pointer event in client (page) coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerEvent {
    pub fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }

    pub fn client(&self) -> Point {
        Point::new(self.client_x, self.client_y)
    }
}

/// An `<img>`-like widget showing the whole image at some CSS size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayedImage {
    /// Bounding rect of the widget on screen.
    pub rect: ElementRect,
    /// Natural size of the image shown in it.
    pub natural: Size,
}

impl DisplayedImage {
    pub fn new(rect: ElementRect, natural: Size) -> Self {
        Self { rect, natural }
    }

    /// Natural pixels per displayed pixel along each axis.
    pub fn scale(&self) -> (f64, f64) {
        (
            self.natural.width / self.rect.width,
            self.natural.height / self.rect.height,
        )
    }
}

/// The widget that received a click.
#[derive(Clone, Copy, Debug)]
pub enum ClickTarget<'a> {
    /// Direct image widget.
    Image(&'a DisplayedImage),
    /// Deep-zoom viewer; `None` while the viewer has not opened an image yet.
    Viewer(Option<&'a ViewportTransform>),
}

/// Map a pointer event to image-pixel coordinates.
///
/// Returns `None` when the click landed on a viewer that is not ready; such
/// clicks are dropped. Results are not clamped to the image bounds.
pub fn map_click(event: &PointerEvent, target: ClickTarget<'_>) -> Option<Point> {
    match target {
        ClickTarget::Image(widget) => Some(map_image_click(event, widget)),
        ClickTarget::Viewer(Some(transform)) => Some(transform.client_to_image(event.client())),
        ClickTarget::Viewer(None) => {
            debug!("Viewer not ready, dropping click");
            None
        }
    }
}

fn map_image_click(event: &PointerEvent, widget: &DisplayedImage) -> Point {
    let local = widget.rect.to_local(event.client());
    let (sx, sy) = widget.scale();
    Point::new(local.x * sx, local.y * sy)
}
