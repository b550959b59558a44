use serde::{Deserialize, Serialize};

use crate::coords::DisplayedImage;
use crate::geometry::{BoundingBox, ContourPolygon, Geometry, Point};
use crate::viewport::ViewportTransform;

use super::shapes::{Annotation, CoordinateSpace, OverlayShape, ShapeMode};

/// Where and how the overlay is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum OverlayTarget {
    /// Absolutely positioned shapes over a direct image widget.
    Css(DisplayedImage),
    /// Viewer annotation layer that takes content pixels.
    ViewerNative(ViewportTransform),
    /// Shapes drawn in the viewer element's own pixels.
    ViewerElement(ViewportTransform),
}

impl OverlayTarget {
    fn space(&self) -> CoordinateSpace {
        match self {
            Self::ViewerNative(_) => CoordinateSpace::ContentPixels,
            Self::Css(_) | Self::ViewerElement(_) => CoordinateSpace::Element,
        }
    }

    /// Map one image-pixel point into the target's space.
    pub fn map_point(&self, p: Point) -> Point {
        match self {
            Self::Css(widget) => {
                let (sx, sy) = widget.scale();
                Point::new(p.x / sx, p.y / sy)
            }
            Self::ViewerNative(t) => t.image_to_content(p),
            Self::ViewerElement(t) => t.image_to_element(p),
        }
    }
}

/// Project image-space geometry into overlay annotations.
///
/// Yields nothing for a geometry without detection.
pub fn project_geometry(
    geometry: &Geometry,
    target: &OverlayTarget,
    mode: ShapeMode,
) -> Vec<Annotation> {
    if !geometry.is_detection() {
        return Vec::new();
    }

    let space = target.space();
    let mut out = Vec::with_capacity(2);
    if mode.draws_box() {
        out.push(Annotation {
            shape: project_box(&geometry.bbox, target),
            space,
        });
    }
    if mode.draws_contour() && !geometry.contour.is_empty() {
        out.push(Annotation {
            shape: project_contour(&geometry.contour, target),
            space,
        });
    }
    out
}

fn project_box(bbox: &BoundingBox, target: &OverlayTarget) -> OverlayShape {
    let top_left = target.map_point(Point::new(bbox.min_x, bbox.min_y));
    let bottom_right = target.map_point(Point::new(bbox.max_x(), bbox.max_y()));
    OverlayShape::Rect {
        x: top_left.x,
        y: top_left.y,
        width: bottom_right.x - top_left.x,
        height: bottom_right.y - top_left.y,
    }
}

fn project_contour(contour: &ContourPolygon, target: &OverlayTarget) -> OverlayShape {
    OverlayShape::Polygon {
        points: contour.points.iter().map(|&p| target.map_point(p)).collect(),
    }
}
