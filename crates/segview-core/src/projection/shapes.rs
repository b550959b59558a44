use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Coordinate space an annotation is expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinateSpace {
    /// Pixels relative to the top-left corner of the widget.
    Element,
    /// Content pixels of the tiled image; the overlay library projects them.
    ContentPixels,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum OverlayShape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Polygon {
        points: Vec<Point>,
    },
}

/// A shape handed to the annotation overlay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub shape: OverlayShape,
    pub space: CoordinateSpace,
}

/// Which extracted shapes are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeMode {
    BoundingBox,
    Contour,
    #[default]
    Both,
}

impl ShapeMode {
    pub fn draws_box(&self) -> bool {
        matches!(self, Self::BoundingBox | Self::Both)
    }

    pub fn draws_contour(&self) -> bool {
        matches!(self, Self::Contour | Self::Both)
    }
}

impl fmt::Display for ShapeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundingBox => write!(f, "Bounding Box"),
            Self::Contour => write!(f, "Contour"),
            Self::Both => write!(f, "Bounding Box + Contour"),
        }
    }
}
