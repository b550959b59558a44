use serde::{Deserialize, Serialize};

/// A 2-D point. Units depend on the space it lives in (screen, element,
/// viewport, content or image pixels).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of an image, a widget or a tile pyramid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// On-screen rectangle of a widget (its bounding client rect).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ElementRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Convert a client (page) position into element-local pixels.
    pub fn to_local(&self, client: Point) -> Point {
        Point::new(client.x - self.left, client.y - self.top)
    }
}

/// Axis-aligned box around the foreground pixels of a mask.
///
/// Extents are inclusive of the last foreground pixel, so a single
/// foreground pixel yields a 1x1 box. The all-zero box means "no detection".
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub const EMPTY: BoundingBox = BoundingBox {
        min_x: 0.0,
        min_y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn max_x(&self) -> f64 {
        self.min_x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.min_y + self.height
    }

    /// Scale every coordinate independently along each axis.
    pub fn scaled(&self, sx: f64, sy: f64) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x * sx,
            min_y: self.min_y * sy,
            width: self.width * sx,
            height: self.height * sy,
        }
    }
}

/// Outer boundary of the largest foreground region, as ordered vertices.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContourPolygon {
    pub points: Vec<Point>,
}

impl ContourPolygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Enclosed area by the shoelace formula.
    pub fn area(&self) -> f64 {
        polygon_area(&self.points)
    }

    /// Move vertices from one pixel grid to another scaled by `sx`, `sy`.
    ///
    /// Vertices are pixel indices, so each one lands on the target pixel
    /// under the centre of its source pixel and stays integral.
    pub fn resampled(&self, sx: f64, sy: f64) -> ContourPolygon {
        ContourPolygon {
            points: self
                .points
                .iter()
                .map(|p| Point::new(((p.x + 0.5) * sx).floor(), ((p.y + 0.5) * sy).floor()))
                .collect(),
        }
    }
}

/// Absolute shoelace area of a closed polygon.
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        twice_area += a.x * b.y - b.x * a.y;
    }
    twice_area.abs() / 2.0
}

/// Geometry extracted from one inference result.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub bbox: BoundingBox,
    pub contour: ContourPolygon,
}

impl Geometry {
    /// True when the mask had at least one foreground pixel.
    pub fn is_detection(&self) -> bool {
        !self.bbox.is_empty()
    }

    /// Rescale geometry measured on a mask raster into image-pixel space.
    ///
    /// A no-op when the mask was produced at the natural image resolution.
    pub fn to_image_space(&self, mask_size: Size, natural_size: Size) -> Geometry {
        if mask_size.is_empty() || mask_size == natural_size {
            return self.clone();
        }
        let sx = natural_size.width / mask_size.width;
        let sy = natural_size.height / mask_size.height;
        Geometry {
            bbox: self.bbox.scaled(sx, sy),
            contour: self.contour.resampled(sx, sy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shoelace_area_of_rectangle() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 3.0),
            Point::new(0.0, 3.0),
        ];
        assert_eq!(polygon_area(&pts), 12.0);
    }

    #[test]
    fn degenerate_polygon_has_no_area() {
        let pts = vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)];
        assert_eq!(polygon_area(&pts), 0.0);
    }

    #[test]
    fn same_resolution_geometry_is_unchanged() {
        let g = Geometry {
            bbox: BoundingBox {
                min_x: 3.0,
                min_y: 4.0,
                width: 5.0,
                height: 6.0,
            },
            contour: ContourPolygon::default(),
        };
        let size = Size::new(100.0, 50.0);
        assert_eq!(g.to_image_space(size, size), g);
    }

    #[test]
    fn upscaled_contour_lands_on_pixel_centres() {
        let g = Geometry {
            bbox: BoundingBox {
                min_x: 4.0,
                min_y: 2.0,
                width: 8.0,
                height: 6.0,
            },
            contour: ContourPolygon {
                points: vec![
                    Point::new(4.0, 2.0),
                    Point::new(11.0, 2.0),
                    Point::new(11.0, 7.0),
                    Point::new(4.0, 7.0),
                ],
            },
        };
        let out = g.to_image_space(Size::new(32.0, 24.0), Size::new(64.0, 48.0));
        assert_eq!(out.contour.points[0], Point::new(9.0, 5.0));
        assert_eq!(out.contour.points[2], Point::new(23.0, 15.0));
        // Last covered pixel is one short of the exclusive box edge.
        assert_eq!(out.bbox.max_x(), 24.0);
        assert_eq!(out.bbox.max_y(), 16.0);
    }

    #[test]
    fn downscaled_contour_stays_integral() {
        let contour = ContourPolygon {
            points: vec![Point::new(0.0, 0.0), Point::new(5.0, 3.0)],
        };
        let out = contour.resampled(0.5, 0.5);
        assert_eq!(out.points, vec![Point::new(0.0, 0.0), Point::new(2.0, 1.0)]);
    }
}
