pub mod config;
pub mod extract;
pub mod map;
pub mod project;
pub mod replay;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use segview_core::coords::DisplayedImage;
use segview_core::geometry::{ElementRect, Point, Size};
use segview_core::projection::OverlayTarget;
use segview_core::session::SessionConfig;
use segview_core::viewport::ViewportTransform;

/// Where the image is shown: a plain image widget or a deep-zoom viewer.
#[derive(Args, Clone)]
pub struct SurfaceArgs {
    /// Natural image size (WxH)
    #[arg(long, value_parser = parse_size)]
    pub natural: Size,

    /// Displayed size of the image widget (WxH), defaults to the natural size
    #[arg(long, value_parser = parse_size, conflicts_with = "viewer")]
    pub display: Option<Size>,

    /// Viewer element size (WxH); selects the deep-zoom viewer
    #[arg(long, value_parser = parse_size)]
    pub viewer: Option<Size>,

    /// Tile pyramid content size (WxH), defaults to the natural size
    #[arg(long, value_parser = parse_size, requires = "viewer")]
    pub content: Option<Size>,

    /// Viewer zoom (1.0 = whole image width visible)
    #[arg(long, value_parser = parse_zoom, default_value = "1.0")]
    pub zoom: f64,

    /// Top-left of the visible region in viewport units (X,Y)
    #[arg(long, value_parser = parse_point, default_value = "0,0")]
    pub origin: Point,

    /// Position of the widget on the page (X,Y)
    #[arg(long, value_parser = parse_point, default_value = "0,0")]
    pub offset: Point,
}

impl SurfaceArgs {
    pub fn displayed_image(&self) -> DisplayedImage {
        let shown = self.display.unwrap_or(self.natural);
        DisplayedImage::new(
            ElementRect::new(self.offset.x, self.offset.y, shown.width, shown.height),
            self.natural,
        )
    }

    /// Viewer snapshot, when the viewer surface was selected.
    pub fn viewport(&self) -> Option<ViewportTransform> {
        let element = self.viewer?;
        Some(ViewportTransform::with_zoom(
            ElementRect::new(self.offset.x, self.offset.y, element.width, element.height),
            self.content.unwrap_or(self.natural),
            self.natural,
            self.zoom,
            self.origin,
        ))
    }

    pub fn overlay_target(&self, native: bool) -> OverlayTarget {
        match self.viewport() {
            Some(t) if native => OverlayTarget::ViewerNative(t),
            Some(t) => OverlayTarget::ViewerElement(t),
            None => OverlayTarget::Css(self.displayed_image()),
        }
    }
}

/// Read a session config, or fall back to defaults.
pub fn load_config(path: Option<&Path>) -> Result<SessionConfig> {
    match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str(&contents).context("Invalid session config")
        }
        None => Ok(SessionConfig::default()),
    }
}

fn parse_pair(s: &str, sep: char) -> Result<(f64, f64), String> {
    let (a, b) = s
        .split_once(sep)
        .ok_or_else(|| format!("expected two values separated by '{sep}'"))?;
    let a = a.trim().parse().map_err(|e| format!("{a}: {e}"))?;
    let b = b.trim().parse().map_err(|e| format!("{b}: {e}"))?;
    Ok((a, b))
}

/// Parse `WxH`.
pub fn parse_size(s: &str) -> Result<Size, String> {
    let (w, h) = parse_pair(s, 'x')?;
    let size = Size::new(w, h);
    if size.is_empty() {
        return Err(format!("size must be positive, got {s}"));
    }
    Ok(size)
}

/// Parse `X,Y`.
pub fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = parse_pair(s, ',')?;
    Ok(Point::new(x, y))
}

/// A zoom factor must be finite and positive.
pub fn check_zoom(zoom: f64) -> Result<f64, String> {
    if zoom.is_finite() && zoom > 0.0 {
        Ok(zoom)
    } else {
        Err(format!("zoom must be a positive number, got {zoom}"))
    }
}

/// Parse a viewer zoom factor.
pub fn parse_zoom(s: &str) -> Result<f64, String> {
    let zoom: f64 = s.trim().parse().map_err(|e| format!("{s}: {e}"))?;
    check_zoom(zoom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sizes_and_points() {
        assert_eq!(parse_size("2000x1000"), Ok(Size::new(2000.0, 1000.0)));
        assert_eq!(parse_point("0.5, 0.25"), Ok(Point::new(0.5, 0.25)));
        assert!(parse_size("2000").is_err());
        assert!(parse_size("0x10").is_err());
    }

    #[test]
    fn rejects_non_positive_zoom() {
        assert_eq!(parse_zoom("2.5"), Ok(2.5));
        assert!(parse_zoom("0").is_err());
        assert!(parse_zoom("-1").is_err());
        assert!(parse_zoom("NaN").is_err());
        assert!(parse_zoom("inf").is_err());
        assert!(check_zoom(0.0).is_err());
    }

    #[test]
    fn viewer_surface_wins_over_display() {
        let surface = SurfaceArgs {
            natural: Size::new(2000.0, 1000.0),
            display: None,
            viewer: Some(Size::new(500.0, 250.0)),
            content: None,
            zoom: 2.0,
            origin: Point::default(),
            offset: Point::default(),
        };
        assert!(matches!(
            surface.overlay_target(false),
            OverlayTarget::ViewerElement(_)
        ));
        assert!(matches!(
            surface.overlay_target(true),
            OverlayTarget::ViewerNative(_)
        ));
    }
}
