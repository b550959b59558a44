use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use segview_core::geometry::{BoundingBox, Geometry};
use segview_core::projection::{project_geometry, ShapeMode};

use super::SurfaceArgs;

#[derive(Args)]
pub struct ProjectArgs {
    /// Bounding box in image pixels (X,Y,W,H)
    #[arg(long, value_parser = parse_bbox, conflicts_with = "geometry")]
    pub bbox: Option<BoundingBox>,

    /// Geometry JSON as printed by `segview extract --json`
    #[arg(long)]
    pub geometry: Option<PathBuf>,

    #[command(flatten)]
    pub surface: SurfaceArgs,

    /// Emit viewer content pixels instead of element pixels
    #[arg(long, requires = "viewer")]
    pub native: bool,
}

pub fn run(args: &ProjectArgs) -> Result<()> {
    let geometry = match (&args.bbox, &args.geometry) {
        (Some(bbox), _) => Geometry {
            bbox: *bbox,
            ..Geometry::default()
        },
        (None, Some(path)) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read geometry {}", path.display()))?;
            serde_json::from_str(&contents).context("Invalid geometry JSON")?
        }
        (None, None) => bail!("Either --bbox or --geometry is required"),
    };

    let target = args.surface.overlay_target(args.native);
    let annotations = project_geometry(&geometry, &target, ShapeMode::Both);
    crate::summary::print_annotations(&annotations);

    Ok(())
}

fn parse_bbox(s: &str) -> Result<BoundingBox, String> {
    let values: Vec<f64> = s
        .split(',')
        .map(|v| v.trim().parse::<f64>().map_err(|e| format!("{v}: {e}")))
        .collect::<Result<_, _>>()?;
    let [min_x, min_y, width, height] = values[..] else {
        return Err(format!("expected X,Y,W,H, got {s}"));
    };
    if width < 0.0 || height < 0.0 {
        return Err("width and height must not be negative".into());
    }
    Ok(BoundingBox {
        min_x,
        min_y,
        width,
        height,
    })
}
