use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use segview_core::detection::{extract_geometry, ThresholdMethod};
use segview_core::geometry::Size;
use segview_core::io::image_io::save_alpha_mask;
use segview_core::io::tensor::load_raw_mask;

use super::{load_config, parse_size};

#[derive(Args)]
pub struct ExtractArgs {
    /// Raw mask file (JSON with `dims` and `data`)
    pub file: PathBuf,

    /// Session config file (TOML); overlay style and extraction settings apply
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Natural image size (WxH); geometry is rescaled when the mask differs
    #[arg(long, value_parser = parse_size)]
    pub natural: Option<Size>,

    /// Fixed contour threshold on mask intensity (0.0-1.0); Otsu when unset
    #[arg(long)]
    pub fixed_threshold: Option<f32>,

    /// Douglas-Peucker tolerance in mask pixels
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Only compute the bounding box
    #[arg(long)]
    pub no_contour: bool,

    /// Save the decoded overlay as PNG
    #[arg(long)]
    pub overlay: Option<PathBuf>,

    /// Print the geometry as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &ExtractArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    let extraction = &mut config.extraction;
    if let Some(v) = args.fixed_threshold {
        extraction.threshold_method = ThresholdMethod::Fixed(v);
    }
    if let Some(tolerance) = args.tolerance {
        extraction.contour_tolerance = tolerance;
    }
    if args.no_contour {
        extraction.contour = false;
    }

    let raw = load_raw_mask(&args.file)
        .with_context(|| format!("Failed to load raw mask {}", args.file.display()))?;
    let mask = raw.to_alpha(&config.overlay_style)?;

    let mut geometry = extract_geometry(&mask, &config.extraction);
    if let Some(natural) = args.natural {
        geometry = geometry.to_image_space(mask.size(), natural);
    }

    if let Some(ref path) = args.overlay {
        save_alpha_mask(&mask, path)
            .with_context(|| format!("Failed to write overlay to {}", path.display()))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&geometry)?);
    } else {
        crate::summary::print_geometry_summary(
            &args.file,
            &mask,
            &geometry,
            &config.extraction,
            args.overlay.as_deref(),
        );
    }

    Ok(())
}
