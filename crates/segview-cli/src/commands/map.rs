use anyhow::{Context, Result};
use clap::Args;
use segview_core::coords::{map_click, ClickTarget, PointerEvent};
use segview_core::model::ModelScale;
use segview_core::prompt::Modifiers;

use super::SurfaceArgs;

#[derive(Args)]
pub struct MapArgs {
    /// Client X of the click
    pub x: f64,

    /// Client Y of the click
    pub y: f64,

    #[command(flatten)]
    pub surface: SurfaceArgs,

    /// Shift held: record a negative click
    #[arg(long)]
    pub negative: bool,
}

pub fn run(args: &MapArgs) -> Result<()> {
    let event = PointerEvent::new(args.x, args.y);
    let modifiers = if args.negative {
        Modifiers::SHIFT
    } else {
        Modifiers::PRIMARY
    };

    let point = match args.surface.viewport() {
        Some(transform) => map_click(&event, ClickTarget::Viewer(Some(&transform))),
        None => {
            let widget = args.surface.displayed_image();
            map_click(&event, ClickTarget::Image(&widget))
        }
    }
    .context("Click was dropped")?;

    let natural = args.surface.natural;
    let scale = ModelScale::for_image(natural.width.round() as u32, natural.height.round() as u32)?;

    println!("Client:      ({:.2}, {:.2})", args.x, args.y);
    println!("Image:       ({:.2}, {:.2})", point.x, point.y);
    println!(
        "Model input: ({:.2}, {:.2})  scale {:.4}",
        point.x * scale.sam_scale,
        point.y * scale.sam_scale,
        scale.sam_scale
    );
    println!("Type:        {}", modifiers.click_type());

    let inside =
        point.x >= 0.0 && point.y >= 0.0 && point.x < natural.width && point.y < natural.height;
    if !inside {
        println!("Note:        outside the image bounds");
    }

    Ok(())
}
