//! Scripted session playback.
//!
//! A script names the natural image size, the precomputed masks the
//! predictor will serve (one per inference request) and a list of steps:
//!
//! ```toml
//! natural = [400, 200]
//! masks = ["mask-1.json", "mask-2.json"]
//!
//! [surface]
//! display = [100, 50]
//!
//! [[steps]]
//! action = "click"
//! x = 25
//! y = 12.5
//!
//! [[steps]]
//! action = "click"
//! x = 40
//! y = 20
//! negative = true
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use ndarray::{ArrayD, IxDyn};
use segview_core::coords::{ClickTarget, DisplayedImage, PointerEvent};
use segview_core::geometry::{ElementRect, Point, Size};
use segview_core::io::image_io::save_alpha_mask;
use segview_core::io::tensor::load_raw_mask;
use segview_core::model::{ImageEmbedding, ReplayPredictor};
use segview_core::projection::{AnnotationLog, OverlayTarget};
use segview_core::prompt::Modifiers;
use segview_core::session::{Session, SessionConfig, SessionEvent};
use segview_core::viewport::ViewportTransform;
use serde::Deserialize;
use tracing::info;

use super::{check_zoom, load_config};

#[derive(Args)]
pub struct ReplayArgs {
    /// Replay script (TOML)
    pub script: PathBuf,

    /// Session config file (TOML); overrides the script's `[session]` table
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Save the final overlay as PNG
    #[arg(long)]
    pub overlay: Option<PathBuf>,

    /// How long to wait for each inference result, in milliseconds
    #[arg(long, default_value = "5000")]
    pub timeout_ms: u64,
}

#[derive(Deserialize)]
struct ReplayScript {
    /// Natural image size `[width, height]`.
    natural: [u32; 2],
    /// Raw mask files, relative to the script.
    masks: Vec<PathBuf>,
    #[serde(default)]
    surface: ScriptSurface,
    #[serde(default)]
    session: SessionConfig,
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(Default, Deserialize)]
struct ScriptSurface {
    /// Displayed size of an image widget.
    display: Option<[f64; 2]>,
    /// Viewer element size; selects the deep-zoom viewer.
    viewer: Option<[f64; 2]>,
    /// Tile pyramid content size, defaults to the natural size.
    content: Option<[f64; 2]>,
    /// Draw viewer overlays in content pixels.
    #[serde(default)]
    native: bool,
}

#[derive(Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum Step {
    Click {
        x: f64,
        y: f64,
        #[serde(default)]
        negative: bool,
    },
    Undo,
    Clear,
    Leave,
    Zoom {
        zoom: f64,
        #[serde(default)]
        origin: [f64; 2],
    },
}

/// Current on-screen surface of the replayed session.
enum Surface {
    Image(DisplayedImage),
    Viewer {
        transform: ViewportTransform,
        native: bool,
    },
}

impl Surface {
    fn from_script(s: &ScriptSurface, natural: Size) -> Self {
        match s.viewer {
            Some([w, h]) => {
                let content = s.content.map_or(natural, |[cw, ch]| Size::new(cw, ch));
                Surface::Viewer {
                    transform: ViewportTransform::home(
                        ElementRect::new(0.0, 0.0, w, h),
                        content,
                        natural,
                    ),
                    native: s.native,
                }
            }
            None => {
                let [w, h] = s.display.unwrap_or([natural.width, natural.height]);
                Surface::Image(DisplayedImage::new(ElementRect::new(0.0, 0.0, w, h), natural))
            }
        }
    }

    fn target(&self) -> OverlayTarget {
        match self {
            Surface::Image(widget) => OverlayTarget::Css(*widget),
            Surface::Viewer {
                transform,
                native: true,
            } => OverlayTarget::ViewerNative(*transform),
            Surface::Viewer { transform, .. } => OverlayTarget::ViewerElement(*transform),
        }
    }

    /// Re-zoom a viewer surface; image widgets ignore zoom.
    fn zoom(&mut self, zoom: f64, origin: [f64; 2]) -> Result<()> {
        let zoom = check_zoom(zoom).map_err(anyhow::Error::msg)?;
        if let Surface::Viewer { transform, .. } = self {
            *transform = ViewportTransform::with_zoom(
                transform.element,
                transform.content_size,
                transform.natural_size,
                zoom,
                Point::new(origin[0], origin[1]),
            );
        }
        Ok(())
    }

    fn click_target(&self) -> ClickTarget<'_> {
        match self {
            Surface::Image(widget) => ClickTarget::Image(widget),
            Surface::Viewer { transform, .. } => ClickTarget::Viewer(Some(transform)),
        }
    }
}

pub fn run(args: &ReplayArgs) -> Result<()> {
    let contents = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script {}", args.script.display()))?;
    let script: ReplayScript = toml::from_str(&contents).context("Invalid replay script")?;
    let base = args.script.parent().unwrap_or(Path::new("."));

    let masks = script
        .masks
        .iter()
        .map(|p| {
            let path = base.join(p);
            load_raw_mask(&path)
                .with_context(|| format!("Failed to load raw mask {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let config = match args.config {
        Some(ref path) => load_config(Some(path))?,
        None => script.session.clone(),
    };
    let [width, height] = script.natural;
    let natural = Size::new(width as f64, height as f64);
    let timeout = Duration::from_millis(args.timeout_ms);

    info!(masks = masks.len(), steps = script.steps.len(), "Replaying session");
    let mut session = Session::new(
        config,
        Box::new(ReplayPredictor::new(masks)),
        AnnotationLog::default(),
    )?;
    // The replay predictor never reads the embedding.
    session.open_image(width, height, ImageEmbedding::new(ArrayD::zeros(IxDyn(&[0]))))?;

    let mut surface = Surface::from_script(&script.surface, natural);
    session.set_target(surface.target());

    for (i, step) in script.steps.iter().enumerate() {
        let (label, events) = match step {
            Step::Click { x, y, negative } => {
                let modifiers = if *negative {
                    Modifiers::SHIFT
                } else {
                    Modifiers::PRIMARY
                };
                let event = PointerEvent::new(*x, *y);
                session.click(&event, surface.click_target(), modifiers)?;
                let label = format!("click ({x}, {y}) {}", modifiers.click_type());
                (label, session.wait_for_latest(timeout)?)
            }
            Step::Undo => {
                session.undo()?;
                ("undo".to_string(), session.wait_for_latest(timeout)?)
            }
            Step::Clear => {
                session.clear_prompts();
                ("clear".to_string(), Vec::new())
            }
            Step::Leave => {
                session.pointer_left();
                ("leave".to_string(), Vec::new())
            }
            Step::Zoom { zoom, origin } => {
                surface
                    .zoom(*zoom, *origin)
                    .with_context(|| format!("Invalid zoom in step {}", i + 1))?;
                session.set_target(surface.target());
                (format!("zoom {zoom}"), Vec::new())
            }
        };
        print_step(i + 1, &label, &events, &session);
    }

    crate::summary::print_session_summary(&session);

    if let Some(ref path) = args.overlay {
        match session.mask() {
            Some(mask) => save_alpha_mask(mask, path)
                .with_context(|| format!("Failed to write overlay to {}", path.display()))?,
            None => println!("No mask to save"),
        }
    }

    Ok(())
}

fn print_step(n: usize, label: &str, events: &[SessionEvent], session: &Session<AnnotationLog>) {
    let outcome: Vec<String> = events
        .iter()
        .map(|e| match e {
            SessionEvent::Applied { seq, detection } => {
                format!("#{seq} applied ({})", if *detection { "detection" } else { "empty" })
            }
            SessionEvent::Discarded { seq } => format!("#{seq} discarded"),
            SessionEvent::Failed { seq, message } => format!("#{seq} failed: {message}"),
        })
        .collect();
    println!(
        "{n:>3}. {label:<32} prompts={} shapes={} {}",
        session.prompts().len(),
        session.overlay().sink().shown.len(),
        outcome.join(", ")
    );
}
