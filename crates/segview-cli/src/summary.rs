use std::path::Path;

use console::Style;
use segview_core::detection::ExtractionConfig;
use segview_core::geometry::Geometry;
use segview_core::mask::AlphaMask;
use segview_core::projection::{Annotation, AnnotationLog, CoordinateSpace, OverlayShape};
use segview_core::session::Session;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_geometry_summary(
    input: &Path,
    mask: &AlphaMask,
    geometry: &Geometry,
    extraction: &ExtractionConfig,
    overlay: Option<&Path>,
) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Mask Geometry"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(13)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Mask"),
        s.value.apply_to(format!("{}x{}", mask.width(), mask.height()))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Foreground"),
        s.value.apply_to(format!("{} px", mask.foreground_count()))
    );
    if let Some(path) = overlay {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Overlay"),
            s.path.apply_to(path.display())
        );
    }
    println!();

    print_geometry_section(&s, geometry, extraction);
}

fn print_geometry_section(s: &Styles, geometry: &Geometry, extraction: &ExtractionConfig) {
    if !geometry.is_detection() {
        println!(
            "  {:<14}{}",
            s.header.apply_to("Detection"),
            s.disabled.apply_to("none")
        );
        println!();
        return;
    }

    let b = &geometry.bbox;
    println!("  {}", s.header.apply_to("Bounding Box"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Origin"),
        s.value.apply_to(format!("({}, {})", b.min_x, b.min_y))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Size"),
        s.value.apply_to(format!("{} x {}", b.width, b.height))
    );
    println!();

    if !extraction.contour {
        println!(
            "  {:<14}{}",
            s.header.apply_to("Contour"),
            s.disabled.apply_to("disabled")
        );
        println!();
        return;
    }
    println!("  {}", s.header.apply_to("Contour"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Threshold"),
        s.method.apply_to(&extraction.threshold_method)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Tolerance"),
        s.value.apply_to(format!("{} px", extraction.contour_tolerance))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Vertices"),
        s.value.apply_to(geometry.contour.len())
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Area"),
        s.value.apply_to(format!("{:.1} px\u{b2}", geometry.contour.area()))
    );
    println!();
}

pub fn print_annotations(annotations: &[Annotation]) {
    let s = Styles::new();

    if annotations.is_empty() {
        println!("  {}", s.disabled.apply_to("No detection, nothing to draw"));
        return;
    }
    for annotation in annotations {
        let space = match annotation.space {
            CoordinateSpace::Element => "element px",
            CoordinateSpace::ContentPixels => "content px",
        };
        match &annotation.shape {
            OverlayShape::Rect {
                x,
                y,
                width,
                height,
            } => println!(
                "  {:<10}{}  {}",
                s.label.apply_to("Rect"),
                s.value.apply_to(format!(
                    "x={x:.2} y={y:.2} w={width:.2} h={height:.2}"
                )),
                s.method.apply_to(space)
            ),
            OverlayShape::Polygon { points } => {
                let pts: Vec<String> = points
                    .iter()
                    .map(|p| format!("({:.2}, {:.2})", p.x, p.y))
                    .collect();
                println!(
                    "  {:<10}{}  {}",
                    s.label.apply_to("Polygon"),
                    s.value.apply_to(pts.join(" ")),
                    s.method.apply_to(space)
                );
            }
        }
    }
}

pub fn print_session_summary(session: &Session<AnnotationLog>) {
    let s = Styles::new();
    let config = session.config();

    println!();
    println!("  {}", s.title.apply_to("Session"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(7)));
    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Prompts"),
        s.method.apply_to(config.prompt_policy)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("On leave"),
        s.method.apply_to(config.leave_policy)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Shapes"),
        s.method.apply_to(config.shape_mode)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Clicks"),
        s.value.apply_to(session.prompts().len())
    );
    println!();

    match session.geometry() {
        Some(geometry) => print_geometry_section(&s, geometry, &config.extraction),
        None => {
            println!(
                "  {:<14}{}",
                s.header.apply_to("Overlay"),
                s.disabled.apply_to("hidden")
            );
            println!();
        }
    }

    print_annotations(&session.overlay().sink().shown);
    println!();
}
