use tracing::debug;

use crate::geometry::Geometry;

use super::project::{project_geometry, OverlayTarget};
use super::shapes::{Annotation, ShapeMode};

/// The annotation overlay widget.
pub trait AnnotationSink {
    fn add_annotation(&mut self, annotation: Annotation);
    fn clear_annotations(&mut self);
}

/// In-memory sink that keeps the currently shown annotations.
#[derive(Clone, Debug, Default)]
pub struct AnnotationLog {
    pub shown: Vec<Annotation>,
    /// Number of `clear_annotations` calls received.
    pub clears: usize,
}

impl AnnotationSink for AnnotationLog {
    fn add_annotation(&mut self, annotation: Annotation) {
        self.shown.push(annotation);
    }

    fn clear_annotations(&mut self) {
        self.shown.clear();
        self.clears += 1;
    }
}

/// Inputs the overlay reacts to.
#[derive(Clone, Debug)]
pub enum OverlayEvent {
    /// A new inference result replaced the geometry.
    GeometryChanged(Geometry),
    /// The viewer zoomed/panned or the widget was resized.
    TargetChanged(OverlayTarget),
    /// The mask overlay was hidden.
    Cleared,
}

/// Keeps the sink in sync with the latest geometry and target.
///
/// Every event re-projects from scratch, so a zoom or pan after a result
/// never leaves stale coordinates on screen.
pub struct ProjectedOverlay<S: AnnotationSink> {
    sink: S,
    mode: ShapeMode,
    geometry: Option<Geometry>,
    target: Option<OverlayTarget>,
}

impl<S: AnnotationSink> ProjectedOverlay<S> {
    pub fn new(sink: S, mode: ShapeMode) -> Self {
        Self {
            sink,
            mode,
            geometry: None,
            target: None,
        }
    }

    pub fn handle(&mut self, event: OverlayEvent) {
        match event {
            OverlayEvent::GeometryChanged(geometry) => self.geometry = Some(geometry),
            OverlayEvent::TargetChanged(target) => self.target = Some(target),
            OverlayEvent::Cleared => self.geometry = None,
        }
        self.refresh();
    }

    fn refresh(&mut self) {
        self.sink.clear_annotations();
        let (Some(geometry), Some(target)) = (&self.geometry, &self.target) else {
            return;
        };
        let annotations = project_geometry(geometry, target, self.mode);
        debug!(count = annotations.len(), "Overlay re-projected");
        for annotation in annotations {
            self.sink.add_annotation(annotation);
        }
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn target(&self) -> Option<&OverlayTarget> {
        self.target.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
