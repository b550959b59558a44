//! Session-scoped state: prompt set, current mask and geometry, overlay.
//!
//! All mutation happens on the caller's thread. Inference, decoding and the
//! pixel scans run on the worker; their results are merged back in `poll`
//! and friends, where anything older than the latest issued request is
//! dropped.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::coords::{map_click, ClickTarget, PointerEvent};
use crate::error::{Result, SegviewError};
use crate::geometry::{Geometry, Point};
use crate::mask::AlphaMask;
use crate::model::{BoxPrompt, ImageEmbedding, MaskPredictor, ModelScale};
use crate::projection::{AnnotationSink, OverlayEvent, OverlayTarget, ProjectedOverlay};
use crate::prompt::{Click, Modifiers, PromptAccumulator, PromptSet};

use super::config::{LeavePolicy, SessionConfig};
use super::messages::{InferenceRequest, WorkerCommand, WorkerResult, WorkerSettings};
use super::worker::spawn_worker;

/// What merging one worker result did.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// The result replaced mask and geometry.
    Applied { seq: u64, detection: bool },
    /// The result belonged to a superseded request and was dropped.
    Discarded { seq: u64 },
    /// The cycle failed; the previous overlay is kept.
    Failed { seq: u64, message: String },
}

struct OpenImage {
    id: u64,
    scale: ModelScale,
}

pub struct Session<S: AnnotationSink> {
    config: SessionConfig,
    prompts: PromptAccumulator,
    box_prompt: Option<BoxPrompt>,
    image: Option<OpenImage>,
    mask: Option<AlphaMask>,
    geometry: Option<Geometry>,
    overlay: ProjectedOverlay<S>,
    next_image_id: u64,
    /// Sequence number of the newest request; results below it are stale.
    issued_seq: u64,
    /// The newest request, while it has not produced a result.
    outstanding: Option<u64>,
    cmd_tx: mpsc::Sender<WorkerCommand>,
    result_rx: mpsc::Receiver<WorkerResult>,
}

impl<S: AnnotationSink> Session<S> {
    /// Create a session and spawn its worker.
    pub fn new(
        config: SessionConfig,
        predictor: Box<dyn MaskPredictor>,
        sink: S,
    ) -> Result<Self> {
        let (result_tx, result_rx) = mpsc::channel();
        let settings = WorkerSettings {
            style: config.overlay_style,
            extraction: config.extraction.clone(),
        };
        let cmd_tx = spawn_worker(predictor, settings, result_tx)?;

        Ok(Self {
            prompts: PromptAccumulator::new(config.prompt_policy),
            overlay: ProjectedOverlay::new(sink, config.shape_mode),
            config,
            box_prompt: None,
            image: None,
            mask: None,
            geometry: None,
            next_image_id: 1,
            issued_seq: 0,
            outstanding: None,
            cmd_tx,
            result_rx,
        })
    }

    /// Open a new image. Resets prompts, mask and overlay.
    pub fn open_image(
        &mut self,
        width: u32,
        height: u32,
        embedding: ImageEmbedding,
    ) -> Result<()> {
        let scale = ModelScale::for_image(width, height)?;
        self.clear_prompts();

        let id = self.next_image_id;
        self.next_image_id += 1;
        self.send(WorkerCommand::OpenImage {
            image_id: id,
            embedding,
            scale,
        })?;
        info!(
            image_id = id,
            width,
            height,
            sam_scale = scale.sam_scale,
            "Image opened"
        );
        self.image = Some(OpenImage { id, scale });
        Ok(())
    }

    /// Discard the current image and every piece of interaction state.
    pub fn close_image(&mut self) {
        self.clear_prompts();
        self.image = None;
    }

    /// Map a pointer event and add it as a prompt.
    ///
    /// Returns the request sequence number, or `None` when the click was
    /// dropped because the viewer was not ready.
    pub fn click(
        &mut self,
        event: &PointerEvent,
        target: ClickTarget<'_>,
        modifiers: Modifiers,
    ) -> Result<Option<u64>> {
        if self.image.is_none() {
            return Err(SegviewError::NoImage);
        }
        match map_click(event, target) {
            Some(point) => self.add_prompt(point, modifiers).map(Some),
            None => Ok(None),
        }
    }

    /// Add a prompt already expressed in image pixels and request inference.
    pub fn add_prompt(&mut self, point: Point, modifiers: Modifiers) -> Result<u64> {
        if self.image.is_none() {
            return Err(SegviewError::NoImage);
        }
        self.prompts.add_click(point, modifiers);
        self.request()
    }

    /// Set or clear the box prompt. Re-runs inference when prompts exist.
    pub fn set_box_prompt(&mut self, box_prompt: Option<BoxPrompt>) -> Result<Option<u64>> {
        self.box_prompt = box_prompt;
        if self.image.is_none() || (self.prompts.is_empty() && self.box_prompt.is_none()) {
            return Ok(None);
        }
        self.request().map(Some)
    }

    /// Remove the last click and re-run inference on the remaining ones.
    pub fn undo(&mut self) -> Result<Option<u64>> {
        if self.prompts.undo().is_none() {
            return Ok(None);
        }
        if self.prompts.is_empty() && self.box_prompt.is_none() {
            self.hide_overlay();
            self.invalidate_requests();
            return Ok(None);
        }
        self.request().map(Some)
    }

    /// Explicit clear: prompts, mask and overlay. In-flight results become
    /// stale.
    pub fn clear_prompts(&mut self) {
        self.prompts.clear();
        self.box_prompt = None;
        self.hide_overlay();
        self.invalidate_requests();
    }

    /// The pointer left the image: hide the mask, and clear prompts only
    /// when the leave policy asks for it.
    pub fn pointer_left(&mut self) {
        match self.config.leave_policy {
            LeavePolicy::KeepPrompts => self.hide_overlay(),
            LeavePolicy::ClearPrompts => self.clear_prompts(),
        }
    }

    /// The viewer zoomed/panned or the widget was resized.
    pub fn set_target(&mut self, target: OverlayTarget) {
        self.overlay.handle(OverlayEvent::TargetChanged(target));
    }

    /// Merge every result already waiting, without blocking.
    pub fn poll(&mut self) -> Vec<SessionEvent> {
        let pending: Vec<WorkerResult> = self.result_rx.try_iter().collect();
        pending.into_iter().map(|r| self.merge(r)).collect()
    }

    /// Block up to `timeout` for the next result and merge it.
    pub fn poll_blocking(&mut self, timeout: Duration) -> Result<Option<SessionEvent>> {
        match self.result_rx.recv_timeout(timeout) {
            Ok(result) => Ok(Some(self.merge(result))),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(SegviewError::WorkerDisconnected),
        }
    }

    /// Block until the newest request has resolved or `timeout` elapsed.
    /// Returns every event merged on the way.
    pub fn wait_for_latest(&mut self, timeout: Duration) -> Result<Vec<SessionEvent>> {
        let deadline = Instant::now() + timeout;
        let mut events = Vec::new();
        while self.is_pending() {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                break;
            }
            match self.poll_blocking(left)? {
                Some(event) => events.push(event),
                None => break,
            }
        }
        Ok(events)
    }

    /// True while the newest request has not produced a result.
    pub fn is_pending(&self) -> bool {
        self.outstanding.is_some()
    }

    pub fn prompts(&self) -> &PromptSet {
        self.prompts.prompts()
    }

    pub fn mask(&self) -> Option<&AlphaMask> {
        self.mask.as_ref()
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn overlay(&self) -> &ProjectedOverlay<S> {
        &self.overlay
    }

    pub fn model_scale(&self) -> Option<&ModelScale> {
        self.image.as_ref().map(|img| &img.scale)
    }

    pub fn latest_seq(&self) -> u64 {
        self.issued_seq
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn request(&mut self) -> Result<u64> {
        let image_id = self.image.as_ref().ok_or(SegviewError::NoImage)?.id;
        self.issued_seq += 1;
        let seq = self.issued_seq;
        let clicks: Vec<Click> = self.prompts.prompts().clone();
        debug!(seq, clicks = clicks.len(), "Inference requested");

        self.send(WorkerCommand::Infer(InferenceRequest {
            seq,
            image_id,
            use_prior_mask: self.config.use_prior_mask && clicks.len() > 1,
            clicks,
            box_prompt: self.box_prompt,
        }))?;
        self.outstanding = Some(seq);
        Ok(seq)
    }

    fn merge(&mut self, result: WorkerResult) -> SessionEvent {
        let seq = result.seq();
        if seq < self.issued_seq {
            debug!(seq, latest = self.issued_seq, "Discarding stale result");
            return SessionEvent::Discarded { seq };
        }
        self.outstanding = None;

        match result {
            WorkerResult::Segmented { mask, geometry, .. } => {
                let detection = geometry.is_detection();
                debug!(seq, detection, "Result applied");
                self.mask = Some(mask);
                self.geometry = Some(geometry.clone());
                self.overlay.handle(OverlayEvent::GeometryChanged(geometry));
                SessionEvent::Applied { seq, detection }
            }
            WorkerResult::Failed { message, .. } => {
                warn!(seq, %message, "Keeping previous overlay");
                SessionEvent::Failed { seq, message }
            }
        }
    }

    fn hide_overlay(&mut self) {
        self.mask = None;
        self.geometry = None;
        self.overlay.handle(OverlayEvent::Cleared);
    }

    /// Make every in-flight result stale without issuing a new request.
    fn invalidate_requests(&mut self) {
        self.issued_seq += 1;
        self.outstanding = None;
    }

    fn send(&self, cmd: WorkerCommand) -> Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| SegviewError::WorkerDisconnected)
    }
}
