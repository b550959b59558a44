use crate::detection::ExtractionConfig;
use crate::geometry::Geometry;
use crate::mask::{AlphaMask, OverlayStyle};
use crate::model::{BoxPrompt, ImageEmbedding, ModelScale};
use crate::prompt::PromptSet;

/// Fixed settings the worker applies to every result.
#[derive(Clone, Debug, Default)]
pub struct WorkerSettings {
    pub style: OverlayStyle,
    pub extraction: ExtractionConfig,
}

/// One sequence-numbered inference request.
#[derive(Clone, Debug)]
pub struct InferenceRequest {
    pub seq: u64,
    pub image_id: u64,
    pub clicks: PromptSet,
    pub box_prompt: Option<BoxPrompt>,
    /// Feed the worker's cached low-resolution mask as a prior.
    pub use_prior_mask: bool,
}

/// Commands sent from the session to the worker thread.
pub enum WorkerCommand {
    /// Cache the embedding and scale of a newly opened image.
    OpenImage {
        image_id: u64,
        embedding: ImageEmbedding,
        scale: ModelScale,
    },
    /// Run inference, decode and extract geometry.
    Infer(InferenceRequest),
}

/// Results sent from the worker thread back to the session.
pub enum WorkerResult {
    /// Mask decoded and geometry extracted (image-pixel space).
    Segmented {
        seq: u64,
        mask: AlphaMask,
        geometry: Geometry,
    },
    Failed {
        seq: u64,
        message: String,
    },
}

impl WorkerResult {
    pub fn seq(&self) -> u64 {
        match self {
            Self::Segmented { seq, .. } | Self::Failed { seq, .. } => *seq,
        }
    }
}
