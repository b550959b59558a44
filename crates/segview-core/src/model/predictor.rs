use std::collections::VecDeque;
use std::sync::Arc;

use ndarray::{Array2, ArrayD};

use crate::error::{Result, SegviewError};
use crate::mask::RawMask;

use super::feeds::PromptFeeds;

/// Precomputed, image-specific embedding. Opaque to the pipeline.
#[derive(Clone, Debug)]
pub struct ImageEmbedding {
    pub tensor: Arc<ArrayD<f32>>,
}

impl ImageEmbedding {
    pub fn new(tensor: ArrayD<f32>) -> Self {
        Self {
            tensor: Arc::new(tensor),
        }
    }

    pub fn shape(&self) -> &[usize] {
        self.tensor.shape()
    }
}

/// What one inference cycle returns.
#[derive(Clone, Debug)]
pub struct InferenceOutput {
    pub mask: RawMask,
    /// Width the predictor declared for `mask`.
    pub width: usize,
    /// Height the predictor declared for `mask`.
    pub height: usize,
    /// Low-resolution logits that can be fed back as a prior mask.
    pub low_res: Option<Array2<f32>>,
    /// Predicted IOU; not used by the pipeline.
    pub iou: Option<f32>,
}

impl InferenceOutput {
    pub fn from_mask(mask: RawMask) -> Self {
        Self {
            width: mask.width(),
            height: mask.height(),
            mask,
            low_res: None,
            iou: None,
        }
    }
}

/// The external segmentation model.
pub trait MaskPredictor: Send {
    fn predict(&mut self, embedding: &ImageEmbedding, feeds: &PromptFeeds)
        -> Result<InferenceOutput>;
}

/// Serves a fixed queue of precomputed masks, one per request.
#[derive(Clone, Debug, Default)]
pub struct ReplayPredictor {
    masks: VecDeque<RawMask>,
}

impl ReplayPredictor {
    pub fn new(masks: impl IntoIterator<Item = RawMask>) -> Self {
        Self {
            masks: masks.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.masks.len()
    }
}

impl MaskPredictor for ReplayPredictor {
    fn predict(
        &mut self,
        _embedding: &ImageEmbedding,
        _feeds: &PromptFeeds,
    ) -> Result<InferenceOutput> {
        self.masks
            .pop_front()
            .map(InferenceOutput::from_mask)
            .ok_or_else(|| SegviewError::Inference("replay queue exhausted".into()))
    }
}
