#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::mpsc;

use ndarray::{Array2, ArrayD, IxDyn};
use segview_core::error::{Result, SegviewError};
use segview_core::mask::{AlphaMask, OverlayStyle, RawMask};
use segview_core::model::{ImageEmbedding, InferenceOutput, MaskPredictor, PromptFeeds};

/// Raw mask scoring +1 inside the given `(x, y, w, h)` rects and -1 elsewhere.
pub fn raw_mask_with_rects(width: usize, height: usize, rects: &[(usize, usize, usize, usize)]) -> RawMask {
    let mut scores = Array2::<f32>::from_elem((height, width), -1.0);
    for &(x, y, w, h) in rects {
        for row in y..y + h {
            for col in x..x + w {
                scores[[row, col]] = 1.0;
            }
        }
    }
    RawMask::new(scores)
}

/// Alpha mask with the given foreground rects, default overlay style.
pub fn alpha_with_rects(width: usize, height: usize, rects: &[(usize, usize, usize, usize)]) -> AlphaMask {
    raw_mask_with_rects(width, height, rects)
        .to_alpha(&OverlayStyle::default())
        .unwrap()
}

/// Small placeholder embedding; predictors in tests ignore it.
pub fn dummy_embedding() -> ImageEmbedding {
    ImageEmbedding::new(ArrayD::zeros(IxDyn(&[1, 4, 8, 8])))
}

/// Predictor that reports each call on `started` and then blocks until a
/// message arrives on `release`.
pub struct GatedPredictor {
    pub masks: VecDeque<RawMask>,
    pub started: mpsc::Sender<usize>,
    pub release: mpsc::Receiver<()>,
}

impl MaskPredictor for GatedPredictor {
    fn predict(&mut self, _embedding: &ImageEmbedding, feeds: &PromptFeeds) -> Result<InferenceOutput> {
        let _ = self.started.send(feeds.point_count());
        self.release
            .recv()
            .map_err(|_| SegviewError::Inference("gate closed".into()))?;
        self.masks
            .pop_front()
            .map(InferenceOutput::from_mask)
            .ok_or_else(|| SegviewError::Inference("no mask left".into()))
    }
}

/// Predictor whose declared dimensions disagree with the mask it returns.
pub struct MismatchedPredictor;

impl MaskPredictor for MismatchedPredictor {
    fn predict(&mut self, _embedding: &ImageEmbedding, _feeds: &PromptFeeds) -> Result<InferenceOutput> {
        let mask = RawMask::new(Array2::from_elem((8, 8), 1.0));
        Ok(InferenceOutput {
            mask,
            width: 10,
            height: 10,
            low_res: None,
            iou: Some(0.9),
        })
    }
}

/// Predictor that records the feeds it receives.
pub struct RecordingPredictor {
    pub mask: RawMask,
    pub feeds_tx: mpsc::Sender<PromptFeeds>,
    pub low_res: Option<Array2<f32>>,
}

impl MaskPredictor for RecordingPredictor {
    fn predict(&mut self, _embedding: &ImageEmbedding, feeds: &PromptFeeds) -> Result<InferenceOutput> {
        let _ = self.feeds_tx.send(feeds.clone());
        let mut out = InferenceOutput::from_mask(self.mask.clone());
        out.low_res = self.low_res.clone();
        Ok(out)
    }
}
