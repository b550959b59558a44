use ndarray::{Array2, Array3, Array4};
use serde::{Deserialize, Serialize};

use crate::consts::{
    LABEL_BOX_BOTTOM_RIGHT, LABEL_BOX_TOP_LEFT, LABEL_NEGATIVE, LABEL_PADDING, LABEL_POSITIVE,
    LOW_RES_MASK_SIZE,
};
use crate::error::{Result, SegviewError};
use crate::geometry::Point;
use crate::prompt::{Click, ClickType};

use super::scale::ModelScale;

/// Box prompt in image pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxPrompt {
    pub top_left: Point,
    pub bottom_right: Point,
}

/// Prompt tensors in the layout the mask decoder expects.
#[derive(Clone, Debug)]
pub struct PromptFeeds {
    /// Shape `[1, n, 2]`, in model-input pixels.
    pub point_coords: Array3<f32>,
    /// Shape `[1, n]`.
    pub point_labels: Array2<f32>,
    /// `[height, width]` of the natural image.
    pub orig_im_size: [f32; 2],
    /// Shape `[1, 1, 256, 256]`.
    pub mask_input: Array4<f32>,
    /// 1.0 when `mask_input` carries a prior mask.
    pub has_mask_input: f32,
}

impl PromptFeeds {
    pub fn point_count(&self) -> usize {
        self.point_labels.ncols()
    }
}

/// Encode the prompt set for the predictor.
///
/// Coordinates are scaled by `sam_scale`. Without a box prompt a padding
/// point `(0, 0)` labelled -1 is appended; a box prompt contributes its two
/// corners (labels 2 and 3) instead.
pub fn encode_prompts(
    clicks: &[Click],
    box_prompt: Option<&BoxPrompt>,
    scale: &ModelScale,
    prior_mask: Option<&Array2<f32>>,
) -> Result<PromptFeeds> {
    let mut points: Vec<(Point, f32)> = clicks
        .iter()
        .map(|c| {
            let label = match c.click_type {
                ClickType::Positive => LABEL_POSITIVE,
                ClickType::Negative => LABEL_NEGATIVE,
            };
            (c.point(), label)
        })
        .collect();

    match box_prompt {
        Some(b) => {
            points.push((b.top_left, LABEL_BOX_TOP_LEFT));
            points.push((b.bottom_right, LABEL_BOX_BOTTOM_RIGHT));
        }
        None => points.push((Point::default(), LABEL_PADDING)),
    }

    let n = points.len();
    let s = scale.sam_scale;
    let mut point_coords = Array3::<f32>::zeros((1, n, 2));
    let mut point_labels = Array2::<f32>::zeros((1, n));
    for (i, (p, label)) in points.iter().enumerate() {
        point_coords[[0, i, 0]] = (p.x * s) as f32;
        point_coords[[0, i, 1]] = (p.y * s) as f32;
        point_labels[[0, i]] = *label;
    }

    let mut mask_input = Array4::<f32>::zeros((1, 1, LOW_RES_MASK_SIZE, LOW_RES_MASK_SIZE));
    let has_mask_input = match prior_mask {
        Some(prior) => {
            if prior.dim() != (LOW_RES_MASK_SIZE, LOW_RES_MASK_SIZE) {
                let (h, w) = prior.dim();
                return Err(SegviewError::TensorShape(vec![h, w]));
            }
            mask_input
                .slice_mut(ndarray::s![0, 0, .., ..])
                .assign(prior);
            1.0
        }
        None => 0.0,
    };

    Ok(PromptFeeds {
        point_coords,
        point_labels,
        orig_im_size: [scale.height as f32, scale.width as f32],
        mask_input,
        has_mask_input,
    })
}
