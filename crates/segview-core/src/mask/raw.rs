use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SegviewError};

/// Real-valued mask scores as returned by the predictor.
///
/// Stored row-major, shape = (height, width).
#[derive(Clone, Debug, PartialEq)]
pub struct RawMask {
    pub scores: Array2<f32>,
}

/// Serialized tensor: explicit dims plus flat row-major data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TensorJson {
    pub dims: Vec<usize>,
    pub data: Vec<f32>,
}

impl RawMask {
    pub fn new(scores: Array2<f32>) -> Self {
        Self { scores }
    }

    /// Build from flat data with declared dimensions.
    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        let len = data.len();
        let scores = Array2::from_shape_vec((height, width), data)
            .map_err(|_| SegviewError::DimensionMismatch { width, height, len })?;
        Ok(Self { scores })
    }

    /// Build from an NCHW tensor (`[1, 1, H, W]`, `[1, H, W]` or `[H, W]`).
    ///
    /// Only the first mask of a batch is kept.
    pub fn from_tensor(dims: &[usize], data: &[f32]) -> Result<Self> {
        if dims.len() < 2 || dims[..dims.len() - 2].iter().any(|&d| d == 0) {
            return Err(SegviewError::TensorShape(dims.to_vec()));
        }
        let height = dims[dims.len() - 2];
        let width = dims[dims.len() - 1];
        let expected = dims
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| SegviewError::TensorShape(dims.to_vec()))?;
        if data.len() != expected {
            return Err(SegviewError::DimensionMismatch {
                width,
                height,
                len: data.len(),
            });
        }
        Self::from_vec(width, height, data[..width * height].to_vec())
    }

    pub fn width(&self) -> usize {
        self.scores.ncols()
    }

    pub fn height(&self) -> usize {
        self.scores.nrows()
    }

    pub fn to_tensor_json(&self) -> TensorJson {
        TensorJson {
            dims: vec![1, 1, self.height(), self.width()],
            data: self.scores.iter().copied().collect(),
        }
    }
}

impl TryFrom<TensorJson> for RawMask {
    type Error = SegviewError;

    fn try_from(t: TensorJson) -> Result<Self> {
        RawMask::from_tensor(&t.dims, &t.data)
    }
}
