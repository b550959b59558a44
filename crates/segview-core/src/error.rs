use thiserror::Error;

#[derive(Error, Debug)]
pub enum SegviewError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Mask data length {len} does not match declared dimensions {width}x{height}")]
    DimensionMismatch { width: usize, height: usize, len: usize },

    #[error("Unsupported tensor shape: {0:?}")]
    TensorShape(Vec<usize>),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("No image is open in this session")]
    NoImage,

    #[error("Segmentation worker has shut down")]
    WorkerDisconnected,
}

pub type Result<T> = std::result::Result<T, SegviewError>;
