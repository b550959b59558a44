/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Longest side (in pixels) the image is resized to before embedding.
pub const MODEL_LONG_SIDE: f64 = 1024.0;

/// Side length of the low-resolution mask the model accepts as a prior.
pub const LOW_RES_MASK_SIZE: usize = 256;

/// Point label for a positive click.
pub const LABEL_POSITIVE: f32 = 1.0;

/// Point label for a negative click.
pub const LABEL_NEGATIVE: f32 = 0.0;

/// Point label for the padding point appended when no box prompt is given.
pub const LABEL_PADDING: f32 = -1.0;

/// Point label for the top-left corner of a box prompt.
pub const LABEL_BOX_TOP_LEFT: f32 = 2.0;

/// Point label for the bottom-right corner of a box prompt.
pub const LABEL_BOX_BOTTOM_RIGHT: f32 = 3.0;

/// Default overlay colour (RGB) for foreground mask cells.
pub const DEFAULT_OVERLAY_COLOR: [u8; 3] = [0, 114, 189];

/// Default overlay opacity for foreground mask cells (40%).
pub const DEFAULT_OVERLAY_OPACITY: f32 = 0.4;

/// Default Ramer-Douglas-Peucker tolerance (pixels) for contour simplification.
pub const DEFAULT_CONTOUR_TOLERANCE: f64 = 1.5;


/// Number of histogram bins for Otsu's thresholding.
pub const OTSU_HISTOGRAM_BINS: usize = 256;
