pub mod feeds;
pub mod predictor;
pub mod scale;

pub use feeds::{encode_prompts, BoxPrompt, PromptFeeds};
pub use predictor::{ImageEmbedding, InferenceOutput, MaskPredictor, ReplayPredictor};
pub use scale::ModelScale;
