use std::fmt;

use serde::{Deserialize, Serialize};

use crate::detection::ExtractionConfig;
use crate::mask::OverlayStyle;
use crate::projection::ShapeMode;
use crate::prompt::PromptPolicy;

/// What happens to the prompt set when the pointer leaves the image.
///
/// The displayed mask is always hidden; prompts survive unless
/// `ClearPrompts` is selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeavePolicy {
    #[default]
    KeepPrompts,
    ClearPrompts,
}

impl fmt::Display for LeavePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeepPrompts => write!(f, "Keep Prompts"),
            Self::ClearPrompts => write!(f, "Clear Prompts"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub prompt_policy: PromptPolicy,
    #[serde(default)]
    pub leave_policy: LeavePolicy,
    #[serde(default)]
    pub shape_mode: ShapeMode,
    /// Feed the previous low-resolution mask back when refining.
    #[serde(default)]
    pub use_prior_mask: bool,
    #[serde(default)]
    pub overlay_style: OverlayStyle,
    #[serde(default)]
    pub extraction: ExtractionConfig,
}
