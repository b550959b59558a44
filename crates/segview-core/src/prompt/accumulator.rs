use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

use super::click::{Click, Modifiers};

/// Ordered prompt points; insertion order is preserved.
pub type PromptSet = Vec<Click>;

/// How a new click combines with the existing prompt set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromptPolicy {
    /// Append to the running set (multi-point refinement).
    #[default]
    Accumulate,
    /// Discard prior clicks and keep only the newest one.
    Replace,
}

impl fmt::Display for PromptPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accumulate => write!(f, "Accumulate"),
            Self::Replace => write!(f, "Replace"),
        }
    }
}

/// Holds the prompt set for one interactive session.
#[derive(Clone, Debug, Default)]
pub struct PromptAccumulator {
    policy: PromptPolicy,
    clicks: PromptSet,
}

impl PromptAccumulator {
    pub fn new(policy: PromptPolicy) -> Self {
        Self {
            policy,
            clicks: Vec::new(),
        }
    }

    pub fn policy(&self) -> PromptPolicy {
        self.policy
    }

    /// Record a click at `point` (image pixels); its polarity comes from
    /// `modifiers`.
    pub fn add_click(&mut self, point: Point, modifiers: Modifiers) -> &PromptSet {
        let click = Click::new(point.x, point.y, modifiers.click_type());
        if self.policy == PromptPolicy::Replace {
            self.clicks.clear();
        }
        self.clicks.push(click);
        &self.clicks
    }

    /// Remove the most recent click.
    pub fn undo(&mut self) -> Option<Click> {
        self.clicks.pop()
    }

    pub fn clear(&mut self) {
        self.clicks.clear();
    }

    pub fn prompts(&self) -> &PromptSet {
        &self.clicks
    }

    pub fn is_empty(&self) -> bool {
        self.clicks.is_empty()
    }
}
