use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Polarity of a prompt point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickType {
    Positive,
    Negative,
}

impl fmt::Display for ClickType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
        }
    }
}

/// Pointer button and modifier keys held during a click.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    /// The click came from the secondary (right) button.
    #[serde(default)]
    pub secondary_button: bool,
    /// Shift was held.
    #[serde(default)]
    pub shift: bool,
}

impl Modifiers {
    pub const PRIMARY: Modifiers = Modifiers {
        secondary_button: false,
        shift: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        secondary_button: false,
        shift: true,
    };

    /// A plain primary click is positive; anything modified is negative.
    pub fn click_type(&self) -> ClickType {
        if self.secondary_button || self.shift {
            ClickType::Negative
        } else {
            ClickType::Positive
        }
    }
}

/// A prompt point in original-image pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Click {
    pub x: f64,
    pub y: f64,
    pub click_type: ClickType,
}

impl Click {
    pub fn new(x: f64, y: f64, click_type: ClickType) -> Self {
        Self { x, y, click_type }
    }

    pub fn positive(x: f64, y: f64) -> Self {
        Self::new(x, y, ClickType::Positive)
    }

    pub fn negative(x: f64, y: f64) -> Self {
        Self::new(x, y, ClickType::Negative)
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
