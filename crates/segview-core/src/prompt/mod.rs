pub mod accumulator;
pub mod click;

pub use accumulator::{PromptAccumulator, PromptPolicy, PromptSet};
pub use click::{Click, ClickType, Modifiers};
