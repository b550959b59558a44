pub mod alpha;
pub mod decode;
pub mod raw;

pub use alpha::{AlphaMask, OverlayStyle};
pub use decode::decode;
pub use raw::RawMask;
