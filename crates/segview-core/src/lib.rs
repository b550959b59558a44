pub mod consts;
pub mod coords;
pub mod detection;
pub mod error;
pub mod geometry;
pub mod io;
pub mod mask;
pub mod model;
pub mod projection;
pub mod prompt;
pub mod session;
pub mod viewport;
