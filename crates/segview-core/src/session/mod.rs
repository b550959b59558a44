pub mod config;
pub mod messages;
pub mod store;
pub mod worker;

pub use config::{LeavePolicy, SessionConfig};
pub use messages::{InferenceRequest, WorkerCommand, WorkerResult, WorkerSettings};
pub use store::{Session, SessionEvent};
pub use worker::spawn_worker;
