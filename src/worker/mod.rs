//! Background worker for storage operations.
//!
//! - `messages`: Request/response protocol with trace context propagation
//! - `handler`: [`StoreWorker`], which owns the stores and answers requests

pub mod handler;
pub mod messages;

pub use handler::StoreWorker;
pub use messages::{StoreLocation, TraceContext, WorkerMessage, WorkerResponse};
