//! Search worker.
//!
//! The worker performs the remote proximity queries off the runtime loop.
//! Each message is handled by an independent future, so several searches
//! can be outstanding at once and complete in any order.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types
//! - `backend`: The [`SearchBackend`] seam and its HTTP implementation
//! - `handler`: [`SearchWorker`], which bounds every call with a timeout

pub mod backend;
pub mod handler;
pub mod messages;

pub use backend::{HttpSearchBackend, SearchBackend};
pub use handler::SearchWorker;
pub use messages::{WorkerMessage, WorkerResponse};
