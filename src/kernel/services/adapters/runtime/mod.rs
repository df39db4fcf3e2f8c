//! Async runtime adapter: runs remote persistence and sends results back to the shell.

mod async_runtime;
mod message;

pub use async_runtime::AsyncRuntime;
pub use message::AppMessage;
