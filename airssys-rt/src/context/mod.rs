//! The three capability objects an actor program ever receives (§3 Contexts).
//!
//! Each one is confined to the task it was created for via a [`token::TaskToken`] bound with
//! `tokio::task_local!`; using one from outside that task, or after its scope has ended,
//! raises `ActorError::IllegalState` rather than silently doing the wrong thing.

pub(crate) mod token;

mod actor_ctx;
mod handler;
mod start;

pub use actor_ctx::ActorContext;
pub use handler::HandlerContext;
pub use start::StartContext;
