//! The actor handle, its lifecycle state machine, and its per-task scheduling loop.
//!
//! - [`handle`] — `Actor<B>`, the cloneable, addressable handle (§4.1)
//! - [`lifecycle`] — the `Created` → `Running` → `Shutdown` state machine
//! - [`task`] — the tokio task loop every spawned actor runs inside (§5)

pub mod handle;
pub mod lifecycle;
pub(crate) mod task;

pub use handle::{signal_handler, Actor, BehaviorFactory, SignalHandler};
pub use lifecycle::ActorState;
