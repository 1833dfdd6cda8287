//! Small standalone utilities shared across the runtime.

pub mod ids;

pub use ids::ActorId;
