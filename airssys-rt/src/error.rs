//! Canonical error type for synchronous API misuse (§7 Error Handling Design, §10.1).
//!
//! `ActorError` covers exactly the **IllegalActorState** taxonomy entry: wrong-thread writes,
//! stale contexts, state violations, missing behavior factories, double spawns. Panics never
//! appear here — a panic is captured as data (see [`crate::signal::Signal::Panic`]) and handed
//! to a signal handler, never returned as a `Result` to an unrelated caller.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
use crate::util::ActorId;

/// The specific misuse an [`ActorError::IllegalState`] reports.
///
/// Matching on `IllegalStateKind` instead of the error's `Display` string lets callers (and
/// tests, see §8 S6/S7) assert precisely which invariant was violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IllegalStateKind {
    /// `behavior(..)` or `on_signal(..)` called after the handle left `CREATED`.
    NotCreated,
    /// `behavior(..)` or `on_signal(..)` called from a thread other than the one that created
    /// the handle (§4.1, §8 S7).
    WrongCreatingThread,
    /// A context was used from a task other than the one it was bound to (§3 Contexts, §8 S4/S6).
    StaleContext,
    /// `run(..)` was called on an actor with no behavior factory set (§4.1 invariant 2).
    MissingBehaviorFactory,
    /// `spawn(..)` was called twice on the same actor, or on an actor not in `CREATED`.
    DoubleSpawn,
    /// Reserved for a capability-type mismatch on `current_actor`. `ActorContext<B>` pins `B`
    /// at compile time, so the runtime check this taxonomy entry describes is subsumed by the
    /// type system; no code path constructs this variant today.
    CapabilityMismatch,
    /// `run(..)` was called from a thread already executing inside an actor task (§4.7).
    NestedRun,
    /// A process-wide, write-once hook (uncaught exception handler, debug mode) was installed
    /// more than once (§5 Process-wide state).
    HookAlreadyInstalled,
}

impl std::fmt::Display for IllegalStateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::NotCreated => "actor is no longer in CREATED state",
            Self::WrongCreatingThread => "called from a thread other than the creating thread",
            Self::StaleContext => "context used outside the task it was bound to",
            Self::MissingBehaviorFactory => "actor has no behavior factory set",
            Self::DoubleSpawn => "actor already spawned",
            Self::CapabilityMismatch => "capability type does not match the running behavior",
            Self::NestedRun => "run() called from inside an actor task",
            Self::HookAlreadyInstalled => "process-wide hook already installed",
        };
        f.write_str(msg)
    }
}

/// Errors raised synchronously to an offending caller (never delivered as a [`crate::signal::Signal`]).
#[derive(Debug, Error)]
pub enum ActorError {
    /// Misuse of the actor API; see [`IllegalStateKind`] for the precise violation.
    #[error("illegal actor state for {actor}: {kind}")]
    IllegalState {
        /// The actor the violation was reported against.
        actor: ActorId,
        /// The precise violation.
        kind: IllegalStateKind,
    },
}

impl ActorError {
    pub(crate) fn illegal_state(actor: ActorId, kind: IllegalStateKind) -> Self {
        Self::IllegalState { actor, kind }
    }

    /// The [`IllegalStateKind`] carried by this error.
    pub fn kind(&self) -> &IllegalStateKind {
        match self {
            Self::IllegalState { kind, .. } => kind,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_actor_and_kind() {
        let id = ActorId::new();
        let err = ActorError::illegal_state(id, IllegalStateKind::DoubleSpawn);
        let msg = err.to_string();
        assert!(msg.contains(&id.to_string()));
        assert!(msg.contains("already spawned"));
    }

    #[test]
    fn kind_accessor_matches() {
        let err = ActorError::illegal_state(ActorId::new(), IllegalStateKind::StaleContext);
        assert_eq!(err.kind(), &IllegalStateKind::StaleContext);
    }
}
