//! The actor state machine: `CREATED` → `RUNNING` → `SHUTDOWN` (§4.1).
//!
//! The machine is monotone and atomically observable: once `spawn`-ed an actor can never
//! return to `CREATED`, and once `SHUTDOWN` it can never leave that state (a restart replaces
//! the mailbox and the behavior, not the state — the actor stays `RUNNING` across a restart).

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicU8, Ordering};

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
// (none)

/// The state of an actor handle, observable from any thread.
///
/// # Examples
/// ```rust
/// use airssys_rt::ActorState;
///
/// let state = ActorState::Created;
/// assert_eq!(state, ActorState::Created);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorState {
    /// The handle exists; a behavior factory and signal handler may still be attached, and
    /// `spawn` has not yet been called.
    Created,
    /// The actor task is alive: its behavior factory has run and its message loop is either
    /// executing or awaiting the next mailbox entry.
    Running,
    /// The actor task has exited for good. No further messages are delivered and no restart
    /// will occur.
    Shutdown,
}

impl Default for ActorState {
    fn default() -> Self {
        Self::Created
    }
}

impl ActorState {
    fn to_u8(self) -> u8 {
        match self {
            Self::Created => 0,
            Self::Running => 1,
            Self::Shutdown => 2,
        }
    }

    fn from_u8(v: u8) -> Self {
        match v {
            0 => Self::Created,
            1 => Self::Running,
            _ => Self::Shutdown,
        }
    }
}

/// Atomic backing store for [`ActorState`], shared by every clone of an actor handle.
#[derive(Debug)]
pub struct AtomicActorState {
    inner: AtomicU8,
}

impl AtomicActorState {
    /// A fresh tracker, starting in `Created`.
    pub fn new() -> Self {
        Self { inner: AtomicU8::new(ActorState::Created.to_u8()) }
    }

    /// The current state.
    pub fn get(&self) -> ActorState {
        ActorState::from_u8(self.inner.load(Ordering::SeqCst))
    }

    /// Unconditionally move to `Running`.
    pub fn set_running(&self) {
        self.inner.store(ActorState::Running.to_u8(), Ordering::SeqCst);
    }

    /// Unconditionally move to `Shutdown`. Idempotent.
    pub fn set_shutdown(&self) {
        self.inner.store(ActorState::Shutdown.to_u8(), Ordering::SeqCst);
    }

    /// Atomically move `Created` -> `Running`, returning `true` if this call performed the
    /// transition (used by `spawn` to detect a double-spawn, §4.1 invariant 2).
    pub fn try_start(&self) -> bool {
        self.inner
            .compare_exchange(
                ActorState::Created.to_u8(),
                ActorState::Running.to_u8(),
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_ok()
    }

    pub fn is_created(&self) -> bool {
        self.get() == ActorState::Created
    }

    pub fn is_running(&self) -> bool {
        self.get() == ActorState::Running
    }

    pub fn is_shutdown(&self) -> bool {
        self.get() == ActorState::Shutdown
    }
}

impl Default for AtomicActorState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn starts_created() {
        let s = AtomicActorState::new();
        assert_eq!(s.get(), ActorState::Created);
        assert!(s.is_created());
    }

    #[test]
    fn try_start_succeeds_once() {
        let s = AtomicActorState::new();
        assert!(s.try_start());
        assert!(s.is_running());
        assert!(!s.try_start(), "a second spawn must not succeed");
    }

    #[test]
    fn shutdown_is_terminal_and_idempotent() {
        let s = AtomicActorState::new();
        s.set_running();
        s.set_shutdown();
        assert!(s.is_shutdown());
        s.set_shutdown();
        assert!(s.is_shutdown());
    }

    #[test]
    fn restart_keeps_state_running_not_created() {
        let s = AtomicActorState::new();
        assert!(s.try_start());
        // A restart re-enters Running directly; it never passes back through Created.
        s.set_running();
        assert!(s.is_running());
    }
}
