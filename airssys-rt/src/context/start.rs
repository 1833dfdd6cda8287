//! `StartContext` — the capability held by the startup closure passed to `run` (§3, §4.7).

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::actor::handle::Actor;
use crate::context::token::{self, TaskToken};
use crate::error::{ActorError, IllegalStateKind};
use crate::runtime::Quiescence;

/// Held by the closure passed to [`crate::runtime::run`] for the duration of that call. It is
/// the only way to bring the root actors of a run into existence; every other actor is spawned
/// from an already-running actor's [`crate::context::ActorContext`].
///
/// Invalidated the instant the startup closure returns — a copy squirreled away and called
/// later fails confinement just like a stale `ActorContext` (§8 S6).
pub struct StartContext {
    token: TaskToken,
    live: Arc<AtomicBool>,
    quiescence: Arc<Quiescence>,
}

impl StartContext {
    pub(crate) fn new(token: TaskToken, quiescence: Arc<Quiescence>) -> (Self, Arc<AtomicBool>) {
        let live = Arc::new(AtomicBool::new(true));
        (Self { token, live: Arc::clone(&live), quiescence }, live)
    }

    fn confine(&self, actor_for_error: &dyn Fn() -> crate::util::ActorId) -> Result<(), ActorError> {
        if self.live.load(Ordering::SeqCst) && token::confined_to(self.token) {
            Ok(())
        } else {
            Err(ActorError::illegal_state(actor_for_error(), IllegalStateKind::StaleContext))
        }
    }

    /// Start a root actor's task. `actor` must already carry a behavior factory and must be
    /// `Created`.
    pub fn spawn<B: Send + 'static>(&self, actor: Actor<B>) -> Result<Actor<B>, ActorError> {
        self.confine(&|| actor.id())?;
        crate::actor::task::spawn(actor.clone(), Arc::clone(&self.quiescence))?;
        Ok(actor)
    }
}
