//! `ActorContext<B>` — the capability an actor task holds for the whole of its life (§3, §4.3).

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::actor::handle::Actor;
use crate::context::token::{self, TaskToken};
use crate::error::{ActorError, IllegalStateKind};
use crate::mailbox::MessageClosure;
use crate::runtime::Quiescence;
use crate::signal::Interrupt;

/// Held by a behavior factory and by every message closure for the lifetime of the actor
/// task that owns it — from the factory call until the actor reaches `Shutdown`.
///
/// A copy of this context kept alive past that point (stashed in a static, sent to another
/// actor, captured by a detached task) fails its confinement check the moment it is used from
/// outside the task it was bound to, or after that actor has restarted or shut down.
pub struct ActorContext<B: 'static> {
    token: TaskToken,
    generation: u64,
    actor: Actor<B>,
    quiescence: Arc<Quiescence>,
}

impl<B: Send + 'static> ActorContext<B> {
    pub(crate) fn new(token: TaskToken, generation: u64, actor: Actor<B>, quiescence: Arc<Quiescence>) -> Self {
        Self { token, generation, actor, quiescence }
    }

    fn confine(&self) -> Result<(), ActorError> {
        if token::confined_to(self.token) && self.actor.generation() == self.generation {
            Ok(())
        } else {
            Err(ActorError::illegal_state(self.actor.id(), IllegalStateKind::StaleContext))
        }
    }

    /// The handle of the actor running this task.
    pub fn current_actor(&self) -> Result<Actor<B>, ActorError> {
        self.confine()?;
        Ok(self.actor.clone())
    }

    /// Enqueue a closure on another actor's mailbox without blocking.
    pub fn post_to<B2: Send + 'static>(&self, target: &Actor<B2>, msg: MessageClosure<B2>) -> Result<(), ActorError> {
        self.confine()?;
        target.offer(msg);
        Ok(())
    }

    /// Start a child actor's task, linking it to this actor for cascading shutdown (§4.6).
    /// `child` must already carry a behavior factory; it moves from `Created` to `Running`.
    pub fn spawn<B2: Send + 'static>(&self, child: Actor<B2>) -> Result<Actor<B2>, ActorError> {
        self.confine()?;
        let linked: Arc<dyn crate::actor::handle::ChildLink> = Arc::new(child.clone());
        self.actor.add_child(linked);
        crate::actor::task::spawn(child.clone(), Arc::clone(&self.quiescence))?;
        Ok(child)
    }

    /// Request this actor's own termination. The currently executing closure runs to
    /// completion; once it returns, the task loop exits without taking another closure off the
    /// mailbox, even if more are already queued — the mailbox is only closed (and the signal
    /// handler, if any, never sees this as a panic or a peer-delivered signal) at that point
    /// (§4.1, §4.3, §4.5).
    pub fn shutdown(&self) -> Result<(), ActorError> {
        self.confine()?;
        self.actor.request_shutdown_after_current();
        Ok(())
    }

    /// Unwind out of the current message closure as an interrupt rather than an ordinary
    /// panic (§5 Cancellation, §8 S4). The signal handler sees
    /// [`crate::signal::ExceptionKind::Interrupted`] instead of
    /// [`crate::signal::ExceptionKind::Panic`].
    pub fn interrupt_self(&self) -> Result<(), ActorError> {
        self.confine()?;
        std::panic::panic_any(Interrupt)
    }
}
