//! `HandlerContext<B>` — the capability passed to a signal handler for one call (§3, §4.4).

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::actor::handle::Actor;
use crate::context::token::{self, TaskToken};
use crate::error::{ActorError, IllegalStateKind};
use crate::mailbox::MessageClosure;
use crate::signal::Signal;

/// Held by a signal handler for the duration of a single call. Stashing it anywhere and using
/// it after the handler returns fails confinement, the same as a late-used
/// [`crate::context::ActorContext`] (§8 S6).
pub struct HandlerContext<B: 'static> {
    token: TaskToken,
    live: Arc<AtomicBool>,
    actor: Actor<B>,
    restart_requested: Arc<AtomicBool>,
}

impl<B: Send + 'static> HandlerContext<B> {
    pub(crate) fn new(token: TaskToken, actor: Actor<B>) -> (Self, Arc<AtomicBool>, Arc<AtomicBool>) {
        let live = Arc::new(AtomicBool::new(true));
        let restart_requested = Arc::new(AtomicBool::new(false));
        (
            Self { token, live: Arc::clone(&live), actor, restart_requested: Arc::clone(&restart_requested) },
            live,
            restart_requested,
        )
    }

    fn confine(&self) -> Result<(), ActorError> {
        if self.live.load(Ordering::SeqCst) && token::confined_to(self.token) {
            Ok(())
        } else {
            Err(ActorError::illegal_state(self.actor.id(), IllegalStateKind::StaleContext))
        }
    }

    /// Enqueue a closure on another actor's mailbox without blocking.
    pub fn post_to<B2: Send + 'static>(&self, target: &Actor<B2>, msg: MessageClosure<B2>) -> Result<(), ActorError> {
        self.confine()?;
        target.offer(msg);
        Ok(())
    }

    /// Ask the actor task to restart: a fresh mailbox and a fresh behavior (via the same
    /// factory function, re-invoked) replace the failed instance. The actor never leaves
    /// `Running` (§4.1, §4.4).
    pub fn restart(&self) -> Result<(), ActorError> {
        self.confine()?;
        self.restart_requested.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Deliver a signal to another actor directly, outside that actor's normal panic/shutdown
    /// path (§4.6 cascading shutdown, §4.4). A [`Signal::Shutdown`] closes the target's
    /// mailbox; a [`Signal::Panic`] is re-raised as a fresh panic on the target's task so its
    /// own signal handler observes it with its own, freshly captured payload.
    #[allow(clippy::panic)]
    pub fn signal<B2: Send + 'static>(&self, target: &Actor<B2>, signal: Signal) -> Result<(), ActorError> {
        self.confine()?;
        match signal {
            Signal::Shutdown => target.close_mailbox(),
            Signal::Panic(info) => {
                let message = info.message().to_string();
                target.offer(crate::mailbox::closure(move |_b: &mut B2| {
                    let message = message;
                    async move { panic!("{message}") }
                }));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    struct Empty;

    #[tokio::test]
    async fn stale_handler_context_rejects_restart() {
        let actor = Actor::<Empty>::of("x");
        let (ctx, live, _restart) = HandlerContext::new(TaskToken::new(), actor);
        live.store(false, Ordering::SeqCst);
        let err = ctx.restart().unwrap_err();
        assert_eq!(err.kind(), &IllegalStateKind::StaleContext);
    }

    #[tokio::test]
    async fn restart_sets_the_shared_flag() {
        let actor = Actor::<Empty>::of("x");
        let token = TaskToken::new();
        let restart_requested = token::scoped(token, async {
            let (ctx, _live, restart_requested) = HandlerContext::new(token, actor);
            ctx.restart().unwrap();
            restart_requested
        })
        .await;
        assert!(restart_requested.load(Ordering::SeqCst));
    }
}
