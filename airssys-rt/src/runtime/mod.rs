//! The program's single entry point: `run` brings up a set of root actors and waits for every
//! actor it transitively spawns to reach `Shutdown` (§4.7 Quiescence, §6 External Interfaces).

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicUsize, Ordering};

// Layer 2: Third-party crate imports
use tokio::sync::Notify;
use tracing::info;

// Layer 3: Internal module imports
use crate::context::{token, StartContext};
use crate::error::{ActorError, IllegalStateKind};
use crate::util::ActorId;

pub mod config;

/// Tracks how many actors are currently alive across a `run` call (initial root actors plus
/// everything transitively spawned from them), so `run` can await true quiescence instead of
/// a fixed timeout or a single generation of actors.
pub(crate) struct Quiescence {
    count: AtomicUsize,
    notify: Notify,
}

impl Quiescence {
    fn new() -> Self {
        Self { count: AtomicUsize::new(0), notify: Notify::new() }
    }

    pub(crate) fn enter(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn exit(&self) {
        if self.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.notify.notify_waiters();
        }
    }

    async fn wait_until_empty(&self) {
        loop {
            let notified = self.notify.notified();
            if self.count.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// Bring up a program's root actors and run until every actor — the ones `startup` spawns
/// directly, and everything they transitively spawn — has reached `Shutdown`. There is no
/// timeout: a program whose actors never quiesce runs `run` forever (§4.7).
///
/// Calling `run` from inside an actor task (directly, or by calling it again from within
/// `startup` itself) is rejected as [`IllegalStateKind::NestedRun`] rather than deadlocking.
///
/// This takes only a startup closure, not a separate list of root actors: every root actor is
/// still validated and spawned exactly as §4.7 describes (non-`Created` or factory-less actors
/// are rejected with [`IllegalStateKind`]), but through `start_ctx.spawn(actor)` calls the
/// closure makes rather than a `Vec<Actor<_>>` parameter. A single entry point for "spawn a
/// root actor" — the same [`StartContext::spawn`] an actor's own [`ActorContext::spawn`] mirrors
/// for children — was chosen over two ways to register the same kind of actor.
///
/// [`ActorContext::spawn`]: crate::context::ActorContext::spawn
///

/// # Examples
/// ```rust
/// use airssys_rt::{runtime::run, Actor};
/// use airssys_rt::context::ActorContext;
/// use airssys_rt::mailbox::closure;
///
/// struct Greeter {
///     ctx: ActorContext<Greeter>,
/// }
///
/// # tokio_test::block_on(async {
/// run(|start_ctx| {
///     let actor = Actor::<Greeter>::of("greeter")
///         .behavior(|ctx| Greeter { ctx })
///         .unwrap();
///     let actor = start_ctx.spawn(actor).unwrap();
///     // Greet once, then shut down: run() will not return until this happens.
///     actor.offer(closure(|b: &mut Greeter| {
///         b.ctx.shutdown().unwrap();
///         async {}
///     }));
/// })
/// .await
/// .unwrap();
/// # });
/// ```
pub async fn run<F>(startup: F) -> Result<(), ActorError>
where
    F: FnOnce(StartContext) + Send + 'static,
{
    if token::is_inside_any_task() {
        return Err(ActorError::illegal_state(ActorId::new(), IllegalStateKind::NestedRun));
    }

    let quiescence = std::sync::Arc::new(Quiescence::new());
    let task_token = token::TaskToken::new();
    let (ctx, live) = StartContext::new(task_token, std::sync::Arc::clone(&quiescence));

    token::scoped(task_token, async {
        startup(ctx);
    })
    .await;
    live.store(false, Ordering::SeqCst);

    info!("startup closure returned, awaiting quiescence");
    quiescence.wait_until_empty().await;
    info!("all actors shut down, run() returning");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::actor::handle::Actor;
    use crate::context::ActorContext;
    use crate::mailbox::closure;

    struct Greeter {
        ctx: ActorContext<Greeter>,
    }

    #[tokio::test]
    async fn run_waits_for_the_actor_it_spawns_to_shut_down() {
        run(|start_ctx| {
            let actor = Actor::<Greeter>::of("greeter").behavior(|ctx| Greeter { ctx }).unwrap();
            let actor = start_ctx.spawn(actor).unwrap();
            actor.offer(closure(|b: &mut Greeter| {
                b.ctx.shutdown().unwrap();
                async {}
            }));
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn run_rejects_being_called_from_inside_an_actor_task() {
        run(|start_ctx| {
            let actor = Actor::<Greeter>::of("nested").behavior(|ctx| Greeter { ctx }).unwrap();
            let actor = start_ctx.spawn(actor).unwrap();
            actor.offer(closure(|b: &mut Greeter| {
                let outcome = futures::executor::block_on(run(|_inner| {}));
                assert!(matches!(outcome.unwrap_err().kind(), IllegalStateKind::NestedRun));
                b.ctx.shutdown().unwrap();
                async {}
            }));
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn quiescence_resolves_immediately_when_nothing_was_spawned() {
        let q = Quiescence::new();
        q.wait_until_empty().await;
    }
}
