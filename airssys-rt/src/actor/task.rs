//! The per-actor task loop: behavior creation, mailbox dequeue, panic capture, and the handoff
//! into supervision (§5 Scheduling & Supervision).
//!
//! Grounded in kameo's `spawn.rs` pattern of wrapping each polled future in
//! `AssertUnwindSafe(..).catch_unwind()` so a panicking message never unwinds the whole tokio
//! worker thread, only the one task.

// Layer 1: Standard library imports
use std::panic::AssertUnwindSafe;
use std::sync::atomic::Ordering;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use futures::FutureExt;
use tracing::{error, trace};

// Layer 3: Internal module imports
use crate::actor::handle::Actor;
use crate::context::{token, ActorContext, HandlerContext};
use crate::error::{ActorError, IllegalStateKind};
use crate::mailbox::Mailbox;
use crate::runtime::{self, Quiescence};
use crate::signal::{Interrupt, PanicInfo, Signal};

/// Start an actor's task: validate it has a factory and is `Created`, flip it to `Running`,
/// and hand it to the scheduler as an ordinary `tokio::spawn`ed task (§4.1, §5).
///
/// The mailbox is created and installed here, synchronously, before the task is even
/// scheduled — not inside the task once it first gets polled. A caller that calls `offer` (or
/// `post_to`) right after `spawn` returns must reach a mailbox that already exists; installing
/// it later, inside the spawned task, would race that first post against the task's own
/// start-up and could drop it silently (§4.1, §4.4).
pub(crate) fn spawn<B: Send + 'static>(actor: Actor<B>, quiescence: Arc<Quiescence>) -> Result<(), ActorError> {
    if !actor.has_factory() {
        return Err(ActorError::illegal_state(actor.id(), IllegalStateKind::MissingBehaviorFactory));
    }
    if !actor.try_start() {
        return Err(ActorError::illegal_state(actor.id(), IllegalStateKind::DoubleSpawn));
    }
    let mailbox = actor.install_mailbox();
    quiescence.enter();
    tokio::spawn(run(actor, mailbox, quiescence));
    Ok(())
}

async fn run<B: Send + 'static>(actor: Actor<B>, mailbox: Mailbox<B>, quiescence: Arc<Quiescence>) {
    let task_token = token::TaskToken::new();
    token::scoped(task_token, run_inner(actor, mailbox, task_token, Arc::clone(&quiescence))).await;
    quiescence.exit();
}

async fn run_inner<B: Send + 'static>(
    actor: Actor<B>,
    mut mailbox: Mailbox<B>,
    task_token: token::TaskToken,
    quiescence: Arc<Quiescence>,
) {
    let mut first_generation = true;
    'restart: loop {
        if !first_generation {
            // The first generation's mailbox was already installed synchronously by `spawn`;
            // every generation after a restart gets a fresh one (§4.6 restart freshness).
            mailbox = actor.install_mailbox();
        }
        first_generation = false;
        actor.clear_shutdown_requested();

        let mut behavior = match create_behavior(&actor, task_token, Arc::clone(&quiescence)).await {
            Some(b) => b,
            None => {
                // Factory panicked. There is no behavior instance to hand a signal handler, so
                // there is nothing meaningful to restart; the actor terminates.
                error!(actor = %actor.id(), name = actor.name(), "behavior factory panicked, actor terminating");
                break 'restart;
            }
        };

        loop {
            let signal = match mailbox.take().await {
                // A closure's synchronous body (where `closure()`'s own idiom puts every
                // mutation of `&mut B`, per its `Fut: 'static` bound) panics before a future
                // even exists to poll, so it must be caught separately from the `.await`
                // below — catching only the await would let this kind of panic escape
                // supervision entirely and unwind the whole actor task.
                Some(msg) => match std::panic::catch_unwind(AssertUnwindSafe(|| msg(&mut behavior))) {
                    Ok(fut) => match AssertUnwindSafe(fut).catch_unwind().await {
                        Ok(()) if actor.is_shutdown_requested() => {
                            // `ActorContext::shutdown` was called by the closure that just
                            // returned. It ran to completion; now the loop must stop without
                            // taking another closure off the mailbox, even though more may
                            // already be queued — so this produces `Signal::Shutdown` directly
                            // instead of looping back to `mailbox.take()` (which would still
                            // drain and hand over whatever is sitting behind it) (§4.3, §4.5).
                            Signal::Shutdown
                        }
                        Ok(()) => continue,
                        Err(payload) => Signal::Panic(payload_to_panic_info(payload)),
                    },
                    Err(payload) => Signal::Panic(payload_to_panic_info(payload)),
                },
                None => Signal::Shutdown,
            };

            trace!(actor = %actor.id(), name = actor.name(), panic = signal.is_panic(), "actor entering supervision");
            actor.close_mailbox();

            if supervise(&actor, &mut behavior, signal, task_token).await {
                actor.bump_generation();
                continue 'restart;
            }
            break 'restart;
        }
    }
    actor.mark_shutdown();
}

async fn create_behavior<B: Send + 'static>(
    actor: &Actor<B>,
    task_token: token::TaskToken,
    quiescence: Arc<Quiescence>,
) -> Option<B> {
    let factory = actor.factory()?;
    let generation = actor.generation();
    let ctx = ActorContext::new(task_token, generation, actor.clone(), quiescence);
    match std::panic::catch_unwind(AssertUnwindSafe(|| factory(ctx))) {
        Ok(behavior) => Some(behavior),
        Err(_payload) => None,
    }
}

/// Run one signal handler call. Returns `true` if the handler requested a restart.
///
/// The handler's own panics are never fed back into this actor's supervision — they go to the
/// process-wide uncaught-exception hook instead, so a broken handler cannot loop forever.
async fn supervise<B: Send + 'static>(
    actor: &Actor<B>,
    behavior: &mut B,
    signal: Signal,
    task_token: token::TaskToken,
) -> bool {
    let Some(handler) = actor.signal_handler() else {
        trace!(actor = %actor.id(), name = actor.name(), "no signal handler installed, actor terminating");
        return false;
    };

    let (ctx, live, restart_requested) = HandlerContext::new(task_token, actor.clone());
    // Same two-stage capture as the message-closure path above: the handler's own
    // synchronous prelude can panic before its future even exists.
    let outcome = match std::panic::catch_unwind(AssertUnwindSafe(|| handler(behavior, signal, ctx))) {
        Ok(fut) => AssertUnwindSafe(fut).catch_unwind().await,
        Err(payload) => Err(payload),
    };
    live.store(false, Ordering::SeqCst);

    if let Err(payload) = outcome {
        error!(actor = %actor.id(), name = actor.name(), "signal handler panicked, escalating to uncaught-exception hook");
        runtime::config::report_uncaught_exception(payload);
        return false;
    }

    restart_requested.load(Ordering::SeqCst)
}

fn payload_to_panic_info(payload: Box<dyn std::any::Any + Send + 'static>) -> PanicInfo {
    if payload.is::<Interrupt>() {
        PanicInfo::interrupted()
    } else {
        PanicInfo::from_panic_payload(payload)
    }
}
