//! `Actor<B>` — the cloneable handle through which a behavior of type `B` is addressed,
//! configured, and spawned (§4.1).

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::ThreadId;

// Layer 2: Third-party crate imports
use parking_lot::Mutex;

// Layer 3: Internal module imports
use crate::actor::lifecycle::{ActorState, AtomicActorState};
use crate::context::ActorContext;
use crate::error::{ActorError, IllegalStateKind};
use crate::mailbox::{Mailbox, MailboxSender, MessageClosure};
use crate::signal::Signal;
use crate::util::ActorId;

/// Synchronously produces a behavior instance. Called once on first spawn and again on every
/// restart, so it is a `Fn`, not a `FnOnce` — it must not assume it only ever runs once. May
/// panic; a panicking factory is the actor's first failure (§4.3).
pub type BehaviorFactory<B> = Box<dyn Fn(ActorContext<B>) -> B + Send + Sync>;

/// Reacts to a [`Signal`] delivered after the mailbox has been closed. Re-invoked on every
/// restart, so it must not assume anything about which behavior instance it is passed.
pub type SignalHandler<B> = Box<
    dyn for<'a> Fn(&'a mut B, Signal, crate::context::HandlerContext<B>) -> futures::future::BoxFuture<'a, ()>
        + Send
        + Sync,
>;

/// Wrap a synchronous or asynchronous reaction as a [`SignalHandler`], the same convenience
/// [`crate::mailbox::closure`] provides for message closures.
///
/// # Examples
/// ```rust
/// use airssys_rt::actor::signal_handler;
/// use airssys_rt::signal::Signal;
///
/// struct Counter(u64);
/// let handler = signal_handler(|_b: &mut Counter, signal: Signal, _ctx| {
///     let _ = signal.is_panic();
///     async {}
/// });
/// ```
pub fn signal_handler<B, F, Fut>(f: F) -> SignalHandler<B>
where
    B: 'static,
    F: for<'a> Fn(&'a mut B, Signal, crate::context::HandlerContext<B>) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    Box::new(move |b: &mut B, signal: Signal, ctx: crate::context::HandlerContext<B>| {
        Box::pin(f(b, signal, ctx)) as futures::future::BoxFuture<'_, ()>
    })
}

/// Type-erased supervision edge from a parent to one of its children.
///
/// Different actors may carry different behavior types, so a parent cannot hold a
/// `Vec<Actor<ChildB>>` for a single `ChildB` — it holds `Arc<dyn ChildLink>` instead (§4.6).
pub(crate) trait ChildLink: Send + Sync {
    fn request_shutdown(&self);
    fn state(&self) -> ActorState;
}

struct ActorInner<B> {
    id: ActorId,
    name: String,
    state: AtomicActorState,
    generation: AtomicU64,
    creating_thread: ThreadId,
    factory: Mutex<Option<Arc<BehaviorFactory<B>>>>,
    signal_handler: Mutex<Option<Arc<SignalHandler<B>>>>,
    mailbox_tx: Mutex<Option<MailboxSender<B>>>,
    children: Mutex<Vec<Arc<dyn ChildLink>>>,
    /// Set by [`crate::context::ActorContext::shutdown`]; checked by the task loop once the
    /// closure that set it returns, so the loop exits without taking another closure off the
    /// mailbox even if more are already queued (§4.3, §4.5).
    shutdown_requested: AtomicBool,
}

/// A cloneable reference to one actor.
///
/// Holding an `Actor<B>` lets you configure it (while `Created`), address it (`offer`), and
/// inspect its state from any thread. It carries no capability to act *as* the actor — that
/// comes only from the [`crate::context::ActorContext`] passed to the behavior factory and
/// message closures.
pub struct Actor<B: 'static> {
    inner: Arc<ActorInner<B>>,
}

impl<B> Clone for Actor<B> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<B: Send + 'static> Actor<B> {
    /// Create a new, unconfigured actor handle in `Created` state.
    ///
    /// # Examples
    /// ```rust
    /// use airssys_rt::Actor;
    ///
    /// struct Greeter;
    /// let actor = Actor::<Greeter>::of("greeter");
    /// assert_eq!(actor.name(), "greeter");
    /// ```
    pub fn of(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ActorInner {
                id: ActorId::new(),
                name: name.into(),
                state: AtomicActorState::new(),
                generation: AtomicU64::new(0),
                creating_thread: std::thread::current().id(),
                factory: Mutex::new(None),
                signal_handler: Mutex::new(None),
                mailbox_tx: Mutex::new(None),
                children: Mutex::new(Vec::new()),
                shutdown_requested: AtomicBool::new(false),
            }),
        }
    }

    /// Attach the behavior factory. Must be called while `Created`, from the thread that
    /// created the handle (§4.1 invariant 1).
    pub fn behavior<F>(self, factory: F) -> Result<Self, ActorError>
    where
        F: Fn(ActorContext<B>) -> B + Send + Sync + 'static,
    {
        self.check_creating_thread()?;
        self.check_created()?;
        *self.inner.factory.lock() = Some(Arc::new(Box::new(factory)));
        Ok(self)
    }

    /// Attach the signal handler. Same confinement rules as [`Actor::behavior`].
    pub fn on_signal<F>(self, handler: F) -> Result<Self, ActorError>
    where
        F: for<'a> Fn(&'a mut B, Signal, crate::context::HandlerContext<B>) -> futures::future::BoxFuture<'a, ()>
            + Send
            + Sync
            + 'static,
    {
        self.check_creating_thread()?;
        self.check_created()?;
        *self.inner.signal_handler.lock() = Some(Arc::new(Box::new(handler)));
        Ok(self)
    }

    pub fn id(&self) -> ActorId {
        self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn state(&self) -> ActorState {
        self.inner.state.get()
    }

    pub(crate) fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }

    pub(crate) fn bump_generation(&self) -> u64 {
        self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Enqueue a closure for this actor without blocking. Dropped silently if the actor has
    /// no mailbox yet, or has already shut down (§4.2 invariant 3).
    pub fn offer(&self, msg: MessageClosure<B>) {
        if let Some(tx) = self.inner.mailbox_tx.lock().as_ref() {
            tx.offer(msg);
        }
    }

    pub(crate) fn factory(&self) -> Option<Arc<BehaviorFactory<B>>> {
        self.inner.factory.lock().clone()
    }

    pub(crate) fn has_factory(&self) -> bool {
        self.inner.factory.lock().is_some()
    }

    pub(crate) fn signal_handler(&self) -> Option<Arc<SignalHandler<B>>> {
        self.inner.signal_handler.lock().clone()
    }

    /// Install a fresh mailbox, replacing any previous sender, and return the receiving half
    /// for the task loop to own. Used both on first spawn and on every restart.
    pub(crate) fn install_mailbox(&self) -> Mailbox<B> {
        let (tx, rx) = Mailbox::channel();
        *self.inner.mailbox_tx.lock() = Some(tx);
        rx
    }

    pub(crate) fn try_start(&self) -> bool {
        self.inner.state.try_start()
    }

    pub(crate) fn set_running(&self) {
        self.inner.state.set_running();
    }

    pub(crate) fn mark_shutdown(&self) {
        self.inner.state.set_shutdown();
        self.close_mailbox();
        let children: Vec<_> = self.inner.children.lock().clone();
        for child in children {
            child.request_shutdown();
        }
    }

    pub(crate) fn add_child(&self, child: Arc<dyn ChildLink>) {
        self.inner.children.lock().push(child);
    }

    /// Record that [`crate::context::ActorContext::shutdown`] was called. The mailbox itself is
    /// left open — a post made by the same closure, before or after this call, is still
    /// enqueued (§5 Ordering guarantees) — but the task loop will not take another closure off
    /// it once the current one returns.
    pub(crate) fn request_shutdown_after_current(&self) {
        self.inner.shutdown_requested.store(true, Ordering::SeqCst);
    }

    pub(crate) fn is_shutdown_requested(&self) -> bool {
        self.inner.shutdown_requested.load(Ordering::SeqCst)
    }

    /// Clear the flag at the start of every generation (first spawn and every restart) so a
    /// shutdown requested by a prior, discarded behavior instance cannot leak into the next one.
    pub(crate) fn clear_shutdown_requested(&self) {
        self.inner.shutdown_requested.store(false, Ordering::SeqCst);
    }

    /// Drop the current mailbox sender. Once the task loop drains what is already queued, its
    /// next `take` observes the channel as closed and enters supervision with a
    /// [`Signal::Shutdown`]. Idempotent.
    pub(crate) fn close_mailbox(&self) {
        self.inner.mailbox_tx.lock().take();
    }

    fn check_creating_thread(&self) -> Result<(), ActorError> {
        if std::thread::current().id() == self.inner.creating_thread {
            Ok(())
        } else {
            Err(ActorError::illegal_state(self.inner.id, IllegalStateKind::WrongCreatingThread))
        }
    }

    fn check_created(&self) -> Result<(), ActorError> {
        if self.inner.state.is_created() {
            Ok(())
        } else {
            Err(ActorError::illegal_state(self.inner.id, IllegalStateKind::NotCreated))
        }
    }
}

impl<B: Send + 'static> ChildLink for Actor<B> {
    fn request_shutdown(&self) {
        self.close_mailbox();
    }

    fn state(&self) -> ActorState {
        Actor::state(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    struct Empty;

    #[test]
    fn fresh_handle_is_created_with_no_factory() {
        let actor = Actor::<Empty>::of("x");
        assert_eq!(actor.state(), ActorState::Created);
        assert!(!actor.has_factory());
    }

    #[test]
    fn attaching_factory_twice_is_fine_until_spawned() {
        let actor = Actor::<Empty>::of("x").behavior(|_ctx| Empty).unwrap();
        assert!(actor.has_factory());
        let actor = actor.behavior(|_ctx| Empty).unwrap();
        assert!(actor.has_factory());
    }

    #[test]
    fn attaching_factory_after_spawn_is_rejected() {
        let actor = Actor::<Empty>::of("x");
        assert!(actor.try_start());
        let err = actor.behavior(|_ctx| Empty).unwrap_err();
        assert_eq!(err.kind(), &IllegalStateKind::NotCreated);
    }

    #[test]
    fn offer_before_mailbox_exists_is_silently_dropped() {
        let actor = Actor::<Empty>::of("x");
        actor.offer(crate::mailbox::closure(|_b: &mut Empty| async {}));
    }

    #[test]
    fn mark_shutdown_closes_children_mailboxes() {
        let parent = Actor::<Empty>::of("parent");
        let child = Actor::<Empty>::of("child");
        let mut child_rx = child.install_mailbox();
        parent.add_child(Arc::new(child.clone()));

        parent.mark_shutdown();
        assert_eq!(parent.state(), ActorState::Shutdown);

        // The cascade closed the child's mailbox; its next `take` observes the channel closed.
        let observed_close = tokio_test::block_on(child_rx.take());
        assert!(observed_close.is_none());
    }
}
