//! Per-actor mailbox: an unbounded FIFO of deferred message closures (§4.2).
//!
//! A message is not a typed record; it is a closure that, when applied to the actor's
//! `&mut Behavior`, performs whatever the sender wanted done. `offer` never blocks and silently
//! drops the closure once the mailbox is closed (dead-letter semantics, §4.2 invariant 3);
//! `take` blocks until a closure is available or the mailbox is drained and closed.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use futures::future::BoxFuture;
use tokio::sync::mpsc;

// Layer 3: Internal module imports
// (none)

/// A deferred unit of work against a behavior of type `B`.
///
/// Closures are async because applying one may need to suspend on I/O before the behavior
/// is considered done reacting (§5 Scheduling).
pub type MessageClosure<B> = Box<dyn for<'a> FnOnce(&'a mut B) -> BoxFuture<'a, ()> + Send>;

/// Wrap a synchronous or asynchronous reaction as a [`MessageClosure`].
///
/// # Examples
/// ```rust
/// use airssys_rt::mailbox::closure;
///
/// struct Counter(u64);
/// let msg = closure(|b: &mut Counter| {
///     b.0 += 1;
///     async {}
/// });
/// ```
pub fn closure<B, F, Fut>(f: F) -> MessageClosure<B>
where
    B: 'static,
    F: FnOnce(&mut B) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    Box::new(move |b: &mut B| Box::pin(f(b)) as BoxFuture<'_, ()>)
}

/// The sending half of a mailbox, cloneable and cheap to hold from many actors at once.
pub struct MailboxSender<B> {
    tx: mpsc::UnboundedSender<MessageClosure<B>>,
}

impl<B> Clone for MailboxSender<B> {
    fn clone(&self) -> Self {
        Self { tx: self.tx.clone() }
    }
}

impl<B> MailboxSender<B> {
    /// Enqueue a closure without blocking. If the mailbox has been closed, the closure is
    /// dropped instead of delivered — there is no back-pressure and no error to report
    /// (§4.2 invariant 3, dead-letter semantics).
    pub fn offer(&self, msg: MessageClosure<B>) {
        let _ = self.tx.send(msg);
    }
}

/// The receiving half of a mailbox, owned by the actor's task loop.
pub struct Mailbox<B> {
    rx: mpsc::UnboundedReceiver<MessageClosure<B>>,
}

impl<B> Mailbox<B> {
    /// Create a fresh, empty, open mailbox and its sender.
    pub fn channel() -> (MailboxSender<B>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (MailboxSender { tx }, Self { rx })
    }

    /// Block until a closure is available, or return `None` once the mailbox is drained and
    /// its sender side has been dropped or explicitly closed.
    pub async fn take(&mut self) -> Option<MessageClosure<B>> {
        self.rx.recv().await
    }

    /// Close the mailbox. Idempotent: closing an already-closed mailbox is a no-op. Closures
    /// already enqueued remain available to `take` until drained; new `offer` calls are
    /// silently dropped from that point on.
    pub fn close(&mut self) {
        self.rx.close();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    struct Counter(u64);

    #[tokio::test]
    async fn delivers_closures_in_order() {
        let (tx, mut mailbox) = Mailbox::<Counter>::channel();
        tx.offer(closure(|b: &mut Counter| {
            b.0 += 1;
            async {}
        }));
        tx.offer(closure(|b: &mut Counter| {
            b.0 += 10;
            async {}
        }));

        let mut state = Counter(0);
        (mailbox.take().await.unwrap())(&mut state).await;
        (mailbox.take().await.unwrap())(&mut state).await;
        assert_eq!(state.0, 11);
    }

    #[tokio::test]
    async fn offer_after_close_is_silently_dropped() {
        let (tx, mut mailbox) = Mailbox::<Counter>::channel();
        mailbox.close();
        tx.offer(closure(|b: &mut Counter| {
            b.0 += 1;
            async {}
        }));
        assert!(mailbox.take().await.is_none());
    }

    #[tokio::test]
    async fn closing_twice_is_a_no_op() {
        let (_tx, mut mailbox) = Mailbox::<Counter>::channel();
        mailbox.close();
        mailbox.close();
        assert!(mailbox.take().await.is_none());
    }

    #[tokio::test]
    async fn take_drains_before_reporting_close() {
        let (tx, mut mailbox) = Mailbox::<Counter>::channel();
        tx.offer(closure(|b: &mut Counter| {
            b.0 += 1;
            async {}
        }));
        drop(tx);

        let mut state = Counter(0);
        let msg = mailbox.take().await.expect("pending message still delivered");
        msg(&mut state).await;
        assert_eq!(state.0, 1);
        assert!(mailbox.take().await.is_none());
    }
}
