//! Supervision signals delivered to an actor's signal handler.
//!
//! The signal set is closed (§3 Signals): a message closure that panics produces a
//! [`Signal::Panic`], an explicit `HandlerContext::signal(actor, Signal::Shutdown)` call or a
//! dying parent produces a [`Signal::Shutdown`]. Nothing else reaches a signal handler.

// Layer 1: Standard library imports
use std::any::Any;
use std::fmt;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
// (none)

/// Distinguishes an ordinary panic from a self-interrupt (§5 Cancellation, §8 S4).
///
/// Both are delivered through the same [`Signal::Panic`] variant; `ExceptionKind` lets a
/// handler tell them apart without inspecting the panic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionKind {
    /// An ordinary panic escaped a message closure or the behavior factory.
    Panic,
    /// The closure called [`crate::ActorContext::interrupt_self`] before unwinding.
    Interrupted,
}

/// Marker panic payload used by [`crate::ActorContext::interrupt_self`].
///
/// Carrying a dedicated, privately-typed payload lets the supervision path recognize a
/// self-interrupt by downcasting the `catch_unwind` payload, rather than by string-matching a
/// panic message.
pub(crate) struct Interrupt;

/// A captured failure, preserving the original panic payload for callers that want to
/// downcast it, plus a best-effort human-readable message.
///
/// # Examples
///
/// ```rust
/// use airssys_rt::signal::{ExceptionKind, PanicInfo};
///
/// let info = PanicInfo::from_panic_payload(Box::new("boom".to_string()));
/// assert_eq!(info.kind(), ExceptionKind::Panic);
/// assert_eq!(info.message(), "boom");
/// ```
pub struct PanicInfo {
    message: String,
    kind: ExceptionKind,
    payload: Box<dyn Any + Send + 'static>,
}

impl PanicInfo {
    /// Wrap a `std::panic::catch_unwind` payload as an ordinary panic.
    pub(crate) fn from_panic_payload(payload: Box<dyn Any + Send + 'static>) -> Self {
        Self {
            message: describe_payload(&payload),
            kind: ExceptionKind::Panic,
            payload,
        }
    }

    /// Wrap a `catch_unwind` payload known to carry an [`Interrupt`] marker.
    pub(crate) fn interrupted() -> Self {
        Self {
            message: "actor task interrupted".to_string(),
            kind: ExceptionKind::Interrupted,
            payload: Box::new(Interrupt),
        }
    }

    /// The exception kind: a plain panic, or a self-interrupt.
    pub fn kind(&self) -> ExceptionKind {
        self.kind
    }

    /// A best-effort message extracted from the panic payload.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Attempt to recover the original panic payload as a concrete type.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }
}

impl fmt::Debug for PanicInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanicInfo")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

fn describe_payload(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// A supervision signal delivered to an actor's signal handler (§3 Signals).
#[derive(Debug)]
pub enum Signal {
    /// A message closure, or the behavior factory, panicked.
    Panic(PanicInfo),
    /// Explicit termination request, either self-initiated or sent by a peer's handler.
    Shutdown,
}

impl Signal {
    /// `true` if this is a [`Signal::Panic`].
    pub fn is_panic(&self) -> bool {
        matches!(self, Signal::Panic(_))
    }

    /// `true` if this is a [`Signal::Shutdown`].
    pub fn is_shutdown(&self) -> bool {
        matches!(self, Signal::Shutdown)
    }
}
