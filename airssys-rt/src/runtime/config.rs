//! Process-wide, write-once configuration hooks (§5 Process-wide state, §6 External Interfaces,
//! §9 Open Questions, §10.3).
//!
//! These are the only pieces of global mutable state in the crate, and both are deliberately
//! narrow: an uncaught-exception sink for panics a signal handler itself raises, and an
//! optional debug-mode predicate used to flag accidental mutation of data a behavior should
//! treat as immutable. Both install exactly once; a second install attempt is a caller error,
//! not silently ignored and not silently overwritten.

// Layer 1: Standard library imports
use std::any::Any;
use std::sync::OnceLock;

// Layer 2: Third-party crate imports
use tracing::error;

// Layer 3: Internal module imports
use crate::error::{ActorError, IllegalStateKind};
use crate::util::ActorId;

type UncaughtExceptionHandler = Box<dyn Fn(Box<dyn Any + Send>) + Send + Sync>;
type DebugImmutabilityCheck = Box<dyn Fn(&dyn Any) -> bool + Send + Sync>;

static UNCAUGHT_EXCEPTION_HANDLER: OnceLock<UncaughtExceptionHandler> = OnceLock::new();
static DEBUG_MODE_CHECK: OnceLock<DebugImmutabilityCheck> = OnceLock::new();

/// Install the process-wide handler invoked when a signal handler itself panics (§5, §10.3).
/// A signal handler's panic is never fed back into the actor it was supervising — that would
/// let a broken handler loop forever — so it lands here instead. Callable exactly once.
pub fn set_uncaught_exception_handler<F>(handler: F) -> Result<(), ActorError>
where
    F: Fn(Box<dyn Any + Send>) + Send + Sync + 'static,
{
    UNCAUGHT_EXCEPTION_HANDLER
        .set(Box::new(handler))
        .map_err(|_| ActorError::illegal_state(ActorId::new(), IllegalStateKind::HookAlreadyInstalled))
}

/// Install the optional debug-mode immutability predicate (§9 Open Question). Disabled by
/// default: until this is called, [`debug_mode_check`] always returns `None` and no
/// immutability checking happens anywhere in the runtime. Callable exactly once.
pub fn set_debug_mode<F>(check: F) -> Result<(), ActorError>
where
    F: Fn(&dyn Any) -> bool + Send + Sync + 'static,
{
    DEBUG_MODE_CHECK
        .set(Box::new(check))
        .map_err(|_| ActorError::illegal_state(ActorId::new(), IllegalStateKind::HookAlreadyInstalled))
}

/// Route a signal handler's panic payload to the installed hook, or log and drop it if no
/// hook was ever installed.
pub(crate) fn report_uncaught_exception(payload: Box<dyn Any + Send>) {
    match UNCAUGHT_EXCEPTION_HANDLER.get() {
        Some(handler) => handler(payload),
        None => error!("uncaught exception from a signal handler, and no handler installed"),
    }
}

/// Run the debug-mode predicate against `value`, if one was installed. Intended for a
/// behavior's own message closures to call against data it expects not to be mutated, e.g.
/// before handing a reference out to another actor. Always `None` until [`set_debug_mode`] has
/// been called (§9 Open Question).
pub fn debug_mode_check(value: &dyn Any) -> Option<bool> {
    DEBUG_MODE_CHECK.get().map(|check| check(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    // OnceLock means these hooks can only be exercised once per process; a single combined
    // test avoids ordering flakiness against the other tests in this module.
    #[test]
    fn hook_runs_once_and_rejects_a_second_install() {
        let seen = Arc::new(AtomicBool::new(false));
        let seen_clone = Arc::clone(&seen);
        let first = set_uncaught_exception_handler(move |_payload| {
            seen_clone.store(true, Ordering::SeqCst);
        });
        // Either this test installed it, or an earlier test in the binary already did; both
        // are consistent with "write once".
        if first.is_ok() {
            report_uncaught_exception(Box::new("boom"));
            assert!(seen.load(Ordering::SeqCst));
        }
        let second = set_uncaught_exception_handler(|_payload| {});
        assert_eq!(second.unwrap_err().kind(), &IllegalStateKind::HookAlreadyInstalled);
    }
}
