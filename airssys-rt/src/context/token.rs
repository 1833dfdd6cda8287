//! Task-identity confinement for capability objects (§3 Contexts, §4.6).
//!
//! Every `StartContext`, `ActorContext`, and `HandlerContext` is stamped with the identity of
//! the `tokio` task it was created for. `tokio::task_local!` (rather than `thread_local!`) is
//! the right primitive here: a task can be polled from a different worker thread after every
//! `.await`, so thread identity would reject perfectly legitimate use and accept a context
//! smuggled onto another thread that happens to be running the same task.

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicU64, Ordering};

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
// (none)

tokio::task_local! {
    static CURRENT_TASK: TaskToken;
}

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of a running actor task or the task executing `run(..)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TaskToken(u64);

impl TaskToken {
    /// Mint a fresh token, distinct from every token minted before it.
    pub(crate) fn new() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

/// Run `body` with `token` bound as this task's identity for the duration of the future.
pub(crate) async fn scoped<F: std::future::Future>(token: TaskToken, body: F) -> F::Output {
    CURRENT_TASK.scope(token, body).await
}

/// `true` if the calling task matches `token` — i.e. a context stamped with `token` is being
/// used from the task it was bound to.
pub(crate) fn confined_to(token: TaskToken) -> bool {
    CURRENT_TASK.try_with(|current| *current == token).unwrap_or(false)
}

/// `true` if the caller is running inside *any* task bound to a [`TaskToken`] — used to reject
/// nested `run(..)` calls from inside an actor task (§4.7).
pub(crate) fn is_inside_any_task() -> bool {
    CURRENT_TASK.try_with(|_| ()).is_ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn token_matches_inside_its_own_scope() {
        let token = TaskToken::new();
        let matched = scoped(token, async { confined_to(token) }).await;
        assert!(matched);
    }

    #[tokio::test]
    async fn token_does_not_match_outside_any_scope() {
        let token = TaskToken::new();
        assert!(!confined_to(token));
    }

    #[tokio::test]
    async fn distinct_tokens_never_match_each_other() {
        let a = TaskToken::new();
        let b = TaskToken::new();
        let matched = scoped(a, async { confined_to(b) }).await;
        assert!(!matched);
    }

    #[tokio::test]
    async fn detects_nested_scope() {
        assert!(!is_inside_any_task());
        let token = TaskToken::new();
        let inside = scoped(token, async { is_inside_any_task() }).await;
        assert!(inside);
    }
}
