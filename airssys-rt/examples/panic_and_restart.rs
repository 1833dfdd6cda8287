//! Panic Capture and Restart
//!
//! Demonstrates the supervision path: a message closure that panics never
//! unwinds the actor's task. Instead the actor's signal handler is invoked
//! with `Signal::Panic`, and can call `HandlerContext::restart()` to replace
//! the failed behavior with a fresh one from the same factory.
//!
//! # What You'll Learn
//!
//! - **`on_signal`**: attaches the closure invoked after a panicking message
//!   closure, or after the actor's mailbox has been closed.
//! - **`HandlerContext::restart`**: discards the current behavior instance,
//!   re-invokes the factory, and installs a fresh mailbox. The actor handle
//!   itself never leaves `Running`.
//! - **Bounded retries**: nothing restarts an actor forever by default; this
//!   example restarts once and lets the second panic terminate it.
//!
//! # Run This Example
//!
//! ```bash
//! cargo run --example panic_and_restart
//! ```

#![allow(clippy::expect_used, clippy::panic)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use airssys_rt::prelude::*;

struct Summer {
    ctx: ActorContext<Summer>,
    sum: i32,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Panic Capture and Restart ===\n");

    let restarts = Arc::new(AtomicU32::new(0));
    let restarts_for_handler = Arc::clone(&restarts);

    run(move |start_ctx| {
        let summer = Actor::<Summer>::of("summer")
            .behavior(|ctx| Summer { ctx, sum: 0 })
            .expect("behavior attaches while Created")
            .on_signal(signal_handler(move |b: &mut Summer, signal, handler_ctx| {
                let restarts = Arc::clone(&restarts_for_handler);
                async move {
                    if let Signal::Panic(info) = &signal {
                        println!("  caught panic: {}", info.message());
                    }
                    if restarts.fetch_add(1, Ordering::SeqCst) == 0 {
                        println!("  restarting (sum {} is about to be discarded)", b.sum);
                        handler_ctx.restart().expect("restart from inside the handler's own call succeeds");
                    } else {
                        println!("  second failure, letting the actor terminate");
                    }
                }
            }))
            .expect("signal handler attaches while Created");
        let summer = start_ctx.spawn(summer).expect("root actors spawn from StartContext");

        println!("Step 1: accumulating, then triggering a panic");
        summer.offer(closure(|b: &mut Summer| {
            b.sum += 10;
            async {}
        }));
        summer.offer(closure(|_b: &mut Summer| async {
            panic!("simulated failure while summing");
        }));

        println!("Step 2: after restart, the behavior starts fresh");
        summer.offer(closure(|b: &mut Summer| {
            b.sum += 32;
            println!("  sum after restart: {}", b.sum);
            async {}
        }));
        summer.offer(closure(|_b: &mut Summer| async {
            panic!("second simulated failure");
        }));
    })
    .await
    .expect("run completes once the actor terminates for good");

    println!(
        "\n=== Complete: handler observed {} panic(s) ===",
        restarts.load(Ordering::SeqCst)
    );
}
