//! Getting Started - Your First Actor
//!
//! Builds a counter actor from nothing but closures: no message enum, no
//! broker, no trait to implement. A message is a closure over `&mut Counter`,
//! and sending one is just calling `offer`.
//!
//! # What You'll Learn
//!
//! - **Behavior factories**: `Actor::of(name).behavior(|ctx| ...)` attaches the
//!   function that (re)builds a behavior instance.
//! - **Message closures**: `closure(|b: &mut Counter| async { .. })` builds a
//!   deferred reaction; `actor.offer(msg)` enqueues it without blocking.
//! - **Quiescence**: `run(..)` does not return until every actor it spawned,
//!   directly or transitively, has reached `Shutdown`.
//!
//! # Run This Example
//!
//! ```bash
//! cargo run --example getting_started
//! ```

#![allow(clippy::expect_used)]

use airssys_rt::prelude::*;

struct Counter {
    ctx: ActorContext<Counter>,
    value: i64,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Getting Started ===\n");

    run(|start_ctx| {
        println!("Step 1: spawning the counter actor");
        let counter = Actor::<Counter>::of("counter")
            .behavior(|ctx| Counter { ctx, value: 0 })
            .expect("behavior attaches while the handle is still Created");
        let counter = start_ctx.spawn(counter).expect("root actors spawn from StartContext");

        println!("Step 2: sending a few messages\n");
        counter.offer(closure(|b: &mut Counter| {
            b.value += 1;
            println!("  incremented to {}", b.value);
            async {}
        }));
        counter.offer(closure(|b: &mut Counter| {
            b.value += 10;
            println!("  incremented to {}", b.value);
            async {}
        }));
        counter.offer(closure(|b: &mut Counter| {
            println!("  final value: {}\nStep 3: shutting down", b.value);
            b.ctx.shutdown().expect("shutdown from the owning task always succeeds");
            async {}
        }));
    })
    .await
    .expect("run completes once the counter shuts down");

    println!("\n=== Getting Started Complete ===");
}
