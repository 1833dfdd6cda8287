//! Cross-Actor Signaling
//!
//! An actor's signal handler is not limited to reacting to its own behavior:
//! `HandlerContext::signal` lets it deliver a signal to a *different* actor,
//! outside that actor's normal panic or shutdown path. This example has one
//! actor shut itself down and, from its own signal handler, shut a sibling
//! down too.
//!
//! # What You'll Learn
//!
//! - **`HandlerContext::signal`**: delivers `Signal::Shutdown` (or re-raises
//!   a panic) on a target actor, regardless of what that target is doing.
//! - **Independent shutdown handlers**: each actor's `on_signal` only ever
//!   observes signals aimed at it, whatever their origin.
//! - **`run` waits for all of them**: quiescence tracks every actor spawned
//!   from the closure passed to `run`, not just the first one.
//!
//! # Run This Example
//!
//! ```bash
//! cargo run --example cross_actor_signal
//! ```

#![allow(clippy::expect_used)]

use airssys_rt::prelude::*;

struct Leader {
    ctx: ActorContext<Leader>,
}

struct Follower {
    ctx: ActorContext<Follower>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Cross-Actor Signaling ===\n");

    run(|start_ctx| {
        println!("Step 1: spawning leader and follower");
        let follower = Actor::<Follower>::of("follower")
            .behavior(|ctx| Follower { ctx })
            .expect("behavior attaches while Created")
            .on_signal(signal_handler(|_b: &mut Follower, _signal, _handler_ctx| async {
                println!("  follower's own handler ran: shutting down quietly");
            }))
            .expect("signal handler attaches while Created");
        let follower = start_ctx.spawn(follower).expect("root actors spawn from StartContext");

        let follower_for_leader = follower.clone();
        let leader = Actor::<Leader>::of("leader")
            .behavior(|ctx| Leader { ctx })
            .expect("behavior attaches while Created")
            .on_signal(signal_handler(move |_b: &mut Leader, _signal, handler_ctx| {
                let follower = follower_for_leader.clone();
                async move {
                    println!("  leader's handler ran: signaling the follower to shut down too");
                    handler_ctx
                        .signal(&follower, Signal::Shutdown)
                        .expect("peer signal delivery succeeds");
                }
            }))
            .expect("signal handler attaches while Created");
        let leader = start_ctx.spawn(leader).expect("root actors spawn from StartContext");

        println!("Step 2: leader shuts itself down\n");
        leader.offer(closure(|b: &mut Leader| {
            b.ctx.shutdown().expect("shutdown from the owning task always succeeds");
            async {}
        }));
    })
    .await
    .expect("run completes once both actors reach Shutdown");

    println!("\n=== Complete: both actors reached Shutdown ===");
}
