//! Mailbox throughput and spawn latency benchmarks (§10.4).
//!
//! Grounded in the teacher's `message_benchmarks.rs` / `actor_benchmarks.rs` shape: one
//! `tokio::runtime::Runtime` shared across a benchmark group, `b.to_async(&rt).iter(..)`, and
//! `black_box` on anything the optimizer could otherwise see through.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

// Layer 1: Standard library imports
use std::hint::black_box;

// Layer 2: Third-party crate imports
use criterion::{criterion_group, criterion_main, Criterion};

// Layer 3: Internal module imports
use airssys_rt::mailbox::{closure, Mailbox};
use airssys_rt::prelude::*;

struct Counter(u64);

/// Baseline cost of one offer/take/apply cycle against an otherwise idle mailbox.
fn mailbox_offer_take(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("mailbox_offer_take", |b| {
        b.to_async(&rt).iter(|| async {
            let (tx, mut mailbox) = Mailbox::<Counter>::channel();
            let mut state = Counter(0);
            tx.offer(closure(|b: &mut Counter| {
                b.0 += 1;
                async {}
            }));
            let msg = mailbox.take().await.unwrap();
            msg(&mut state).await;
            black_box(state.0);
        });
    });
}

/// Sustained throughput of many closures posted to one mailbox before it is drained.
fn mailbox_sustained_throughput(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("mailbox_sustained_throughput_1000", |b| {
        b.to_async(&rt).iter(|| async {
            let (tx, mut mailbox) = Mailbox::<Counter>::channel();
            for _ in 0..1000 {
                tx.offer(closure(|b: &mut Counter| {
                    b.0 += 1;
                    async {}
                }));
            }
            drop(tx);

            let mut state = Counter(0);
            while let Some(msg) = mailbox.take().await {
                msg(&mut state).await;
            }
            black_box(state.0);
        });
    });
}

/// End-to-end spawn latency: bringing up one actor and waiting for `run` to observe its
/// shutdown, via the public `run`/`spawn`/`offer` API rather than the internal task loop.
fn actor_spawn_and_shutdown(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("actor_spawn_and_shutdown", |b| {
        b.to_async(&rt).iter(|| async {
            struct Noop {
                ctx: ActorContext<Noop>,
            }

            run(|start_ctx| {
                let actor = Actor::<Noop>::of("bench").behavior(|ctx| Noop { ctx }).unwrap();
                let actor = start_ctx.spawn(actor).unwrap();
                actor.offer(closure(|b: &mut Noop| {
                    b.ctx.shutdown().unwrap();
                    async {}
                }));
            })
            .await
            .unwrap();
        });
    });
}

criterion_group!(benches, mailbox_offer_take, mailbox_sustained_throughput, actor_spawn_and_shutdown);
criterion_main!(benches);
