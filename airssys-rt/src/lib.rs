//! # airssys-rt — a closures-as-messages actor runtime
//!
//! Actors are not objects that implement a `handle_message` trait method; a message *is* a
//! closure, and handling one means applying it to the actor's `&mut Behavior`. There is no
//! typed message enum, no broker, and no generic `MessageBroker<M>` parameter threaded through
//! every context — an actor's mailbox holds closures, and anything that can build a closure
//! can send that actor anything.
//!
//! # Quick Start
//!
//! ```rust
//! use airssys_rt::context::ActorContext;
//! use airssys_rt::mailbox::closure;
//! use airssys_rt::{runtime::run, Actor};
//!
//! struct Counter {
//!     ctx: ActorContext<Counter>,
//!     value: u64,
//! }
//!
//! # tokio_test::block_on(async {
//! run(|start_ctx| {
//!     let counter = Actor::<Counter>::of("counter")
//!         .behavior(|ctx| Counter { ctx, value: 0 })
//!         .unwrap();
//!     let counter = start_ctx.spawn(counter).unwrap();
//!
//!     counter.offer(closure(|b: &mut Counter| {
//!         b.value += 1;
//!         async {}
//!     }));
//!     counter.offer(closure(|b: &mut Counter| {
//!         b.ctx.shutdown().unwrap();
//!         async {}
//!     }));
//! })
//! .await
//! .unwrap();
//! # });
//! ```
//!
//! # Core model
//!
//! - **Actors** ([`actor`]) run one at a time per task, own their behavior exclusively, and
//!   are addressed through a cloneable [`Actor<B>`] handle that moves through a strict
//!   `Created` → `Running` → `Shutdown` state machine.
//! - **Mailboxes** ([`mailbox`]) hold [`mailbox::MessageClosure<B>`] values: deferred,
//!   possibly-async reactions against `&mut B`. `offer` never blocks; delivery is
//!   best-effort — a closure aimed at a closed mailbox is silently dropped.
//! - **Contexts** ([`context`]) are the only capability surface. A [`context::StartContext`]
//!   is handed to the closure passed to [`runtime::run`]; a [`context::ActorContext`] is
//!   handed to a behavior factory and, typically, stored inside the behavior so message
//!   closures can use it too; a [`context::HandlerContext`] is handed to a signal handler for
//!   the duration of one call. Each is confined to the task it was created for and rejects use
//!   from anywhere else with `ActorError::IllegalState`.
//! - **Supervision** ([`signal`]) is a closed two-member set: a panicking message closure or
//!   behavior factory produces [`signal::Signal::Panic`]; an explicit or cascaded shutdown
//!   request produces [`signal::Signal::Shutdown`]. A signal handler may call
//!   [`context::HandlerContext::restart`] to get a fresh mailbox and a freshly-built behavior,
//!   or do nothing and let the actor terminate.
//! - **`run`** ([`runtime`]) brings up an actor program's roots and blocks until every actor it
//!   transitively spawns has shut down — there is no fixed timeout.
//!
//! # Module organization
//!
//! - [`actor`] — the `Actor<B>` handle and its task loop
//! - [`context`] — `StartContext`, `ActorContext`, `HandlerContext`
//! - [`signal`] — `Signal`, `PanicInfo`, `ExceptionKind`
//! - [`mailbox`] — `Mailbox<B>`, `MessageClosure<B>`
//! - [`runtime`] — `run`, and process-wide configuration hooks
//! - [`error`] — `ActorError`, the synchronous misuse taxonomy
//! - [`util`] — `ActorId`

pub mod actor;
pub mod context;
pub mod error;
pub mod mailbox;
pub mod runtime;
pub mod signal;
pub mod util;

pub mod prelude;

pub use actor::{Actor, ActorState};
pub use error::{ActorError, IllegalStateKind};
pub use signal::{ExceptionKind, PanicInfo, Signal};
