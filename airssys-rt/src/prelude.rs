//! Convenient imports for building an actor program.
//!
//! ```rust
//! use airssys_rt::prelude::*;
//! ```

pub use crate::actor::{signal_handler, Actor, ActorState};
pub use crate::context::{ActorContext, HandlerContext, StartContext};
pub use crate::error::{ActorError, IllegalStateKind};
pub use crate::mailbox::{closure, Mailbox, MessageClosure};
pub use crate::runtime::run;
pub use crate::signal::{ExceptionKind, PanicInfo, Signal};
pub use crate::util::ActorId;
