#![forbid(unsafe_code)]

//! Runtime plumbing for calldeck: cancelable scheduled tasks.
//!
//! # Role in calldeck
//! The dialog core is single-threaded and event-driven. Timers are its only
//! asynchronous primitive, and every timer belongs to exactly one owner.
//! [`TimerQueue`] is that owner-held schedule: the host advances it with the
//! current instant, due timers are popped one at a time, and anything
//! cancelled before it is popped never fires. Dropping the queue drops every
//! pending timer with it, so a torn-down controller cannot be called back.

pub mod timer;

pub use timer::{Fired, TimerId, TimerKind, TimerQueue};
pub use web_time::{Duration, Instant};
