#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "tracing"), deny(unused_variables))]

//! Core: geometry, pointer events, and gesture primitives for calldeck.
//!
//! # Role in calldeck
//! `calldeck-core` is the input and geometry layer. It owns the value types
//! every other crate speaks in (points, sizes, rectangles), the canonical
//! pointer event, and the single-owner gesture slot the dialog shell uses to
//! route a pointer-down/move/up sequence to exactly one controller.
//!
//! # Primary responsibilities
//! - **Geometry engine**: pure, deterministic clamp/drag/resize math.
//! - **PointerEvent**: normalized pointer input from the host page.
//! - **GestureSlot**: at most one active gesture, with its origin captured
//!   as an explicit value instead of scattered mutable flags.
//!
//! # How it fits in the system
//! `calldeck-layout` resolves regions in terms of [`geometry::Rect`]; the
//! `calldeck` facade drives its controllers from [`event::PointerEvent`]s
//! through a [`gesture::GestureSlot`].

pub mod event;
pub mod geometry;
pub mod gesture;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, info_span, trace, warn};
