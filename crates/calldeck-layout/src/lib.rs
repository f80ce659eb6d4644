#![forbid(unsafe_code)]

//! Layout solvers for the dialog body.
//!
//! Three pure pieces, each a function of its inputs only:
//!
//! - [`arrangement`]: panel count → column count, column assignment, and the
//!   default transcript width share.
//! - [`splitter`]: the user's optional override of that share, clamped so
//!   neither the transcript nor the insight region drops below its minimum.
//! - [`regions`]: concrete rectangles for the transcript, splitter handle,
//!   columns, panels, and per-panel resize handles, plus hit testing.

pub mod arrangement;
pub mod regions;
pub mod splitter;

pub use arrangement::{LayoutArrangement, arrange, compute_arrangement};
pub use calldeck_core::geometry::{Point, Rect, Size};
pub use regions::{PanelBox, PanelRegion, RegionConfig, RegionHit, RegionMap, resolve_regions};
pub use splitter::{SplitterBounds, SplitterState};
