#![forbid(unsafe_code)]

//! calldeck public facade crate.
//!
//! A headless core for a floating call dialog: a window that drags, resizes,
//! minimizes and maximizes; a simulated call with a live transcript feed;
//! and a bounded set of insight panels laid out into columns. The host owns
//! rendering and the clock. It feeds [`PointerEvent`]s, [`DialogAction`]s and
//! instants into a [`DialogShell`] and renders the [`DialogView`] it returns.
//!
//! ```
//! use calldeck::prelude::*;
//!
//! let props = HostProps { open: true, initial_position: None };
//! let mut shell = DialogShell::new(DialogConfig::default(), props, || {});
//! let t0 = Instant::now();
//!
//! shell.dispatch(DialogAction::AddPanel(PanelKind::Analytics), t0);
//! shell.dispatch(DialogAction::StartCall, t0);
//! shell.tick(t0 + Duration::from_secs(2));
//!
//! let view = shell.view(t0 + Duration::from_secs(2)).unwrap();
//! assert_eq!(view.call_state, CallState::Active);
//! assert_eq!(view.body.unwrap().arrangement.column_count, 1);
//! ```

pub mod call;
pub mod config;
pub mod error;
pub mod insight;
pub mod mock;
pub mod panels;
pub mod shell;
pub mod transcript;
pub mod view;
pub mod window;

// --- Core re-exports -------------------------------------------------------

pub use calldeck_core::event::{PointerButton, PointerEvent, PointerEventKind};
pub use calldeck_core::geometry::{
    DragAnchor, Point, Rect, Size, clamp_size, drag_position, resize_size,
};
pub use calldeck_core::gesture::{ActiveGesture, GestureSlot};

// --- Layout re-exports -----------------------------------------------------

pub use calldeck_layout::{
    LayoutArrangement, RegionHit, RegionMap, SplitterBounds, SplitterState, compute_arrangement,
};

// --- Runtime re-exports ----------------------------------------------------

pub use calldeck_runtime::{Duration, Instant, TimerId, TimerQueue};

// --- Dialog ----------------------------------------------------------------

pub use call::{CallController, CallEvent, CallState, ControlState};
pub use config::{CallConfig, DialogConfig, PanelConfig, SplitterConfig, WindowConfig};
pub use error::{CloseOutcome, CloseRejection, ConfigError};
pub use insight::{InsightData, PanelKind, Participant, Sentiment, TimelineEvent};
pub use mock::{CannedData, MockData};
pub use panels::{InsightPanel, PanelCollection, PanelId};
pub use shell::{DialogAction, DialogShell, GestureKind, HostProps, PointerOutcome};
pub use transcript::{EntryDraft, EntryId, Transcript, TranscriptionEntry};
pub use view::{BodyView, DialogView, QuickStats};
pub use window::{WindowController, WindowMode};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CallState, CloseOutcome, DialogAction, DialogConfig, DialogShell, DialogView, Duration,
        HostProps, Instant, PanelId, PanelKind, Point, PointerEvent, PointerOutcome, Rect, Size,
        WindowMode,
    };
}
