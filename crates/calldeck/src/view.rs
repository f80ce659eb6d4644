#![forbid(unsafe_code)]

//! Render snapshot.
//!
//! [`DialogView`] is everything a renderer needs for one frame, borrowed from
//! the shell where possible. It is rebuilt on demand and never mutated; the
//! renderer reports interactions back through
//! [`DialogShell::handle_pointer`](crate::DialogShell::handle_pointer) and
//! [`DialogShell::dispatch`](crate::DialogShell::dispatch).

use calldeck_core::geometry::Rect;
use calldeck_layout::{LayoutArrangement, RegionMap};

use crate::call::{CallState, ControlState};
use crate::insight::{InsightData, PanelKind};
use crate::panels::{InsightPanel, PanelId};
use crate::transcript::TranscriptionEntry;
use crate::window::WindowMode;

pub const TITLE_NORMAL: &str = "Call Interface";
pub const TITLE_MINIMIZED_ACTIVE: &str = "Call Active";
pub const TITLE_MINIMIZED_IDLE: &str = "Call Dialog";
pub const LIVE_BADGE: &str = "LIVE";
pub const RECORDING_LABEL: &str = "Recording";
pub const LISTENING_LABEL: &str = "Listening...";

/// Title text for a mode and call state.
#[must_use]
pub fn title_for(mode: WindowMode, call_state: CallState) -> &'static str {
    match (mode, call_state) {
        (WindowMode::Minimized, CallState::Active) => TITLE_MINIMIZED_ACTIVE,
        (WindowMode::Minimized, _) => TITLE_MINIMIZED_IDLE,
        _ => TITLE_NORMAL,
    }
}

/// Figures for the analytics panel header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickStats {
    /// `MM:SS` of active call time.
    pub duration: String,
    pub participants: usize,
}

/// One frame of the dialog.
#[derive(Debug, Clone)]
pub struct DialogView<'a> {
    pub mode: WindowMode,
    pub bounds: Rect,
    pub title: &'static str,
    pub call_state: CallState,
    /// Show the `LIVE` badge.
    pub live: bool,
    pub status: String,
    pub controls: ControlState,
    /// `None` while minimized.
    pub body: Option<BodyView<'a>>,
}

impl DialogView<'_> {
    /// Transcript header badge and trailing indicator, shown while a call is live.
    #[must_use]
    pub fn activity_labels(&self) -> Option<(&'static str, &'static str)> {
        self.live.then_some((RECORDING_LABEL, LISTENING_LABEL))
    }
}

/// Transcript and insight region contents.
#[derive(Debug, Clone)]
pub struct BodyView<'a> {
    pub arrangement: LayoutArrangement<PanelId>,
    pub regions: RegionMap<PanelId>,
    pub transcript: &'a [TranscriptionEntry],
    pub panels: &'a [InsightPanel],
    /// Kinds offered by the add-panel menu.
    pub available_kinds: Vec<PanelKind>,
    pub insights: &'a InsightData,
    pub quick_stats: QuickStats,
}

impl BodyView<'_> {
    /// Panel and its rectangle, in render order.
    pub fn placed_panels(&self) -> impl Iterator<Item = (&InsightPanel, Rect)> + '_ {
        self.panels
            .iter()
            .filter_map(|p| self.regions.panel(p.id()).map(|r| (p, r.rect)))
    }
}
