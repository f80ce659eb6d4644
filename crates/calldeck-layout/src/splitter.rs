#![forbid(unsafe_code)]

//! User-draggable split between the transcript and insight regions.
//!
//! Until the user drags the splitter, the arrangement's default share applies.
//! After the first drag the override wins for every later arrangement and
//! persists until the dialog closes (the owner simply drops this state).
//! With no panels there is no insight region and no splitter, so the
//! transcript spans the full width; the override is kept for when panels
//! come back.

use serde::Serialize;

/// Minimum widths for the two regions on either side of the splitter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SplitterBounds {
    pub min_transcript_width: f32,
    pub min_insight_width: f32,
}

impl SplitterBounds {
    /// Clamp a transcript width into `[min_transcript, total - min_insight]`.
    ///
    /// If the body is too narrow to honor both minimums, the split falls on
    /// the proportional midpoint between them. A NaN bound is ignored
    /// rather than propagated.
    #[must_use]
    pub fn clamp_transcript_width(&self, width: f32, total: f32) -> f32 {
        let lo = self.min_transcript_width;
        let hi = total - self.min_insight_width;
        if lo > hi {
            let sum = self.min_transcript_width + self.min_insight_width;
            if sum <= 0.0 {
                return total / 2.0;
            }
            return total * (self.min_transcript_width / sum);
        }
        width.max(lo).min(hi)
    }
}

/// Splitter override state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SplitterState {
    override_share: Option<f32>,
}

impl SplitterState {
    /// Fresh state: no override.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            override_share: None,
        }
    }

    /// The user's share, if the splitter has been dragged.
    #[must_use]
    pub const fn override_share(&self) -> Option<f32> {
        self.override_share
    }

    /// Share to use given the arrangement's default and the panel count.
    #[must_use]
    pub fn effective_share(&self, default_share: f32, panel_count: usize) -> f32 {
        if panel_count == 0 {
            return 1.0;
        }
        self.override_share.unwrap_or(default_share)
    }

    /// Apply a splitter drag.
    ///
    /// `origin_width` is the transcript width when the drag started and
    /// `dx` the horizontal pointer displacement since then. Returns the new
    /// clamped transcript width.
    pub fn drag_to(
        &mut self,
        origin_width: f32,
        dx: f32,
        total_width: f32,
        bounds: SplitterBounds,
    ) -> f32 {
        if total_width <= 0.0 {
            return 0.0;
        }
        let width = bounds.clamp_transcript_width(origin_width + dx, total_width);
        self.override_share = Some(width / total_width);
        width
    }

    /// Drop the override and return to arrangement defaults.
    pub fn reset(&mut self) {
        self.override_share = None;
    }
}
