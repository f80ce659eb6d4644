#![forbid(unsafe_code)]

//! Call lifecycle: `Idle → Connecting → Active → Ended → Idle`.
//!
//! The two automatic steps (connecting finishes, ended resets) and the
//! simulated feed are timers in a [`TimerQueue`] owned by the controller.
//! Every transition cancels whatever the previous state had scheduled, and
//! [`CallController::teardown`] cancels everything, so no timer can fire into
//! a state that no longer expects it.
//!
//! Time is supplied by the caller. [`CallController::advance`] pops every
//! timer due at `now` and reports what happened as [`CallEvent`]s; feed ticks
//! carry the elapsed call time of their scheduled deadline, not of `now`.

use std::fmt;

use calldeck_runtime::{TimerId, TimerQueue};
use tracing::{debug, info, trace};
use web_time::{Duration, Instant};

use crate::config::CallConfig;
use crate::mock::duration_label;

/// Call state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallState {
    #[default]
    Idle,
    Connecting,
    Active,
    Ended,
}

impl CallState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::Active => "active",
            Self::Ended => "ended",
        }
    }
}

impl fmt::Display for CallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallTimer {
    Connected,
    Reset,
    FeedTick,
}

/// Something [`CallController::advance`] observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallEvent {
    /// An automatic transition happened.
    StateChanged { from: CallState, to: CallState },
    /// The feed is due for one transcript entry.
    FeedTick { elapsed: Duration },
}

/// Which call controls are shown and enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub start_visible: bool,
    pub end_visible: bool,
    pub mute_enabled: bool,
    pub video_enabled: bool,
    pub volume_enabled: bool,
    pub settings_enabled: bool,
    pub close_enabled: bool,
    pub muted: bool,
    pub video_on: bool,
}

/// Owns call state, toggles, and the call's timers.
#[derive(Debug)]
pub struct CallController {
    state: CallState,
    muted: bool,
    video_on: bool,
    active_since: Option<Instant>,
    final_elapsed: Duration,
    timers: TimerQueue<CallTimer>,
    transition: Option<TimerId>,
    feed: Option<TimerId>,
    connecting_delay: Duration,
    ending_delay: Duration,
    feed_period: Duration,
}

impl CallController {
    /// Idle controller with video on and mute off.
    #[must_use]
    pub fn new(config: &CallConfig) -> Self {
        Self {
            state: CallState::Idle,
            muted: false,
            video_on: true,
            active_since: None,
            final_elapsed: Duration::ZERO,
            timers: TimerQueue::new(),
            transition: None,
            feed: None,
            connecting_delay: config.connecting_delay(),
            ending_delay: config.ending_delay(),
            feed_period: config.feed_period(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> CallState {
        self.state
    }

    #[inline]
    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.muted
    }

    #[inline]
    #[must_use]
    pub const fn is_video_on(&self) -> bool {
        self.video_on
    }

    /// Whether the simulated feed timer is armed.
    #[must_use]
    pub fn feed_running(&self) -> bool {
        self.feed.is_some_and(|id| self.timers.is_pending(id))
    }

    /// Number of pending timers.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Earliest pending deadline, for hosts that sleep until the next event.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Begin connecting. Only valid from `Idle`.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.state != CallState::Idle {
            debug!(target: "calldeck.call", state = %self.state, "start ignored");
            return false;
        }
        self.set_state(CallState::Connecting);
        self.final_elapsed = Duration::ZERO;
        self.transition = Some(self.timers.after(now, self.connecting_delay, CallTimer::Connected));
        true
    }

    /// Hang up. Valid from `Active` or `Connecting`; stops the feed at once.
    pub fn end(&mut self, now: Instant) -> bool {
        if !matches!(self.state, CallState::Active | CallState::Connecting) {
            debug!(target: "calldeck.call", state = %self.state, "end ignored");
            return false;
        }
        self.final_elapsed = self.elapsed(now);
        self.cancel_scheduled();
        self.active_since = None;
        self.set_state(CallState::Ended);
        self.transition = Some(self.timers.after(now, self.ending_delay, CallTimer::Reset));
        true
    }

    /// Flip mute. Only while `Active`.
    pub fn toggle_mute(&mut self) -> bool {
        if self.state != CallState::Active {
            return false;
        }
        self.muted = !self.muted;
        trace!(target: "calldeck.call", muted = self.muted, "mute toggled");
        true
    }

    /// Flip video. Only while `Active`.
    pub fn toggle_video(&mut self) -> bool {
        if self.state != CallState::Active {
            return false;
        }
        self.video_on = !self.video_on;
        trace!(target: "calldeck.call", video_on = self.video_on, "video toggled");
        true
    }

    /// Fire every timer due at `now`, in deadline order.
    pub fn advance(&mut self, now: Instant) -> Vec<CallEvent> {
        let mut events = Vec::new();
        while let Some(fired) = self.timers.pop_due(now) {
            match fired.msg {
                CallTimer::Connected if self.state == CallState::Connecting => {
                    self.transition = None;
                    self.active_since = Some(fired.deadline);
                    self.feed = Some(self.timers.every(
                        fired.deadline,
                        self.feed_period,
                        CallTimer::FeedTick,
                    ));
                    events.push(self.transition_to(CallState::Active));
                }
                CallTimer::Reset if self.state == CallState::Ended => {
                    self.transition = None;
                    events.push(self.transition_to(CallState::Idle));
                }
                CallTimer::FeedTick if self.state == CallState::Active => {
                    let elapsed = self
                        .active_since
                        .map_or(Duration::ZERO, |t| fired.deadline.saturating_duration_since(t));
                    events.push(CallEvent::FeedTick { elapsed });
                }
                stale => {
                    debug!(
                        target: "calldeck.call",
                        timer = ?stale,
                        timer_id = fired.id.get(),
                        state = %self.state,
                        "stale timer dropped"
                    );
                }
            }
        }
        events
    }

    /// Cancel every pending timer. Called when the dialog closes.
    pub fn teardown(&mut self) -> usize {
        self.transition = None;
        self.feed = None;
        let cancelled = self.timers.cancel_all();
        if cancelled > 0 {
            debug!(target: "calldeck.call", cancelled, "call timers cancelled on teardown");
        }
        cancelled
    }

    /// Time spent `Active`: live while active, frozen once ended.
    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Duration {
        match (self.state, self.active_since) {
            (CallState::Active, Some(since)) => now.saturating_duration_since(since),
            (CallState::Ended, _) => self.final_elapsed,
            _ => Duration::ZERO,
        }
    }

    /// Status line text.
    #[must_use]
    pub fn status_label(&self, now: Instant) -> String {
        match self.state {
            CallState::Idle => "Ready to connect".into(),
            CallState::Connecting => "Connecting...".into(),
            CallState::Active => format!("Connected • {}", duration_label(self.elapsed(now))),
            CallState::Ended => "Call ended".into(),
        }
    }

    /// Control visibility and enablement for the current state.
    #[must_use]
    pub fn controls(&self) -> ControlState {
        let active = self.state == CallState::Active;
        ControlState {
            start_visible: self.state == CallState::Idle,
            end_visible: matches!(self.state, CallState::Connecting | CallState::Active),
            mute_enabled: active,
            video_enabled: active,
            volume_enabled: active,
            settings_enabled: active,
            close_enabled: !active,
            muted: self.muted,
            video_on: self.video_on,
        }
    }

    fn cancel_scheduled(&mut self) {
        for id in [self.transition.take(), self.feed.take()].into_iter().flatten() {
            self.timers.cancel(id);
        }
    }

    fn set_state(&mut self, to: CallState) {
        info!(target: "calldeck.call", from = %self.state, to = %to, "call state changed");
        self.state = to;
    }

    fn transition_to(&mut self, to: CallState) -> CallEvent {
        let from = self.state;
        self.set_state(to);
        CallEvent::StateChanged { from, to }
    }
}
