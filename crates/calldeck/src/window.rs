#![forbid(unsafe_code)]

//! Window controller: display mode, retained normal geometry, drag and resize.
//!
//! The controller owns one [`Rect`], the `Normal` geometry. `Minimized` and
//! `Maximized` never touch it; they derive their bounds from the viewport, so
//! restoring always lands back on the exact rectangle the window had.
//!
//! # Invariants
//!
//! 1. Drag and resize start only in [`WindowMode::Normal`].
//! 2. The normal size never drops below the configured minimum.
//! 3. Mode transitions end any gesture in progress.
//! 4. Pointer moves with no gesture in progress change nothing.

use std::fmt;

use calldeck_core::geometry::{
    DragAnchor, Point, Rect, Size, clamp_size, drag_position, resize_size,
};
use tracing::debug;

use crate::call::CallState;
use crate::config::WindowConfig;
use crate::error::{CloseOutcome, CloseRejection};

/// Window display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowMode {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

impl WindowMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Minimized => "minimized",
            Self::Maximized => "maximized",
        }
    }
}

impl fmt::Display for WindowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum WindowGesture {
    Drag { anchor: DragAnchor },
    Resize { start: Point, start_size: Size },
}

/// Owns window mode and geometry.
#[derive(Debug, Clone)]
pub struct WindowController {
    mode: WindowMode,
    normal: Rect,
    viewport: Size,
    gesture: Option<WindowGesture>,
    config: WindowConfig,
}

impl WindowController {
    /// Create a `Normal` window at `initial_position` (or the configured
    /// default) with the configured initial size, floored at the minimum.
    #[must_use]
    pub fn new(config: &WindowConfig, initial_position: Option<Point>) -> Self {
        let origin = initial_position.unwrap_or(config.initial_position);
        let size = clamp_size(config.initial_size, config.min_size);
        Self {
            mode: WindowMode::Normal,
            normal: Rect::from_origin_size(origin, size),
            viewport: config.viewport,
            gesture: None,
            config: config.clone(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn mode(&self) -> WindowMode {
        self.mode
    }

    /// The retained `Normal` geometry, whatever the current mode.
    #[inline]
    #[must_use]
    pub const fn normal_geometry(&self) -> Rect {
        self.normal
    }

    #[inline]
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport
    }

    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Some(WindowGesture::Drag { .. }))
    }

    #[inline]
    #[must_use]
    pub fn is_resizing(&self) -> bool {
        matches!(self.gesture, Some(WindowGesture::Resize { .. }))
    }

    /// Bounds the window occupies in the current mode.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        match self.mode {
            WindowMode::Normal => self.normal,
            WindowMode::Maximized => {
                Rect::from_origin_size(Point::ZERO, self.viewport)
            }
            WindowMode::Minimized => {
                let s = self.config.minimized_size;
                let m = self.config.minimized_margin;
                Rect::new(
                    self.viewport.width - s.width - m,
                    self.viewport.height - s.height - m,
                    s.width,
                    s.height,
                )
            }
        }
    }

    /// Drag area: the title bar minus its button cluster. `None` when minimized.
    #[must_use]
    pub fn title_bar(&self) -> Option<Rect> {
        if self.mode == WindowMode::Minimized {
            return None;
        }
        let b = self.bounds();
        let (bar, _) = b.split_top(self.config.title_bar_height);
        let (drag, _) = bar.split_left((bar.width - self.config.title_buttons_width).max(0.0));
        Some(drag)
    }

    /// Bottom-right corner resize handle. Only present in `Normal`.
    #[must_use]
    pub fn resize_handle(&self) -> Option<Rect> {
        if self.mode != WindowMode::Normal {
            return None;
        }
        let b = self.normal;
        let side = self.config.resize_handle_size;
        Some(Rect::new(b.right() - side, b.bottom() - side, side, side))
    }

    /// Close button of the minimized card (a square at its right end).
    #[must_use]
    pub fn minimized_close_button(&self) -> Option<Rect> {
        if self.mode != WindowMode::Minimized {
            return None;
        }
        let b = self.bounds();
        Some(Rect::new(b.right() - b.height, b.y, b.height, b.height))
    }

    /// Area below the title bar and the call controls strip.
    #[must_use]
    pub fn body(&self) -> Option<Rect> {
        if self.mode == WindowMode::Minimized {
            return None;
        }
        let (_, rest) = self.bounds().split_top(self.config.title_bar_height);
        let (_, body) = rest.split_top(self.config.controls_height);
        Some(body)
    }

    /// Start dragging. Refused outside `Normal` or while another window
    /// gesture is in progress.
    pub fn begin_drag(&mut self, pointer: Point) -> bool {
        if !self.can_begin_gesture("drag") {
            return false;
        }
        self.gesture = Some(WindowGesture::Drag {
            anchor: DragAnchor::capture(pointer, self.normal.origin()),
        });
        true
    }

    /// Start resizing from the bottom-right corner. Same gating as
    /// [`begin_drag`](Self::begin_drag).
    pub fn begin_resize(&mut self, pointer: Point) -> bool {
        if !self.can_begin_gesture("resize") {
            return false;
        }
        self.gesture = Some(WindowGesture::Resize {
            start: pointer,
            start_size: self.normal.size(),
        });
        true
    }

    fn can_begin_gesture(&self, what: &str) -> bool {
        if self.mode != WindowMode::Normal {
            debug!(
                target: "calldeck.window",
                gesture = what,
                mode = %self.mode,
                "window gesture refused outside normal mode"
            );
            return false;
        }
        if self.gesture.is_some() {
            debug!(target: "calldeck.window", gesture = what, "window gesture already active");
            return false;
        }
        true
    }

    /// Apply a pointer move to the active gesture. Returns whether the
    /// geometry changed.
    pub fn on_pointer_move(&mut self, pointer: Point) -> bool {
        let before = self.normal;
        match self.gesture {
            Some(WindowGesture::Drag { anchor }) => {
                let origin = drag_position(pointer, anchor);
                self.normal = Rect::from_origin_size(origin, self.normal.size());
            }
            Some(WindowGesture::Resize { start, start_size }) => {
                let size = resize_size(start, pointer, start_size, self.config.min_size);
                self.normal = Rect::from_origin_size(self.normal.origin(), size);
            }
            None => return false,
        }
        self.normal != before
    }

    /// End any window gesture. Idempotent.
    pub fn end_gesture(&mut self) {
        self.gesture = None;
    }

    /// Collapse to the bottom-right card. Normal geometry is kept as is.
    pub fn minimize(&mut self) {
        self.set_mode(WindowMode::Minimized);
    }

    /// Toggle between `Maximized` and `Normal`.
    pub fn maximize(&mut self) {
        let next = if self.mode == WindowMode::Maximized {
            WindowMode::Normal
        } else {
            WindowMode::Maximized
        };
        self.set_mode(next);
    }

    /// Return to `Normal` with the retained geometry.
    pub fn restore(&mut self) {
        self.set_mode(WindowMode::Normal);
    }

    fn set_mode(&mut self, mode: WindowMode) {
        self.gesture = None;
        if self.mode != mode {
            debug!(target: "calldeck.window", from = %self.mode, to = %mode, "mode changed");
            self.mode = mode;
        }
    }

    /// Ask to close. Rejected while a call is active; nothing changes either
    /// way, the host unmounts the dialog on success.
    pub fn request_close(&self, call_state: CallState) -> CloseOutcome {
        if call_state == CallState::Active {
            debug!(target: "calldeck.window", "close rejected during active call");
            return CloseOutcome::Rejected(CloseRejection::CallActive);
        }
        CloseOutcome::Closed
    }

    /// Report a new viewport size. Only derived bounds move.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> WindowController {
        WindowController::new(&WindowConfig::default(), Some(Point::new(100.0, 100.0)))
    }

    #[test]
    fn opens_normal_at_initial_position() {
        let w = controller();
        assert_eq!(w.mode(), WindowMode::Normal);
        assert_eq!(w.bounds(), Rect::new(100.0, 100.0, 800.0, 600.0));
    }

    #[test]
    fn drag_preserves_grab_offset() {
        let mut w = controller();
        assert!(w.begin_drag(Point::new(150.0, 110.0)));
        assert!(w.on_pointer_move(Point::new(250.0, 160.0)));
        assert_eq!(w.normal_geometry().origin(), Point::new(200.0, 150.0));
        w.end_gesture();
        w.end_gesture();
        assert!(!w.on_pointer_move(Point::new(0.0, 0.0)));
    }

    #[test]
    fn resize_is_floored() {
        let mut w = controller();
        assert!(w.begin_resize(Point::new(900.0, 700.0)));
        w.on_pointer_move(Point::new(1000.0, 760.0));
        assert_eq!(w.normal_geometry().size(), Size::new(900.0, 660.0));
        w.on_pointer_move(Point::new(100.0, 100.0));
        assert_eq!(w.normal_geometry().size(), Size::new(800.0, 600.0));
        assert_eq!(w.normal_geometry().origin(), Point::new(100.0, 100.0));
    }

    #[test]
    fn gestures_refused_outside_normal() {
        let mut w = controller();
        w.maximize();
        assert!(!w.begin_drag(Point::new(10.0, 10.0)));
        assert!(!w.begin_resize(Point::new(10.0, 10.0)));
        assert!(w.resize_handle().is_none());
        w.minimize();
        assert!(!w.begin_drag(Point::new(10.0, 10.0)));
        assert!(w.title_bar().is_none());
    }

    #[test]
    fn second_gesture_refused() {
        let mut w = controller();
        assert!(w.begin_drag(Point::new(150.0, 110.0)));
        assert!(!w.begin_resize(Point::new(890.0, 690.0)));
        assert!(w.is_dragging());
    }

    #[test]
    fn minimize_restore_is_bit_identical() {
        let mut w = controller();
        w.begin_drag(Point::new(123.25, 111.5));
        w.on_pointer_move(Point::new(140.125, 171.75));
        w.end_gesture();
        let before = w.normal_geometry();
        w.minimize();
        assert_eq!(w.bounds(), Rect::new(960.0, 720.0, 300.0, 60.0));
        w.restore();
        assert_eq!(w.bounds(), before);
    }

    #[test]
    fn maximize_toggles() {
        let mut w = controller();
        w.maximize();
        assert_eq!(w.mode(), WindowMode::Maximized);
        assert_eq!(w.bounds(), Rect::new(0.0, 0.0, 1280.0, 800.0));
        w.maximize();
        assert_eq!(w.mode(), WindowMode::Normal);
        assert_eq!(w.bounds(), Rect::new(100.0, 100.0, 800.0, 600.0));
    }

    #[test]
    fn mode_change_ends_gesture() {
        let mut w = controller();
        w.begin_drag(Point::new(150.0, 110.0));
        w.minimize();
        w.restore();
        assert!(!w.is_dragging());
        assert!(!w.on_pointer_move(Point::new(400.0, 400.0)));
    }

    #[test]
    fn close_rejected_only_when_active() {
        let w = controller();
        assert_eq!(
            w.request_close(CallState::Active),
            CloseOutcome::Rejected(CloseRejection::CallActive)
        );
        for state in [CallState::Idle, CallState::Connecting, CallState::Ended] {
            assert!(w.request_close(state).is_closed());
        }
    }

    #[test]
    fn viewport_moves_derived_bounds_only() {
        let mut w = controller();
        w.set_viewport(Size::new(1920.0, 1080.0));
        assert_eq!(w.normal_geometry(), Rect::new(100.0, 100.0, 800.0, 600.0));
        w.minimize();
        assert_eq!(w.bounds().origin(), Point::new(1600.0, 1000.0));
    }

    #[test]
    fn chrome_rects() {
        let w = controller();
        assert_eq!(w.title_bar(), Some(Rect::new(100.0, 100.0, 704.0, 48.0)));
        assert_eq!(w.resize_handle(), Some(Rect::new(884.0, 684.0, 16.0, 16.0)));
        assert_eq!(w.body(), Some(Rect::new(100.0, 220.0, 800.0, 480.0)));
    }
}
