#![forbid(unsafe_code)]

//! Canonical pointer events.
//!
//! The host page translates its native mouse/pointer callbacks into
//! [`PointerEvent`]s and feeds them to the dialog shell in the order received.
//! Moves are applied one by one; a host may coalesce moves to one per frame
//! (last event wins) without changing the outcome of a gesture, because every
//! gesture is recomputed from its captured origin.

use crate::geometry::Point;

/// Pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// What happened to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    /// Button pressed.
    Down(PointerButton),
    /// Pointer moved (with or without a button held).
    Move,
    /// Button released.
    Up(PointerButton),
    /// The host lost the pointer (blur, capture lost). Ends any gesture.
    Cancel,
}

/// A pointer event in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub pos: Point,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, pos: Point) -> Self {
        Self { kind, pos }
    }

    /// Primary-button press at `(x, y)`.
    #[must_use]
    pub const fn down(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Down(PointerButton::Primary), Point::new(x, y))
    }

    /// Pointer move to `(x, y)`.
    #[must_use]
    pub const fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Move, Point::new(x, y))
    }

    /// Primary-button release at `(x, y)`.
    #[must_use]
    pub const fn up(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Up(PointerButton::Primary), Point::new(x, y))
    }

    /// Whether this is a primary-button press.
    #[inline]
    #[must_use]
    pub fn is_primary_down(&self) -> bool {
        matches!(self.kind, PointerEventKind::Down(PointerButton::Primary))
    }
}
