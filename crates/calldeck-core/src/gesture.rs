#![forbid(unsafe_code)]

//! Single-owner gesture tracking.
//!
//! A gesture is one pointer-down → move* → up sequence. [`GestureSlot`] holds
//! at most one [`ActiveGesture`] at a time; the value records which owner the
//! gesture belongs to (`kind`), where the pointer went down, and the owner's
//! geometry at that moment. Owners recompute their state from that origin on
//! every move, so nothing accumulates between events.
//!
//! # Invariants
//!
//! 1. At most one gesture is active. [`GestureSlot::begin`] refuses to start a
//!    second one until the first has ended.
//! 2. [`GestureSlot::end`] is idempotent: ending with no active gesture is a
//!    no-op that returns `None`.
//! 3. A move with no active gesture produces no displacement
//!    ([`GestureSlot::displacement`] returns `None`); callers ignore it.

use crate::geometry::{Point, Rect};

/// A gesture in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveGesture<K> {
    /// Which owner handles this gesture.
    pub kind: K,
    /// Pointer position at pointer-down.
    pub origin_pointer: Point,
    /// The owner's geometry at pointer-down (window bounds, region bounds, ...).
    pub origin_geometry: Rect,
}

impl<K> ActiveGesture<K> {
    /// Pointer displacement from the gesture origin.
    #[inline]
    #[must_use]
    pub fn displacement(&self, pointer: Point) -> Point {
        pointer - self.origin_pointer
    }
}

/// Holds the one active gesture, if any.
#[derive(Debug, Clone)]
pub struct GestureSlot<K> {
    active: Option<ActiveGesture<K>>,
    moves: u64,
}

impl<K> Default for GestureSlot<K> {
    fn default() -> Self {
        Self {
            active: None,
            moves: 0,
        }
    }
}

impl<K: Copy + std::fmt::Debug> GestureSlot<K> {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a gesture. Returns `false` (and changes nothing) if one is active.
    pub fn begin(&mut self, kind: K, origin_pointer: Point, origin_geometry: Rect) -> bool {
        if let Some(_current) = &self.active {
            crate::debug!(
                target: "calldeck.gesture",
                active = ?_current.kind,
                requested = ?kind,
                "gesture start refused; another gesture is active"
            );
            return false;
        }
        crate::trace!(target: "calldeck.gesture", kind = ?kind, "gesture started");
        self.active = Some(ActiveGesture {
            kind,
            origin_pointer,
            origin_geometry,
        });
        self.moves = 0;
        true
    }

    /// The active gesture, if any.
    #[inline]
    #[must_use]
    pub fn active(&self) -> Option<&ActiveGesture<K>> {
        self.active.as_ref()
    }

    /// Whether any gesture is active.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Record a move and return the active gesture with the pointer
    /// displacement since its origin.
    pub fn displacement(&mut self, pointer: Point) -> Option<(ActiveGesture<K>, Point)> {
        let gesture = self.active?;
        self.moves += 1;
        Some((gesture, gesture.displacement(pointer)))
    }

    /// Number of moves applied to the active gesture.
    #[inline]
    #[must_use]
    pub fn move_count(&self) -> u64 {
        self.moves
    }

    /// End the active gesture, returning it. Idempotent.
    pub fn end(&mut self) -> Option<ActiveGesture<K>> {
        let ended = self.active.take();
        if let Some(_g) = &ended {
            crate::trace!(
                target: "calldeck.gesture",
                kind = ?_g.kind,
                moves = self.moves,
                "gesture ended"
            );
        }
        self.moves = 0;
        ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Drag,
        Resize,
    }

    fn origin() -> Rect {
        Rect::new(100.0, 100.0, 800.0, 600.0)
    }

    #[test]
    fn begin_then_end() {
        let mut slot = GestureSlot::new();
        assert!(slot.begin(Kind::Drag, Point::new(10.0, 10.0), origin()));
        assert!(slot.is_active());
        let ended = slot.end().map(|g| g.kind);
        assert_eq!(ended, Some(Kind::Drag));
        assert!(!slot.is_active());
    }

    #[test]
    fn second_begin_is_refused() {
        let mut slot = GestureSlot::new();
        assert!(slot.begin(Kind::Drag, Point::new(10.0, 10.0), origin()));
        assert!(!slot.begin(Kind::Resize, Point::new(20.0, 20.0), origin()));
        assert_eq!(slot.active().map(|g| g.kind), Some(Kind::Drag));
        assert_eq!(
            slot.active().map(|g| g.origin_pointer),
            Some(Point::new(10.0, 10.0))
        );
    }

    #[test]
    fn end_is_idempotent() {
        let mut slot: GestureSlot<Kind> = GestureSlot::new();
        assert!(slot.end().is_none());
        assert!(slot.begin(Kind::Resize, Point::ZERO, origin()));
        assert!(slot.end().is_some());
        assert!(slot.end().is_none());
    }

    #[test]
    fn displacement_without_gesture_is_none() {
        let mut slot: GestureSlot<Kind> = GestureSlot::new();
        assert!(slot.displacement(Point::new(5.0, 5.0)).is_none());
        assert_eq!(slot.move_count(), 0);
    }

    #[test]
    fn displacement_is_relative_to_origin() {
        let mut slot = GestureSlot::new();
        slot.begin(Kind::Drag, Point::new(10.0, 20.0), origin());
        let (_, d1) = slot.displacement(Point::new(15.0, 25.0)).unwrap();
        let (g, d2) = slot.displacement(Point::new(30.0, 10.0)).unwrap();
        assert_eq!(d1, Point::new(5.0, 5.0));
        assert_eq!(d2, Point::new(20.0, -10.0));
        assert_eq!(g.origin_geometry, origin());
        assert_eq!(slot.move_count(), 2);
    }

    #[test]
    fn slot_can_be_reused_after_end() {
        let mut slot = GestureSlot::new();
        slot.begin(Kind::Drag, Point::ZERO, origin());
        slot.end();
        assert!(slot.begin(Kind::Resize, Point::new(1.0, 1.0), origin()));
        assert_eq!(slot.active().map(|g| g.kind), Some(Kind::Resize));
    }
}
