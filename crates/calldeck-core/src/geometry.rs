#![forbid(unsafe_code)]

//! Geometric primitives and the pure geometry engine.
//!
//! All coordinates are page pixels (`f32`, origin at the viewport's top-left).
//! Positions may be negative: a window can be dragged partly off-page.
//!
//! The engine functions ([`clamp_size`], [`drag_position`], [`resize_size`])
//! hold no state. Given identical inputs they return identical outputs, which
//! is what lets controllers replay a gesture from its captured origin instead
//! of accumulating deltas.

use std::ops::{Add, Sub};

/// A point or displacement in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle for window bounds, layout regions, and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f32,
    /// Top edge (inclusive).
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from a top-left corner and a size.
    #[inline]
    #[must_use]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Top-left corner.
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Check if the rectangle has zero (or negative) area.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle (half-open on right/bottom).
    #[inline]
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Split off a band of `height` pixels from the top, returning `(top, rest)`.
    ///
    /// The band is clamped to the rectangle's own height.
    #[must_use]
    pub fn split_top(&self, height: f32) -> (Rect, Rect) {
        let h = height.clamp(0.0, self.height.max(0.0));
        (
            Rect::new(self.x, self.y, self.width, h),
            Rect::new(self.x, self.y + h, self.width, self.height - h),
        )
    }

    /// Split off a band of `width` pixels from the left, returning `(left, rest)`.
    ///
    /// The band is clamped to the rectangle's own width.
    #[must_use]
    pub fn split_left(&self, width: f32) -> (Rect, Rect) {
        let w = width.clamp(0.0, self.width.max(0.0));
        (
            Rect::new(self.x, self.y, w, self.height),
            Rect::new(self.x + w, self.y, self.width - w, self.height),
        )
    }
}

// ---------------------------------------------------------------------------
// Geometry engine
// ---------------------------------------------------------------------------

/// Floor a candidate size at the configured minimums.
///
/// There is no upper bound; maximized bounds come from the viewport, not
/// from this function.
#[inline]
#[must_use]
pub fn clamp_size(candidate: Size, min: Size) -> Size {
    Size::new(candidate.width.max(min.width), candidate.height.max(min.height))
}

/// Offset between the pointer and the window's top-left, captured at drag start.
///
/// Holding the offset (rather than the raw pointer position) keeps the
/// pointer's grab point fixed on the window for the whole drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragAnchor {
    offset: Point,
}

impl DragAnchor {
    /// Capture the anchor for a drag starting at `pointer` on a window whose
    /// top-left is `window_origin`.
    #[inline]
    #[must_use]
    pub fn capture(pointer: Point, window_origin: Point) -> Self {
        Self {
            offset: pointer - window_origin,
        }
    }

    /// The captured pointer-minus-origin offset.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> Point {
        self.offset
    }
}

/// New window top-left for a drag: pointer position minus the anchor offset.
///
/// Equivalent to `origin_at_start + (current - pointer_at_start)`.
#[inline]
#[must_use]
pub fn drag_position(current: Point, anchor: DragAnchor) -> Point {
    current - anchor.offset
}

/// New size for a resize: start size plus pointer displacement, clamped.
#[inline]
#[must_use]
pub fn resize_size(start: Point, current: Point, start_size: Size, min: Size) -> Size {
    let delta = current - start;
    clamp_size(
        Size::new(start_size.width + delta.x, start_size.height + delta.y),
        min,
    )
}
