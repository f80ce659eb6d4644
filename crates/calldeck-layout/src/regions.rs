#![forbid(unsafe_code)]

//! Concrete body regions and hit testing.
//!
//! [`resolve_regions`] turns a share, a column assignment, and per-panel
//! heights into rectangles. The splitter and resize handles are thin hit
//! areas centered on the boundary they move; they do not consume layout
//! space. Panels stack top-down inside their column and may overflow it (the
//! host scrolls the column).

use calldeck_core::geometry::{Point, Rect};
use serde::Serialize;

/// Layout constants for region resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionConfig {
    /// Hit width of the vertical transcript/insight splitter.
    pub splitter_hit_width: f32,
    /// Hit thickness of a panel's bottom-edge resize handle.
    pub handle_hit_height: f32,
    /// Height of a collapsed panel (its header only).
    pub collapsed_height: f32,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            splitter_hit_width: 6.0,
            handle_hit_height: 6.0,
            collapsed_height: 40.0,
        }
    }
}

/// Input: one panel as placed in a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelBox<T> {
    pub id: T,
    pub height: f32,
    pub collapsed: bool,
}

/// Output: one panel's rectangle and its resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelRegion<T> {
    pub id: T,
    pub rect: Rect,
    /// `None` for collapsed panels.
    pub resize_handle: Option<Rect>,
}

/// What a pointer landed on inside the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionHit<T> {
    Splitter,
    PanelResize(T),
    Panel(T),
    Transcript,
    Insight,
}

/// Resolved body regions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionMap<T> {
    pub body: Rect,
    pub transcript: Rect,
    pub splitter: Option<Rect>,
    pub insight: Option<Rect>,
    pub columns: Vec<Rect>,
    pub panels: Vec<PanelRegion<T>>,
}

impl<T: Copy> RegionMap<T> {
    /// Classify a point. Handles win over the areas they sit on.
    #[must_use]
    pub fn hit_test(&self, p: Point) -> Option<RegionHit<T>> {
        if !self.body.contains(p) {
            return None;
        }
        if self.splitter.is_some_and(|r| r.contains(p)) {
            return Some(RegionHit::Splitter);
        }
        if let Some(panel) = self
            .panels
            .iter()
            .find(|panel| panel.resize_handle.is_some_and(|h| h.contains(p)))
        {
            return Some(RegionHit::PanelResize(panel.id));
        }
        if let Some(panel) = self.panels.iter().find(|panel| panel.rect.contains(p)) {
            return Some(RegionHit::Panel(panel.id));
        }
        if self.transcript.contains(p) {
            return Some(RegionHit::Transcript);
        }
        if self.insight.is_some_and(|r| r.contains(p)) {
            return Some(RegionHit::Insight);
        }
        None
    }

    /// Rectangle of a panel by id.
    #[must_use]
    pub fn panel(&self, id: T) -> Option<&PanelRegion<T>>
    where
        T: PartialEq,
    {
        self.panels.iter().find(|p| p.id == id)
    }
}

/// Resolve body regions.
///
/// `transcript_share` is the effective share (arrangement default or splitter
/// override); `columns` is the arrangement's column assignment with each
/// panel's height and collapsed flag filled in.
#[must_use]
pub fn resolve_regions<T: Copy>(
    body: Rect,
    transcript_share: f32,
    columns: &[Vec<PanelBox<T>>],
    config: &RegionConfig,
) -> RegionMap<T> {
    if columns.is_empty() {
        return RegionMap {
            body,
            transcript: body,
            splitter: None,
            insight: None,
            columns: Vec::new(),
            panels: Vec::new(),
        };
    }

    let share = transcript_share.clamp(0.0, 1.0);
    let (transcript, insight) = body.split_left(body.width * share);
    let half = config.splitter_hit_width / 2.0;
    let splitter = Rect::new(
        transcript.right() - half,
        body.y,
        config.splitter_hit_width,
        body.height,
    );

    let col_width = insight.width / columns.len() as f32;
    let mut column_rects = Vec::with_capacity(columns.len());
    let mut panels = Vec::new();
    for (i, column) in columns.iter().enumerate() {
        let col = Rect::new(
            insight.x + col_width * i as f32,
            insight.y,
            col_width,
            insight.height,
        );
        column_rects.push(col);

        let mut y = col.y;
        for panel in column {
            let height = if panel.collapsed {
                config.collapsed_height
            } else {
                panel.height
            };
            let rect = Rect::new(col.x, y, col.width, height);
            let resize_handle = (!panel.collapsed).then(|| {
                Rect::new(
                    col.x,
                    rect.bottom() - config.handle_hit_height / 2.0,
                    col.width,
                    config.handle_hit_height,
                )
            });
            panels.push(PanelRegion {
                id: panel.id,
                rect,
                resize_handle,
            });
            y += height;
        }
    }

    RegionMap {
        body,
        transcript,
        splitter: Some(splitter),
        insight: Some(insight),
        columns: column_rects,
        panels,
    }
}
