#![forbid(unsafe_code)]

//! Insight panel collection.
//!
//! An ordered, bounded set of panels with at most one panel per
//! [`PanelKind`]. Insertion order is render order and is what the layout
//! engine distributes into columns. All operations are total: unknown ids,
//! duplicate kinds and a full collection are no-ops reported through the
//! return value.

use std::fmt;
use std::num::NonZeroU32;

use calldeck_layout::{LayoutArrangement, PanelBox, arrange};
use tracing::{debug, trace};

use crate::config::PanelConfig;
use crate::insight::PanelKind;

/// Unique panel id within one dialog session. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PanelId(NonZeroU32);

impl PanelId {
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel-{}", self.0)
    }
}

/// One insight panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsightPanel {
    id: PanelId,
    kind: PanelKind,
    height: f32,
    collapsed: bool,
}

impl InsightPanel {
    #[inline]
    #[must_use]
    pub const fn id(&self) -> PanelId {
        self.id
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> PanelKind {
        self.kind
    }

    /// Expanded height. Kept while collapsed.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    fn as_box(&self) -> PanelBox<PanelId> {
        PanelBox {
            id: self.id,
            height: self.height,
            collapsed: self.collapsed,
        }
    }
}

/// Ordered panel collection.
#[derive(Debug, Clone)]
pub struct PanelCollection {
    panels: Vec<InsightPanel>,
    issued: u32,
    max_panels: usize,
    default_height: f32,
    min_height: f32,
}

impl PanelCollection {
    /// Collection seeded with `config.initial` (duplicates and overflow are
    /// dropped the same way [`add_panel`](Self::add_panel) drops them).
    #[must_use]
    pub fn new(config: &PanelConfig) -> Self {
        let mut collection = Self {
            panels: Vec::with_capacity(config.max_panels),
            issued: 0,
            max_panels: config.max_panels,
            default_height: config.default_height.max(config.min_height),
            min_height: config.min_height,
        };
        for &kind in &config.initial {
            collection.add_panel(kind);
        }
        collection
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.panels.len() >= self.max_panels
    }

    #[inline]
    #[must_use]
    pub const fn max_panels(&self) -> usize {
        self.max_panels
    }

    #[inline]
    #[must_use]
    pub const fn min_height(&self) -> f32 {
        self.min_height
    }

    /// Panels in render order.
    #[inline]
    #[must_use]
    pub fn panels(&self) -> &[InsightPanel] {
        &self.panels
    }

    #[must_use]
    pub fn get(&self, id: PanelId) -> Option<&InsightPanel> {
        self.panels.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn contains_kind(&self, kind: PanelKind) -> bool {
        self.panels.iter().any(|p| p.kind == kind)
    }

    /// Kinds that can still be added, in menu order. Empty when full.
    #[must_use]
    pub fn available_kinds(&self) -> Vec<PanelKind> {
        if self.is_full() {
            return Vec::new();
        }
        PanelKind::ALL
            .into_iter()
            .filter(|&k| !self.contains_kind(k))
            .collect()
    }

    /// Append a panel of `kind`. `None` if the kind is present or the
    /// collection is full.
    pub fn add_panel(&mut self, kind: PanelKind) -> Option<PanelId> {
        if self.contains_kind(kind) {
            debug!(target: "calldeck.panels", kind = %kind, "add ignored; kind already present");
            return None;
        }
        if self.is_full() {
            debug!(
                target: "calldeck.panels",
                kind = %kind,
                max = self.max_panels,
                "add ignored; collection full"
            );
            return None;
        }
        let id = PanelId(NonZeroU32::MIN.saturating_add(self.issued));
        self.issued = self.issued.saturating_add(1);
        self.panels.push(InsightPanel {
            id,
            kind,
            height: self.default_height,
            collapsed: false,
        });
        debug!(target: "calldeck.panels", panel_id = id.get(), kind = %kind, "panel added");
        Some(id)
    }

    /// Remove a panel. Remaining panels keep their order.
    pub fn remove_panel(&mut self, id: PanelId) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        let removed = self.panels.remove(idx);
        debug!(
            target: "calldeck.panels",
            panel_id = id.get(),
            kind = %removed.kind,
            "panel removed"
        );
        true
    }

    /// Flip a panel's collapsed flag.
    pub fn toggle_collapse(&mut self, id: PanelId) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        let panel = &mut self.panels[idx];
        panel.collapsed = !panel.collapsed;
        trace!(
            target: "calldeck.panels",
            panel_id = id.get(),
            collapsed = panel.collapsed,
            "panel collapse toggled"
        );
        true
    }

    /// Set a panel's height, floored at the minimum. Collapsed panels and
    /// unknown ids are left alone.
    pub fn resize_panel(&mut self, id: PanelId, height: f32) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        let floor = self.min_height;
        let panel = &mut self.panels[idx];
        if panel.collapsed {
            return false;
        }
        panel.height = floor.max(height);
        true
    }

    /// Column arrangement for the current order.
    #[must_use]
    pub fn arrangement(&self) -> LayoutArrangement<PanelId> {
        let ids: Vec<PanelId> = self.panels.iter().map(InsightPanel::id).collect();
        arrange(&ids)
    }

    /// The arrangement's columns with each panel's height and collapsed flag.
    #[must_use]
    pub fn column_boxes(
        &self,
        arrangement: &LayoutArrangement<PanelId>,
    ) -> Vec<Vec<PanelBox<PanelId>>> {
        arrangement
            .columns
            .iter()
            .map(|column| {
                column
                    .iter()
                    .filter_map(|&id| self.get(id).map(InsightPanel::as_box))
                    .collect()
            })
            .collect()
    }

    fn position(&self, id: PanelId) -> Option<usize> {
        self.panels.iter().position(|p| p.id == id)
    }
}
