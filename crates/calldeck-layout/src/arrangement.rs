#![forbid(unsafe_code)]

//! Panel arrangement table.
//!
//! | panels | transcript share | columns | distribution                       |
//! |--------|------------------|---------|------------------------------------|
//! | 0      | 100%             | 0       | none                               |
//! | 1      | 50%              | 1       | one panel                          |
//! | 2      | ~33%             | 1       | both stacked                       |
//! | 3–4    | ~33%             | 2       | first ⌈n/2⌉ in A, the rest in B    |
//!
//! The breakpoints are fixed. Counts above 4 never occur with the panel cap in
//! place; if one is passed anyway it is treated like the 3–4 row.

use serde::Serialize;

/// Transcript share with no panels.
pub const SHARE_FULL: f32 = 1.0;
/// Transcript share with one panel.
pub const SHARE_HALF: f32 = 0.5;
/// Transcript share with two or more panels.
pub const SHARE_THIRD: f32 = 1.0 / 3.0;

/// Derived column layout for an ordered panel collection.
///
/// `T` is whatever identifies a panel: indices from [`compute_arrangement`],
/// or caller ids from [`arrange`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutArrangement<T> {
    /// Fraction of the body width given to the transcript region, in (0, 1].
    pub transcript_share: f32,
    /// Number of insight columns (0, 1, or 2).
    pub column_count: usize,
    /// Panels per column, in render order.
    pub columns: Vec<Vec<T>>,
}

impl<T> LayoutArrangement<T> {
    /// Total number of panels placed.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    /// Fraction of the body width given to the insight region.
    #[must_use]
    pub fn insight_share(&self) -> f32 {
        1.0 - self.transcript_share
    }
}

/// Map a panel count to its arrangement, with columns holding panel indices.
#[must_use]
pub fn compute_arrangement(panel_count: usize) -> LayoutArrangement<usize> {
    let (transcript_share, columns) = match panel_count {
        0 => (SHARE_FULL, Vec::new()),
        1 => (SHARE_HALF, vec![vec![0]]),
        2 => (SHARE_THIRD, vec![vec![0, 1]]),
        n => {
            let split = n.div_ceil(2);
            (SHARE_THIRD, vec![(0..split).collect(), (split..n).collect()])
        }
    };
    LayoutArrangement {
        transcript_share,
        column_count: columns.len(),
        columns,
    }
}

/// Arrange caller ids in collection order.
#[must_use]
pub fn arrange<T: Copy>(ids: &[T]) -> LayoutArrangement<T> {
    let base = compute_arrangement(ids.len());
    LayoutArrangement {
        transcript_share: base.transcript_share,
        column_count: base.column_count,
        columns: base
            .columns
            .into_iter()
            .map(|col| col.into_iter().map(|i| ids[i]).collect())
            .collect(),
    }
}
