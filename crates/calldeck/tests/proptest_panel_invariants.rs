#![forbid(unsafe_code)]

//! Property tests for the panel collection under arbitrary operation
//! sequences.
//!
//! 1. Never more than `max_panels` panels.
//! 2. No two panels share a kind.
//! 3. Heights never drop below the floor.
//! 4. Surviving panels keep their relative order.
//! 5. Ids are never reused within a collection.
//! 6. The arrangement places every panel exactly once, in collection order.
//!
//! Run:
//!   cargo test -p calldeck --test proptest_panel_invariants

use std::collections::HashSet;

use calldeck::{InsightPanel, PanelCollection, PanelConfig, PanelId, PanelKind};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(PanelKind),
    Remove(usize),
    Toggle(usize),
    Resize(usize, f32),
}

fn kind_strategy() -> impl Strategy<Value = PanelKind> {
    (0..PanelKind::ALL.len()).prop_map(|i| PanelKind::ALL[i])
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => kind_strategy().prop_map(Op::Add),
        1 => (0usize..6).prop_map(Op::Remove),
        1 => (0usize..6).prop_map(Op::Toggle),
        2 => ((0usize..6), -500.0f32..1500.0).prop_map(|(i, h)| Op::Resize(i, h)),
    ]
}

fn id_at(c: &PanelCollection, idx: usize) -> Option<PanelId> {
    c.panels().get(idx).map(InsightPanel::id)
}

proptest! {
    #[test]
    fn collection_invariants_hold(ops in proptest::collection::vec(op_strategy(), 0..64)) {
        let config = PanelConfig::default();
        let mut c = PanelCollection::new(&config);
        let mut issued: HashSet<PanelId> = c.panels().iter().map(InsightPanel::id).collect();

        for op in ops {
            let order_before: Vec<PanelId> = c.panels().iter().map(InsightPanel::id).collect();
            match op {
                Op::Add(kind) => {
                    let had = c.contains_kind(kind);
                    let full = c.is_full();
                    let added = c.add_panel(kind);
                    prop_assert_eq!(added.is_some(), !had && !full);
                    if let Some(id) = added {
                        prop_assert!(issued.insert(id), "id reused: {id}");
                        prop_assert_eq!(c.panels().last().map(InsightPanel::id), Some(id));
                    }
                }
                Op::Remove(idx) => {
                    if let Some(id) = id_at(&c, idx) {
                        prop_assert!(c.remove_panel(id));
                        let expected: Vec<PanelId> =
                            order_before.iter().copied().filter(|&p| p != id).collect();
                        let after: Vec<PanelId> = c.panels().iter().map(InsightPanel::id).collect();
                        prop_assert_eq!(after, expected);
                    }
                }
                Op::Toggle(idx) => {
                    if let Some(id) = id_at(&c, idx) {
                        let before = c.get(id).map(InsightPanel::is_collapsed);
                        c.toggle_collapse(id);
                        prop_assert_eq!(c.get(id).map(InsightPanel::is_collapsed), before.map(|b| !b));
                    }
                }
                Op::Resize(idx, h) => {
                    if let Some(id) = id_at(&c, idx) {
                        let before = c.get(id).copied();
                        let applied = c.resize_panel(id, h);
                        if let Some(panel) = before {
                            prop_assert_eq!(applied, !panel.is_collapsed());
                            if panel.is_collapsed() {
                                prop_assert_eq!(c.get(id).map(InsightPanel::height), Some(panel.height()));
                            }
                        }
                    }
                }
            }

            prop_assert!(c.len() <= config.max_panels);
            let kinds: HashSet<PanelKind> = c.panels().iter().map(InsightPanel::kind).collect();
            prop_assert_eq!(kinds.len(), c.len());
            for p in c.panels() {
                prop_assert!(p.height() >= config.min_height);
            }

            let arrangement = c.arrangement();
            let placed: Vec<PanelId> = arrangement.columns.iter().flatten().copied().collect();
            let order: Vec<PanelId> = c.panels().iter().map(InsightPanel::id).collect();
            prop_assert_eq!(placed, order);
        }
    }

    #[test]
    fn remove_then_add_same_kind_succeeds(kind in kind_strategy()) {
        let mut c = PanelCollection::new(&PanelConfig {
            initial: Vec::new(),
            ..PanelConfig::default()
        });
        for k in PanelKind::ALL {
            c.add_panel(k);
        }
        prop_assert!(c.is_full());
        if let Some(id) = c.panels().iter().find(|p| p.kind() == kind).map(InsightPanel::id) {
            prop_assert!(c.remove_panel(id));
            prop_assert!(c.add_panel(kind).is_some());
        } else {
            // Not among the first max_panels kinds; free a slot first.
            let first = c.panels()[0].id();
            prop_assert!(c.remove_panel(first));
            prop_assert!(c.add_panel(kind).is_some());
        }
        prop_assert!(c.contains_kind(kind));
    }
}
