#![forbid(unsafe_code)]

//! End-to-end dialog scenarios driven through the shell, the way a host
//! drives it: pointer events, renderer actions, and an injected clock.
//!
//! Run:
//!   cargo test -p calldeck --test e2e_dialog_scenarios

use std::cell::Cell;
use std::rc::Rc;

use calldeck::prelude::*;
use calldeck::{CannedData, CloseRejection, GestureKind, InsightPanel};

fn open_shell() -> (DialogShell, Rc<Cell<u32>>, Instant) {
    let closes = Rc::new(Cell::new(0));
    let counter = Rc::clone(&closes);
    let props = HostProps {
        open: true,
        initial_position: Some(Point::new(100.0, 100.0)),
    };
    let shell = DialogShell::new(DialogConfig::default(), props, move || {
        counter.set(counter.get() + 1);
    });
    (shell, closes, Instant::now())
}

fn at(t0: Instant, ms: u64) -> Instant {
    t0 + Duration::from_millis(ms)
}

#[test]
fn call_lifecycle_stops_feed_on_end() {
    let (mut shell, _, t0) = open_shell();
    assert_eq!(shell.call().unwrap().state(), CallState::Idle);
    let seeded = shell.transcript().unwrap().len();

    assert!(shell.dispatch(DialogAction::StartCall, t0));
    assert_eq!(shell.call().unwrap().state(), CallState::Connecting);

    shell.tick(at(t0, 1_999));
    assert_eq!(shell.call().unwrap().state(), CallState::Connecting);
    shell.tick(at(t0, 2_000));
    assert_eq!(shell.call().unwrap().state(), CallState::Active);

    // Two feed periods: entries at 7 s and 12 s.
    assert_eq!(shell.tick(at(t0, 12_000)), 2);
    assert_eq!(shell.transcript().unwrap().len(), seeded + 2);

    // End mid-interval; the 17 s tick must never land.
    assert!(shell.dispatch(DialogAction::EndCall, at(t0, 14_500)));
    assert_eq!(shell.call().unwrap().state(), CallState::Ended);
    let after_end = shell.transcript().unwrap().len();

    shell.tick(at(t0, 15_499));
    assert_eq!(shell.call().unwrap().state(), CallState::Ended);
    assert_eq!(shell.tick(at(t0, 60_000)), 0);
    assert_eq!(shell.call().unwrap().state(), CallState::Idle);
    assert_eq!(shell.transcript().unwrap().len(), after_end);
}

#[test]
fn feed_entries_are_well_formed() {
    let (mut shell, _, t0) = open_shell();
    shell.dispatch(DialogAction::StartCall, t0);
    shell.tick(at(t0, 2_000 + 5_000 * 4));
    let entries = shell.transcript().unwrap().entries();
    assert_eq!(entries.len(), 6);
    for pair in entries.windows(2) {
        assert!(pair[0].id() < pair[1].id());
    }
    for entry in &entries[2..] {
        assert!((0.85..=1.0).contains(&entry.confidence()));
        assert!(["John Doe", "Sarah Smith"].contains(&entry.speaker()));
    }
}

#[test]
fn three_panels_form_two_columns() {
    let (mut shell, _, t0) = open_shell();
    assert!(shell.dispatch(DialogAction::AddPanel(PanelKind::Analytics), t0));
    assert!(shell.dispatch(DialogAction::AddPanel(PanelKind::Keywords), t0));

    let panels = shell.panels().unwrap();
    let kinds: Vec<PanelKind> = panels.panels().iter().map(InsightPanel::kind).collect();
    assert_eq!(
        kinds,
        vec![PanelKind::Sentiment, PanelKind::Analytics, PanelKind::Keywords]
    );
    let ids: Vec<PanelId> = panels.panels().iter().map(InsightPanel::id).collect();

    let view = shell.view(t0).unwrap();
    let body = view.body.unwrap();
    assert_eq!(body.arrangement.column_count, 2);
    assert_eq!(body.arrangement.columns, vec![vec![ids[0], ids[1]], vec![ids[2]]]);
    assert!((body.arrangement.transcript_share - 1.0 / 3.0).abs() < 1e-6);
    assert_eq!(body.regions.columns.len(), 2);
    assert_eq!(body.placed_panels().count(), 3);
}

#[test]
fn fifth_panel_and_duplicates_are_refused() {
    let (mut shell, _, t0) = open_shell();
    for kind in [PanelKind::Analytics, PanelKind::Keywords, PanelKind::Actions] {
        assert!(shell.dispatch(DialogAction::AddPanel(kind), t0));
    }
    assert!(!shell.dispatch(DialogAction::AddPanel(PanelKind::Timeline), t0));
    assert!(!shell.dispatch(DialogAction::AddPanel(PanelKind::Keywords), t0));
    assert_eq!(shell.panels().unwrap().len(), 4);
    assert!(shell.view(t0).unwrap().body.unwrap().available_kinds.is_empty());
}

#[test]
fn minimize_then_restore_is_bit_identical() {
    let (mut shell, _, t0) = open_shell();
    shell.handle_pointer(PointerEvent::down(133.3, 117.7), t0);
    shell.handle_pointer(PointerEvent::moved(151.9, 171.1), t0);
    shell.handle_pointer(PointerEvent::up(151.9, 171.1), t0);
    // Window now sits near (118.6, 153.4); grab its bottom-right corner.
    let outcome = shell.handle_pointer(PointerEvent::down(910.0, 745.0), t0);
    assert_eq!(outcome, PointerOutcome::GestureStarted(GestureKind::WindowResize));
    shell.handle_pointer(PointerEvent::moved(970.5, 786.25), t0);
    shell.handle_pointer(PointerEvent::up(970.5, 786.25), t0);
    let before = shell.window().unwrap().normal_geometry();

    assert!(shell.dispatch(DialogAction::Minimize, t0));
    let card = shell.view(t0).unwrap();
    assert_eq!(card.mode, WindowMode::Minimized);
    assert!(card.body.is_none());
    assert_eq!(card.title, "Call Dialog");

    assert!(shell.dispatch(DialogAction::Restore, t0));
    let restored = shell.view(t0).unwrap().bounds;
    assert_eq!(restored.x.to_bits(), before.x.to_bits());
    assert_eq!(restored.y.to_bits(), before.y.to_bits());
    assert_eq!(restored.width.to_bits(), before.width.to_bits());
    assert_eq!(restored.height.to_bits(), before.height.to_bits());
}

#[test]
fn close_during_active_call_is_rejected() {
    let (mut shell, closes, t0) = open_shell();
    shell.dispatch(DialogAction::StartCall, t0);
    shell.dispatch(DialogAction::ToggleMaximize, t0);
    shell.tick(at(t0, 2_000));

    let mode_before = shell.window().unwrap().mode();
    assert_eq!(
        shell.request_close(at(t0, 3_000)),
        CloseOutcome::Rejected(CloseRejection::CallActive)
    );
    assert_eq!(closes.get(), 0);
    assert!(shell.is_open());
    assert_eq!(shell.call().unwrap().state(), CallState::Active);
    assert_eq!(shell.window().unwrap().mode(), mode_before);
    assert!(!shell.view(at(t0, 3_000)).unwrap().controls.close_enabled);
}

#[test]
fn close_while_connecting_tears_down_timers() {
    let (mut shell, closes, t0) = open_shell();
    shell.dispatch(DialogAction::StartCall, t0);
    assert!(shell.request_close(at(t0, 500)).is_closed());
    assert_eq!(closes.get(), 1);
    shell.set_open(false);
    assert!(!shell.is_open());
    assert_eq!(shell.tick(at(t0, 60_000)), 0);
    assert!(shell.view(at(t0, 60_000)).is_none());
}

#[test]
fn unmount_during_active_call_stops_feed() {
    let (mut shell, _, t0) = open_shell();
    let seeded = shell.transcript().unwrap().len();
    shell.dispatch(DialogAction::StartCall, t0);
    shell.tick(at(t0, 2_000));
    assert_eq!(shell.tick(at(t0, 7_000)), 1);
    assert!(shell.call().unwrap().feed_running());

    // The host unmounts mid-interval; the 12 s tick must never land.
    shell.set_open(false);
    assert!(shell.transcript().is_none());
    assert_eq!(shell.tick(at(t0, 9_999)), 0);
    assert_eq!(shell.tick(at(t0, 60_000)), 0);

    // A fresh session starts from the seed, with no stale feed attached.
    shell.set_open(true);
    assert_eq!(shell.call().unwrap().state(), CallState::Idle);
    assert_eq!(shell.transcript().unwrap().len(), seeded);
    assert_eq!(shell.tick(at(t0, 120_000)), 0);
    assert_eq!(shell.transcript().unwrap().len(), seeded);
}

#[test]
fn minimized_card_close_button_requests_close() {
    let (mut shell, closes, t0) = open_shell();
    shell.dispatch(DialogAction::Minimize, t0);
    // Card spans x 960..1260, y 720..780; the close button is its right square.
    let outcome = shell.handle_pointer(PointerEvent::down(1230.0, 750.0), t0);
    assert_eq!(outcome, PointerOutcome::CloseRequested(CloseOutcome::Closed));
    assert_eq!(closes.get(), 1);
}

#[test]
fn status_line_tracks_call() {
    let (mut shell, _, t0) = open_shell();
    assert_eq!(shell.view(t0).unwrap().status, "Ready to connect");
    shell.dispatch(DialogAction::StartCall, t0);
    assert_eq!(shell.view(t0).unwrap().status, "Connecting...");
    shell.tick(at(t0, 2_000));
    let view = shell.view(at(t0, 2_000 + 83_000)).unwrap();
    assert_eq!(view.status, "Connected • 01:23");
    assert!(view.live);
    assert_eq!(view.activity_labels(), Some(("Recording", "Listening...")));
    assert_eq!(view.body.unwrap().quick_stats.duration, "01:23");
}

#[test]
fn custom_data_collaborator_is_used() {
    let data = CannedData::new(99);
    let props = HostProps {
        open: true,
        initial_position: None,
    };
    let shell = DialogShell::with_data(DialogConfig::default(), props, data, || {});
    let view = shell.view(Instant::now()).unwrap();
    assert_eq!(view.bounds.origin(), Point::new(100.0, 100.0));
    assert_eq!(view.body.unwrap().quick_stats.participants, 2);
}
