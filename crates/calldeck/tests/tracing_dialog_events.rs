#![forbid(unsafe_code)]

//! Structured log events emitted by the dialog.
//!
//! Captures events through a `tracing_subscriber` layer and checks targets,
//! levels and key fields for state changes and policy rejections.
//!
//! Run:
//!   cargo test -p calldeck --test tracing_dialog_events

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use calldeck::prelude::*;
use tracing_subscriber::layer::SubscriberExt;

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    target: String,
    message: String,
    fields: HashMap<String, String>,
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let mut fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.remove("message").unwrap_or_default();
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message,
            fields,
        });
    }
}

fn capture<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: Arc::clone(&events),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn shell() -> DialogShell {
    let props = HostProps {
        open: true,
        initial_position: None,
    };
    DialogShell::new(DialogConfig::default(), props, || {})
}

#[test]
fn call_transitions_log_at_info() {
    let t0 = Instant::now();
    let events = capture(|| {
        let mut s = shell();
        s.dispatch(DialogAction::StartCall, t0);
        s.tick(t0 + Duration::from_secs(2));
    });
    let transitions: Vec<(String, String)> = events
        .iter()
        .filter(|e| e.target == "calldeck.call" && e.message == "call state changed")
        .map(|e| {
            assert_eq!(e.level, tracing::Level::INFO);
            (e.fields["from"].clone(), e.fields["to"].clone())
        })
        .collect();
    assert_eq!(
        transitions,
        vec![
            ("idle".to_string(), "connecting".to_string()),
            ("connecting".to_string(), "active".to_string()),
        ]
    );
}

#[test]
fn close_rejection_is_logged_not_errored() {
    let t0 = Instant::now();
    let events = capture(|| {
        let mut s = shell();
        s.dispatch(DialogAction::StartCall, t0);
        s.tick(t0 + Duration::from_secs(2));
        s.request_close(t0 + Duration::from_secs(3));
    });
    assert!(
        events
            .iter()
            .any(|e| e.target == "calldeck.window" && e.message.contains("close rejected"))
    );
    assert!(events.iter().all(|e| e.level != tracing::Level::ERROR));
}

#[test]
fn panel_changes_carry_ids_and_kinds() {
    let t0 = Instant::now();
    let events = capture(|| {
        let mut s = shell();
        s.dispatch(DialogAction::AddPanel(PanelKind::Keywords), t0);
        s.dispatch(DialogAction::AddPanel(PanelKind::Keywords), t0);
    });
    let added = events
        .iter()
        .find(|e| {
            e.target == "calldeck.panels"
                && e.message == "panel added"
                && e.fields["kind"] == "keywords"
        })
        .expect("panel added event");
    assert!(added.fields.contains_key("panel_id"));
    assert!(
        events
            .iter()
            .any(|e| e.target == "calldeck.panels" && e.message.contains("already present"))
    );
}

#[test]
fn unmount_reports_cancelled_timers() {
    let t0 = Instant::now();
    let events = capture(|| {
        let mut s = shell();
        s.dispatch(DialogAction::StartCall, t0);
        s.set_open(false);
    });
    let closed = events
        .iter()
        .find(|e| e.target == "calldeck.shell" && e.message == "dialog closed")
        .expect("dialog closed event");
    assert_eq!(closed.fields["cancelled_timers"], "1");
}
