#![forbid(unsafe_code)]

//! Log events and spans emitted by the viewport and the reactive cells.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use waypoint_core::{Event, ScreenSize};
use waypoint_runtime::{BatchScope, LayoutQuery, Observable, Viewport};

#[derive(Debug, Clone)]
struct Captured {
    level: tracing::Level,
    fields: HashMap<String, String>,
    span: Option<String>,
}

#[derive(Default, Clone)]
struct Capture {
    events: Arc<Mutex<Vec<Captured>>>,
    spans: Arc<Mutex<Vec<String>>>,
}

struct FieldVisitor(HashMap<String, String>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        self.spans
            .lock()
            .unwrap()
            .push(attrs.metadata().name().to_string());
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(HashMap::new());
        event.record(&mut visitor);
        let span = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|s| s.name().to_string());
        self.events.lock().unwrap().push(Captured {
            level: *event.metadata().level(),
            fields: visitor.0,
            span,
        });
    }
}

fn capture(f: impl FnOnce()) -> Capture {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(capture.clone());
    tracing::subscriber::with_default(subscriber, f);
    capture
}

fn message(e: &Captured) -> &str {
    e.fields.get("message").map_or("", String::as_str)
}

#[test]
fn rejected_resize_warns_with_dimensions() {
    let captured = capture(|| {
        let viewport = Viewport::new(ScreenSize::new(800.0, 600.0)).unwrap();
        assert!(viewport.resize(ScreenSize::new(0.0, 600.0)).is_err());
        assert!(!viewport.handle_event(&Event::resize(ScreenSize::new(-1.0, 5.0))));
    });
    let events = captured.events.lock().unwrap();
    let warns: Vec<_> = events
        .iter()
        .filter(|e| e.level == tracing::Level::WARN)
        .collect();
    assert_eq!(warns.len(), 2);
    assert_eq!(message(warns[0]), "rejected resize");
    assert_eq!(warns[0].fields.get("width").map(String::as_str), Some("0"));
    assert!(warns[0].fields.contains_key("error"));
}

#[test]
fn layout_recompute_is_debug_inside_propagation_span() {
    let captured = capture(|| {
        let viewport = Viewport::new(ScreenSize::new(800.0, 600.0)).unwrap();
        let _layout = viewport.watch_layout(LayoutQuery::any());
        viewport.resize(ScreenSize::new(2560.0, 1080.0)).unwrap();
    });
    let events = captured.events.lock().unwrap();
    let recomputed: Vec<_> = events
        .iter()
        .filter(|e| message(e) == "layout recomputed")
        .collect();
    // Once at watch creation, once on resize.
    assert_eq!(recomputed.len(), 2);
    assert!(recomputed.iter().all(|e| e.level == tracing::Level::DEBUG));
    assert_eq!(recomputed[1].span.as_deref(), Some("waypoint.propagate"));
    assert_eq!(
        recomputed[1].fields.get("resolved").map(String::as_str),
        Some("DesktopLandscape")
    );
}

#[test]
fn batch_flush_opens_its_own_span() {
    let captured = capture(|| {
        let cell = Observable::new(0u32);
        let _sub = cell.subscribe(|_| {});
        let _batch = BatchScope::new();
        cell.set(1);
        cell.set(2);
    });
    let spans = captured.spans.lock().unwrap();
    assert!(spans.iter().any(|s| s == "waypoint.batch_flush"));
    // Notifications were deferred, so no direct propagation happened.
    assert!(!spans.iter().any(|s| s == "waypoint.propagate"));
}
