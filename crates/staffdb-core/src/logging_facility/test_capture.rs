//! Test capture mode for boundary logging assertions
//!
//! `init_test_capture` installs a recording layer as the default subscriber
//! for the current thread only. Each test owns its buffer, so tests running in
//! parallel never see each other's events and may reuse real op names.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use staffdb_core_types::schema::{
    FIELD_COMPONENT, FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_ERR_KIND, FIELD_EVENT, FIELD_OP,
};
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One recorded event, keyed by canonical field name
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn component(&self) -> Option<&str> {
        self.field(FIELD_COMPONENT)
    }

    pub fn op(&self) -> Option<&str> {
        self.field(FIELD_OP)
    }

    /// Lifecycle marker: `start`, `end` or `end_error`
    pub fn event(&self) -> Option<&str> {
        self.field(FIELD_EVENT)
    }

    pub fn err_code(&self) -> Option<&str> {
        self.field(FIELD_ERR_CODE)
    }

    pub fn err_kind(&self) -> Option<&str> {
        self.field(FIELD_ERR_KIND)
    }

    pub fn duration_ms(&self) -> Option<u64> {
        self.field(FIELD_DURATION_MS)?.parse().ok()
    }
}

#[derive(Default)]
struct FieldRecorder(BTreeMap<String, String>);

impl FieldRecorder {
    fn put(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldRecorder {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.put(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.to_string());
    }
}

type Buffer = Arc<Mutex<Vec<CapturedEvent>>>;

/// Layer that appends every event to a shared buffer
pub struct CaptureLayer {
    buffer: Buffer,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut recorder = FieldRecorder::default();
        event.record(&mut recorder);

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            fields: recorder.0,
        };
        if let Ok(mut events) = self.buffer.lock() {
            events.push(captured);
        }
    }
}

/// Recorded events for the current thread
///
/// Capture stops when this value is dropped.
pub struct TestCapture {
    buffer: Buffer,
    _guard: DefaultGuard,
}

impl TestCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.buffer
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.op() == Some(op))
            .collect()
    }

    /// Lifecycle markers emitted for `op`, in emission order
    ///
    /// A successful boundary yields `["start", "end"]`, a failed one
    /// `["start", "end_error"]`.
    pub fn lifecycle(&self, op: &str) -> Vec<String> {
        self.events_for_op(op)
            .iter()
            .filter_map(|e| e.event().map(str::to_string))
            .collect()
    }

    /// Last event for `op` carrying the given lifecycle marker
    pub fn find(&self, op: &str, event: &str) -> Option<CapturedEvent> {
        self.events_for_op(op)
            .into_iter()
            .rev()
            .find(|e| e.event() == Some(event))
    }

    /// # Panics
    ///
    /// Panics if no event for `op` carries the `event` marker.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        assert!(
            self.find(op, event).is_some(),
            "Expected event op={} event={}, saw {:?}",
            op,
            event,
            self.lifecycle(op)
        );
    }
}

/// Start capturing events emitted on the current thread
///
/// ```
/// use staffdb_core::logging_facility::test_capture::init_test_capture;
/// use staffdb_core::{log_op_end, log_op_start};
///
/// let capture = init_test_capture();
/// log_op_start!("review_create");
/// log_op_end!("review_create", duration_ms = 2u64);
/// assert_eq!(capture.lifecycle("review_create"), ["start", "end"]);
/// ```
pub fn init_test_capture() -> TestCapture {
    let buffer = Buffer::default();
    let layer = CaptureLayer {
        buffer: buffer.clone(),
    };
    let guard = tracing_subscriber::registry().with(layer).set_default();
    TestCapture {
        buffer,
        _guard: guard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_is_scoped_to_guard() {
        let capture = init_test_capture();
        tracing::info!(op = "review_list", event = "start", row_count = 3u64, cached = true);

        let events = capture.events_for_op("review_list");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].field("row_count"), Some("3"));
        assert_eq!(events[0].field("cached"), Some("true"));
        assert_eq!(events[0].level, Level::INFO);

        drop(capture);
        let next = init_test_capture();
        assert!(next.events().is_empty());
    }

    #[test]
    fn test_duration_parses_only_numbers() {
        let mut fields = BTreeMap::new();
        fields.insert(FIELD_DURATION_MS.to_string(), "12".to_string());
        let event = CapturedEvent {
            level: Level::INFO,
            fields,
        };
        assert_eq!(event.duration_ms(), Some(12));
        assert_eq!(event.err_code(), None);
    }
}
