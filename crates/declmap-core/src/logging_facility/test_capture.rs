//! In-memory event capture for tests
//!
//! `init_test_capture` installs a process-wide subscriber that records every
//! event; tests then look events up by operation, or read back echoed SQL.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::schema::{FIELD_COMPONENT, FIELD_EVENT, FIELD_OP, FIELD_SQL, SQL_TARGET};

/// One recorded event
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
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

    pub fn event(&self) -> Option<&str> {
        self.field(FIELD_EVENT)
    }

    /// The free-text message, if the event has one
    pub fn message(&self) -> Option<&str> {
        self.field("message")
    }
}

#[derive(Default)]
struct FieldRecorder(BTreeMap<String, String>);

impl Visit for FieldRecorder {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    // Integers, bools and messages arrive here
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

/// Shared handle over the recorded events
#[derive(Clone, Default)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    /// Snapshot of everything recorded so far
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn events_for(&self, op: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.op() == Some(op))
            .collect()
    }

    /// Statements emitted by engines with echo enabled
    pub fn sql_statements(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|e| e.target == SQL_TARGET)
            .filter_map(|e| e.field(FIELD_SQL).map(str::to_string))
            .collect()
    }

    /// # Panics
    ///
    /// Panics if no event for `op` carries the given `event` value.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let matching = self.events_for(op);
        assert!(
            matching.iter().any(|e| e.event() == Some(event)),
            "no '{}' event for op '{}' (saw {:?})",
            event,
            op,
            matching.iter().map(|e| e.event()).collect::<Vec<_>>()
        );
    }

    fn push(&self, event: CapturedEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

struct CaptureLayer {
    sink: TestCapture,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut recorder = FieldRecorder::default();
        event.record(&mut recorder);

        let metadata = event.metadata();
        self.sink.push(CapturedEvent {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            fields: recorder.0,
        });
    }
}

static CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture subscriber (once per process) and return its handle
///
/// All tests in one binary share the handle, so assertions should key on a
/// value unique to the test.
///
/// ```
/// use declmap_core::logging_facility::test_capture::init_test_capture;
/// use declmap_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_example_op");
/// capture.assert_event_exists("doc_example_op", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    CAPTURE
        .get_or_init(|| {
            let sink = TestCapture::default();
            tracing_subscriber::registry()
                .with(CaptureLayer { sink: sink.clone() })
                .init();
            sink
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_accessors_read_canonical_keys() {
        let fields = [(FIELD_OP, "commit"), (FIELD_EVENT, "end"), ("rows", "2")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let event = CapturedEvent {
            level: Level::INFO,
            target: "declmap_store::session".to_string(),
            fields,
        };

        assert_eq!(event.op(), Some("commit"));
        assert_eq!(event.event(), Some("end"));
        assert_eq!(event.field("rows"), Some("2"));
        assert_eq!(event.component(), None);
    }
}
