//! Capture of keeper spans
//!
//! [`SpanRecorder`] is a `tracing-subscriber` layer that remembers the
//! `operation` field of every span opened while it is the thread's default
//! subscriber.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id};
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::Registry;

/// Records span operations in the order they were opened
#[derive(Debug, Clone, Default)]
pub struct SpanRecorder {
    operations: Arc<Mutex<Vec<String>>>,
}

impl SpanRecorder {
    /// Empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with this recorder as the thread's subscriber
    pub fn record<T>(&self, f: impl FnOnce() -> T) -> T {
        let subscriber = Registry::default().with(self.clone());
        tracing::subscriber::with_default(subscriber, f)
    }

    /// Operations seen so far
    pub fn operations(&self) -> Vec<String> {
        self.operations.lock().clone()
    }

    /// Forget everything recorded
    pub fn clear(&self) {
        self.operations.lock().clear();
    }
}

impl<S: Subscriber> Layer<S> for SpanRecorder {
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        let mut visitor = OperationField(None);
        attrs.record(&mut visitor);
        if let Some(operation) = visitor.0 {
            self.operations.lock().push(operation);
        }
    }
}

struct OperationField(Option<String>);

impl Visit for OperationField {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "operation" {
            self.0 = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "operation" {
            self.0 = Some(format!("{value:?}"));
        }
    }
}
