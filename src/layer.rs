use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{Event, Subscriber};
use tracing_subscriber::{layer::Context, Layer};

use crate::converters::record_from_event;
use crate::record::LogRecord;
use crate::route::SentryLogRoute;

/// Records from this crate are never buffered, they would only feed back
/// into the routes.
const OWN_CRATE: &str = "sentry_log_route";

/// Buffers `tracing` events in memory and hands them to routes in batches.
///
/// Cloning is cheap; clones share the same buffer and routes, so one clone
/// can be installed as a layer while another is kept around to flush.
#[derive(Clone, Default)]
pub struct LogBuffer {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    records: Mutex<Vec<LogRecord>>,
    routes: Mutex<Vec<Arc<SentryLogRoute>>>,
    auto_flush: usize,
}

impl LogBuffer {
    /// Creates a buffer that flushes itself once it holds `auto_flush`
    /// records. `0` only flushes on [`flush`](Self::flush).
    pub fn new(auto_flush: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                auto_flush,
                ..Default::default()
            }),
        }
    }

    /// Adds a route that receives every flushed batch.
    pub fn add_route(&self, route: Arc<SentryLogRoute>) {
        self.inner.routes.lock().push(route);
    }

    /// Buffers one record, flushing if the buffer is full.
    pub fn log(&self, record: LogRecord) {
        let full = {
            let mut records = self.inner.records.lock();
            records.push(record);
            self.inner.auto_flush > 0 && records.len() >= self.inner.auto_flush
        };
        if full {
            self.flush();
        }
    }

    /// Delivers the buffered records to every route and empties the buffer.
    pub fn flush(&self) {
        let records = std::mem::take(&mut *self.inner.records.lock());
        let routes = self.inner.routes.lock().clone();
        for route in routes {
            route.process_logs(&records);
        }
    }

    /// Number of buffered records.
    pub fn len(&self) -> usize {
        self.inner.records.lock().len()
    }

    /// `true` when nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn is_own_target(target: &str) -> bool {
    match target.strip_prefix(OWN_CRATE) {
        Some(rest) => rest.is_empty() || rest.starts_with("::"),
        None => false,
    }
}

impl<S: Subscriber> Layer<S> for LogBuffer {
    /// Buffers the event as a log record.
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if is_own_target(event.metadata().target()) {
            return;
        }
        self.log(record_from_event(event));
    }
}
