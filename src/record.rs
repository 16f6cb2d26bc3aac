use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// One buffered log entry, as delivered to a route at flush time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// The logged text, possibly followed by a `Stack trace:` section.
    pub message: String,
    /// Level name as emitted by the logger (`error`, `warn`, `trace`, ...).
    pub level: String,
    /// Logger category, usually the module or target that logged.
    pub category: String,
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
}

impl LogRecord {
    /// Creates a record stamped with the current time.
    pub fn new(
        message: impl Into<String>,
        level: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            level: level.into(),
            category: category.into(),
            timestamp: now(),
        }
    }
}

pub(crate) fn now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs_f64())
        .unwrap_or_default()
}
