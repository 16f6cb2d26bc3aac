use std::sync::Arc;

use once_cell::sync::OnceCell;
use sentry_core::Hub;
use serde_json::Value;

use crate::component::SentryComponent;
use crate::config::{LogRouteConfig, NameList};
use crate::converters::{convert_log_record, TracePattern};
use crate::error::Result;
use crate::record::LogRecord;
use crate::registry::ComponentRegistry;

/// Where a route finds the component it reports through.
pub enum ComponentSource {
    /// A component handed over directly.
    Direct(Arc<SentryComponent>),
    /// A component looked up by id when logs are processed.
    Registry {
        /// Registry to search.
        registry: Arc<ComponentRegistry>,
        /// Id the component is registered under.
        id: String,
    },
}

/// Forwards batches of log records to Sentry, one event per record.
pub struct SentryLogRoute {
    source: ComponentSource,
    resolved: OnceCell<Arc<SentryComponent>>,
    except: NameList,
    levels: NameList,
    trace_pattern: TracePattern,
    strip_ansi_escapes: bool,
}

impl SentryLogRoute {
    /// Creates a route reporting through `component`.
    pub fn new(component: Arc<SentryComponent>) -> Self {
        Self::from_source(ComponentSource::Direct(component))
    }

    /// Creates a route from its settings that finds its component in
    /// `registry` under `config.sentry_component`.
    ///
    /// An invalid `trace_pattern` is reported here, not when logging.
    pub fn from_config(config: &LogRouteConfig, registry: Arc<ComponentRegistry>) -> Result<Self> {
        let source = ComponentSource::Registry {
            registry,
            id: config.sentry_component.clone(),
        };
        let trace_pattern = match &config.trace_pattern {
            Some(pattern) => TracePattern::new(pattern)?,
            None => TracePattern::default(),
        };

        Ok(Self {
            except: config.except.clone(),
            levels: config.levels.clone(),
            trace_pattern,
            strip_ansi_escapes: config.strip_ansi_escapes,
            ..Self::from_source(source)
        })
    }

    /// Creates a route with default settings around `source`.
    pub fn from_source(source: ComponentSource) -> Self {
        Self {
            source,
            resolved: OnceCell::new(),
            except: NameList::default(),
            levels: NameList::default(),
            trace_pattern: TracePattern::default(),
            strip_ansi_escapes: true,
        }
    }

    /// Never forwards records of these categories.
    pub fn with_except(mut self, except: impl Into<NameList>) -> Self {
        self.except = except.into();
        self
    }

    /// Forwards only records of these levels.
    pub fn with_levels(mut self, levels: impl Into<NameList>) -> Self {
        self.levels = levels.into();
        self
    }

    /// Uses a custom stack trace pattern.
    pub fn with_trace_pattern(mut self, pattern: TracePattern) -> Self {
        self.trace_pattern = pattern;
        self
    }

    /// Whether ANSI escapes are removed from event titles.
    pub fn with_strip_ansi_escapes(mut self, strip: bool) -> Self {
        self.strip_ansi_escapes = strip;
        self
    }

    /// `true` when this route would forward `record`.
    pub fn accepts(&self, record: &LogRecord) -> bool {
        if self.except.contains(&record.category) {
            return false;
        }
        self.levels.is_empty() || self.levels.contains(&record.level)
    }

    /// Sends every accepted record of `logs` to Sentry, in order.
    ///
    /// Never fails: a missing or uninitialised component skips the whole
    /// batch with a trace note. Empty batches do not touch the component.
    pub fn process_logs(&self, logs: &[LogRecord]) {
        if logs.is_empty() {
            return;
        }

        let component = match self.component() {
            Some(component) => component,
            None => return,
        };
        component.client();
        // Scopes are pushed on a batch-local hub; concurrent flushes must not
        // interleave guards on the shared one.
        let hub = Hub::new_from_top(component.hub().clone());

        for log in logs.iter().filter(|log| self.accepts(log)) {
            let event = convert_log_record(log, &self.trace_pattern, self.strip_ansi_escapes);
            hub.with_scope(
                |scope| {
                    scope.set_extra("category", Value::from(log.category.clone()));
                    scope.set_extra("timestamp", Value::from(log.timestamp));
                },
                || hub.capture_event(event),
            );
        }
    }

    fn component(&self) -> Option<Arc<SentryComponent>> {
        if let Some(component) = self.resolved.get() {
            return Some(component.clone());
        }

        let component = match &self.source {
            ComponentSource::Direct(component) => {
                if !component.is_initialized() {
                    tracing::trace!("Sentry component not initialised");
                    return None;
                }
                component.clone()
            }
            ComponentSource::Registry { registry, id } => {
                let component = match registry.component(id) {
                    Some(component) => component,
                    None => {
                        tracing::trace!("'{}' does not exist", id);
                        return None;
                    }
                };
                if !component.is_initialized() {
                    tracing::trace!("'{}' not initialised", id);
                    return None;
                }
                component
            }
        };

        Some(self.resolved.get_or_init(|| component).clone())
    }
}
