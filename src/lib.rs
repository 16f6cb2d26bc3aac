//! Forwards an application's buffered logs to Sentry.
//!
//! A [`SentryComponent`] owns the Sentry client, builds it on first use and
//! attaches the current user to it. A [`SentryLogRoute`] takes batches of
//! [`LogRecord`]s and captures one event per record: the level is mapped
//! onto a Sentry level, the title loses any embedded stack trace and the
//! trace itself is parsed into frames. [`LogBuffer`] collects `tracing`
//! events into such batches.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use tracing_subscriber::layer::SubscriberExt;
//!
//! let component = Arc::new(
//!     sentry_log_route::SentryComponent::new(&sentry_log_route::SentryConfig::default()).unwrap(),
//! );
//! component.init();
//!
//! let buffer = sentry_log_route::LogBuffer::new(100);
//! buffer.add_route(Arc::new(sentry_log_route::SentryLogRoute::new(component)));
//!
//! let subscriber = tracing_subscriber::registry().with(buffer.clone());
//! tracing::subscriber::with_default(subscriber, || {
//!     tracing::error!("Generates an event on flush");
//! });
//! buffer.flush();
//! ```
//!

#![doc(html_favicon_url = "https://sentry-brand.storage.googleapis.com/favicon.ico")]
#![doc(html_logo_url = "https://sentry-brand.storage.googleapis.com/sentry-glyph-black.png")]
#![warn(missing_docs)]

mod component;
mod config;
mod converters;
mod error;
mod integration;
mod layer;
mod record;
mod registry;
mod route;

pub use component::{SentryComponent, UserIdentity};
pub use config::{LogRouteConfig, NameList, SentryConfig};
pub use converters::{
    convert_log_level, convert_log_record, event_from_panic_info, event_title, public_dsn,
    record_from_event, StackFrame, TracePattern, DEFAULT_TRACE_PATTERN, LOGGER,
    STACK_TRACE_MARKER,
};
pub use error::{Error, Result};
pub use integration::{install_panic_handler, panic_handler_installed, ErrorHandlerIntegration};
pub use layer::LogBuffer;
pub use record::LogRecord;
pub use registry::ComponentRegistry;
pub use route::{ComponentSource, SentryLogRoute};
