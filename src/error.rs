use thiserror::Error;

/// Result type alias for setup operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while setting up a component or a log route.
///
/// Nothing on the logging path returns these; a broken Sentry setup must
/// never break the application that logs.
#[derive(Debug, Error)]
pub enum Error {
    /// The configured DSN could not be parsed.
    #[error("invalid DSN: {0}")]
    InvalidDsn(#[from] sentry_core::types::ParseDsnError),

    /// The configured stack trace pattern is not a valid regex.
    #[error("invalid trace pattern: {0}")]
    InvalidTracePattern(#[from] regex::Error),

    /// The configured stack trace pattern lacks a required named group.
    #[error("trace pattern has no `{0}` group")]
    MissingTraceGroup(&'static str),

    /// A configuration value had the wrong shape.
    #[error("bad configuration: {0}")]
    Config(#[from] serde_json::Error),
}
