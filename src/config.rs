use crate::error::Result;
use sentry_core::ClientOptions;
use serde::Deserialize;

/// Settings for a [`SentryComponent`](crate::SentryComponent).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SentryConfig {
    /// Sentry DSN. Without one the client is built but sends nothing.
    pub dsn: Option<String>,
    /// Environment tag for every event.
    pub environment: Option<String>,
    /// Release identifier for every event.
    pub release: Option<String>,
    /// Overrides the reported server name.
    pub server_name: Option<String>,
    /// Fraction of events to send, `1.0` when unset.
    pub sample_rate: Option<f32>,
    /// Turns on the SDK's own debug output.
    pub debug: bool,
    /// Attach a stack trace to message events captured by the SDK.
    pub attach_stacktrace: bool,
    /// Breadcrumb ring size, SDK default when unset.
    pub max_breadcrumbs: Option<usize>,
    /// Install the process-wide panic handler on `init()`.
    pub use_error_handler: bool,
}

impl SentryConfig {
    /// Parses the settings from an arbitrary configuration value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Builds the client options, failing on an unparsable DSN.
    pub fn client_options(&self) -> Result<ClientOptions> {
        let mut options = ClientOptions::default();
        if let Some(dsn) = self.dsn.as_deref().filter(|dsn| !dsn.is_empty()) {
            options.dsn = Some(dsn.parse()?);
        }
        if let Some(environment) = &self.environment {
            options.environment = Some(environment.clone().into());
        }
        if let Some(release) = &self.release {
            options.release = Some(release.clone().into());
        }
        if let Some(server_name) = &self.server_name {
            options.server_name = Some(server_name.clone().into());
        }
        if let Some(sample_rate) = self.sample_rate {
            options.sample_rate = sample_rate;
        }
        if let Some(max_breadcrumbs) = self.max_breadcrumbs {
            options.max_breadcrumbs = max_breadcrumbs;
        }
        options.debug = self.debug;
        options.attach_stacktrace = self.attach_stacktrace;
        Ok(options)
    }
}

/// Settings for a [`SentryLogRoute`](crate::SentryLogRoute).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogRouteConfig {
    /// Registry id of the component the route sends through.
    pub sentry_component: String,
    /// Categories that are never forwarded. Empty disables the filter.
    pub except: NameList,
    /// Levels that are forwarded. Empty forwards every level.
    pub levels: NameList,
    /// Regex for stack trace lines; needs `file`, `line`, `cls` and `func`
    /// groups. The built-in pattern is used when unset.
    pub trace_pattern: Option<String>,
    /// Remove ANSI escape sequences from event titles.
    pub strip_ansi_escapes: bool,
}

impl Default for LogRouteConfig {
    fn default() -> Self {
        Self {
            sentry_component: "sentry".into(),
            except: NameList::default(),
            levels: NameList::default(),
            trace_pattern: None,
            strip_ansi_escapes: true,
        }
    }
}

impl LogRouteConfig {
    /// Parses the settings from an arbitrary configuration value.
    ///
    /// `except` and `levels` accept either a list of strings or a single
    /// string separated by commas and/or whitespace; any other shape is an
    /// error.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// A lowercased set of names matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawNameList")]
pub struct NameList(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNameList {
    Text(String),
    List(Vec<String>),
}

impl From<RawNameList> for NameList {
    fn from(raw: RawNameList) -> Self {
        match raw {
            RawNameList::Text(text) => Self::parse(&text),
            RawNameList::List(names) => names.into_iter().collect(),
        }
    }
}

impl NameList {
    /// Splits `"a, b c"` style text into names.
    pub fn parse(text: &str) -> Self {
        text.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Case-insensitive membership.
    pub fn contains(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.0.iter().any(|entry| *entry == name)
    }

    /// `true` when no names are configured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> std::iter::FromIterator<S> for NameList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut names: Vec<String> = Vec::new();
        for name in iter {
            let name = name.as_ref().trim().to_lowercase();
            if !name.is_empty() && !names.contains(&name) {
                names.push(name);
            }
        }
        Self(names)
    }
}

impl From<&str> for NameList {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}
