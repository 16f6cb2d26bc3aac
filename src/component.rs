use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use sentry_core::protocol::User;
use sentry_core::{Client, ClientOptions, Hub};

use crate::config::SentryConfig;
use crate::converters::public_dsn;
use crate::error::Result;
use crate::integration::{install_panic_handler, ErrorHandlerIntegration};

/// Source of the end user the current process works for.
pub trait UserIdentity: Send + Sync {
    /// `false` for guests; no user context is attached then.
    fn is_authenticated(&self) -> bool;
    /// Identifier of the authenticated user.
    fn id(&self) -> String;
    /// Display name of the authenticated user.
    fn name(&self) -> String;
}

/// Owns the Sentry client of an application.
///
/// The client is built on first use and lives as long as the component.
pub struct SentryComponent {
    options: ClientOptions,
    dsn: Option<String>,
    use_error_handler: bool,
    hub: Arc<Hub>,
    identity: Option<Arc<dyn UserIdentity>>,
    client: OnceCell<Arc<Client>>,
    initialized: AtomicBool,
}

impl SentryComponent {
    /// Creates a component from its settings, failing fast on a bad DSN.
    pub fn new(config: &SentryConfig) -> Result<Self> {
        let mut component = Self::with_options(config.client_options()?);
        component.dsn = config.dsn.clone().filter(|dsn| !dsn.is_empty());
        component.use_error_handler = config.use_error_handler;
        Ok(component)
    }

    /// Creates a component from ready-made client options.
    ///
    /// The client is bound to the process-wide main hub unless
    /// [`with_hub`](Self::with_hub) says otherwise.
    pub fn with_options(options: ClientOptions) -> Self {
        let dsn = options.dsn.as_ref().map(|dsn| dsn.to_string());
        Self {
            options: options.add_integration(ErrorHandlerIntegration),
            dsn,
            use_error_handler: false,
            hub: Hub::main(),
            identity: None,
            client: OnceCell::new(),
            initialized: AtomicBool::new(false),
        }
    }

    /// Binds the client to `hub` instead of the main hub.
    pub fn with_hub(mut self, hub: Arc<Hub>) -> Self {
        self.hub = hub;
        self
    }

    /// Sets where the user context comes from.
    pub fn with_identity(mut self, identity: Arc<dyn UserIdentity>) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Installs the panic handler on [`init`](Self::init) when enabled.
    pub fn with_error_handler(mut self, enabled: bool) -> Self {
        self.use_error_handler = enabled;
        self
    }

    /// Marks the component ready for routes, installing the panic handler
    /// if configured. Calling it again does nothing.
    pub fn init(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return;
        }
        if self.use_error_handler {
            self.register_error_handlers();
        }
    }

    /// `true` after [`init`](Self::init).
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// The hub events are captured on.
    pub fn hub(&self) -> &Arc<Hub> {
        &self.hub
    }

    /// Returns the client, building and binding it on the first call.
    pub fn client(&self) -> Arc<Client> {
        self.client.get_or_init(|| self.build_client()).clone()
    }

    /// Returns the client only if it has been built already.
    pub fn existing_client(&self) -> Option<Arc<Client>> {
        self.client.get().cloned()
    }

    fn build_client(&self) -> Arc<Client> {
        let client = Arc::new(Client::with_options(self.options.clone()));
        self.hub.bind_client(Some(client.clone()));

        if let Some(user) = self.user_context() {
            self.hub.configure_scope(|scope| scope.set_user(Some(user)));
        }

        tracing::debug!(enabled = client.is_enabled(), "constructed Sentry client");
        client
    }

    /// User context for the current identity, `None` for guests.
    ///
    /// The name is uppercased.
    pub fn user_context(&self) -> Option<User> {
        let identity = self.identity.as_ref()?;
        if !identity.is_authenticated() {
            return None;
        }

        Some(User {
            id: Some(identity.id()),
            username: Some(identity.name().to_uppercase()),
            ..Default::default()
        })
    }

    /// The configured DSN without its secret key, for browser reporting.
    pub fn js_dsn(&self) -> Option<String> {
        self.dsn.as_deref().map(public_dsn)
    }

    /// Makes sure the client exists, then installs the process-wide panic
    /// handler.
    ///
    /// Returns `false` when the client cannot send anything (no DSN). The
    /// handler is installed once per process however often this is called.
    pub fn register_error_handlers(&self) -> bool {
        let client = self.client();
        if !client.is_enabled() {
            tracing::debug!("Sentry client disabled, panic handler not installed");
            return false;
        }

        install_panic_handler(self.hub.clone());
        true
    }

    /// Flushes and shuts down the client if it was ever built.
    pub fn close(&self, timeout: Option<Duration>) -> bool {
        match self.existing_client() {
            Some(client) => client.close(timeout),
            None => true,
        }
    }
}
