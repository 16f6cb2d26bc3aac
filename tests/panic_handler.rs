use std::sync::Arc;

use sentry_core::test::TestTransport;
use sentry_core::{ClientOptions, Hub, Level, Scope};
use sentry_log_route::{panic_handler_installed, SentryComponent};

// Installs a process-wide hook, so this is the only test in this binary.
#[test]
fn panics_are_reported_as_fatal_events() {
    let transport = TestTransport::new();
    let options = ClientOptions {
        dsn: Some("https://public@sentry.invalid/1".parse().unwrap()),
        transport: Some(Arc::new(transport.clone())),
        ..Default::default()
    };
    let hub = Arc::new(Hub::new(None, Arc::new(Scope::default())));
    let component = SentryComponent::with_options(options)
        .with_hub(hub)
        .with_error_handler(true);

    assert!(!panic_handler_installed());
    component.init();
    assert!(panic_handler_installed());
    assert!(component.register_error_handlers());

    let result = std::panic::catch_unwind(|| panic!("kaboom"));
    assert!(result.is_err());

    let events = transport.fetch_and_clear_events();
    assert_eq!(events.len(), 1, "hook must only be installed once");
    assert_eq!(events[0].level, Level::Fatal);
    let exception = &events[0].exception.values[0];
    assert_eq!(exception.ty, "panic");
    assert_eq!(exception.value.as_deref(), Some("kaboom"));
    assert_eq!(
        exception.mechanism.as_ref().and_then(|mechanism| mechanism.handled),
        Some(false)
    );
}
