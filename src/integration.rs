use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use sentry_core::{ClientOptions, Hub, Integration};

use crate::converters::event_from_panic_info;

static PANIC_HANDLER_INSTALLED: AtomicBool = AtomicBool::new(false);

/// How long the panic handler waits for the client to drain on shutdown.
pub const PANIC_FLUSH_TIMEOUT: Duration = Duration::from_secs(2);

/// A Sentry [Integration] that keeps panic machinery out of the stack
/// traces reported by the process-wide panic handler.
#[derive(Debug, Default)]
pub struct ErrorHandlerIntegration;

impl Integration for ErrorHandlerIntegration {
    fn name(&self) -> &'static str {
        "log-route-error-handler"
    }

    fn setup(&self, cfg: &mut ClientOptions) {
        cfg.in_app_exclude.push("std::panicking::");
        cfg.in_app_exclude.push("core::panicking::");
        cfg.in_app_exclude.push("sentry_log_route::");
        cfg.extra_border_frames.push("std::panicking::begin_panic");
        cfg.extra_border_frames.push("core::panicking::panic_fmt");
        cfg.extra_border_frames
            .push("sentry_log_route::integration::install_panic_handler");
    }
}

/// Installs the process-wide panic handler that reports through `hub`.
///
/// Only the first call in a process installs anything; later calls return
/// `false` and leave the existing chain alone. The handler captures the
/// panic as a fatal event, closes the client so the event is sent before
/// the process goes down, then runs whichever handler was installed before it.
pub fn install_panic_handler(hub: Arc<Hub>) -> bool {
    if PANIC_HANDLER_INSTALLED.swap(true, Ordering::SeqCst) {
        return false;
    }

    let next = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        hub.capture_event(event_from_panic_info(info));
        if let Some(client) = hub.client() {
            client.close(Some(PANIC_FLUSH_TIMEOUT));
        }
        next(info);
    }));

    tracing::debug!("installed Sentry panic handler");
    true
}

/// `true` once the process-wide panic handler is in place.
pub fn panic_handler_installed() -> bool {
    PANIC_HANDLER_INSTALLED.load(Ordering::SeqCst)
}
