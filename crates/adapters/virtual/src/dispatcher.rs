//! Event dispatcher that only logs.

use fapis_app::ports::EventDispatcher;
use fapis_domain::event::ApiEvent;

/// Logs each event it receives at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDispatcher;

impl EventDispatcher for TracingDispatcher {
    fn dispatch(&self, api: &str, event: &ApiEvent) {
        tracing::info!(
            api,
            event = %event.name,
            data = %event.data,
            received_at = %event.received_at,
            "event received"
        );
    }
}
