//! Event dispatch port — receives the events of subscribed APIs.

use fapis_domain::event::ApiEvent;

/// Handles events delivered to an API.
pub trait EventDispatcher: Send + Sync {
    /// Handle `event`, received by the API named `api`.
    fn dispatch(&self, api: &str, event: &ApiEvent);
}
