//! API event — a notification delivered to an API's event dispatcher.

use chrono::{DateTime, Utc};

/// UTC timestamp attached to events.
pub type Timestamp = DateTime<Utc>;

/// A named event with a JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiEvent {
    /// Full event name, usually `<api>/<event>`.
    pub name: String,
    pub data: serde_json::Value,
    pub received_at: Timestamp,
}

impl ApiEvent {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn new(name: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            data,
            received_at: Utc::now(),
        }
    }
}

impl std::fmt::Display for ApiEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn should_stamp_event_with_current_time() {
        let before = Utc::now();
        let event = ApiEvent::new("audio/volume", json!({"level": 3}));
        assert!(event.received_at >= before);
        assert!(event.received_at <= Utc::now());
    }

    #[test]
    fn should_display_event_name() {
        let event = ApiEvent::new("audio/volume", json!(null));
        assert_eq!(event.to_string(), "audio/volume");
        assert!(event.data.is_null());
    }
}
