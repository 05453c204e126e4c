//! Lifecycle of a declared API.
//!
//! ```text
//! Declared ──load ok──▶ Loaded
//!     │
//!     └──load failed──▶ Failed
//! ```
//!
//! Both `Loaded` and `Failed` are terminal; a descriptor rejected before
//! declaration never gets a state at all.

use serde::{Deserialize, Serialize};

/// Where a declared API stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiState {
    #[default]
    Declared,
    Loaded,
    Failed,
}

impl ApiState {
    /// State after the loader ran with the given outcome.
    ///
    /// Returns `None` when the API already left [`Declared`](Self::Declared).
    #[must_use]
    pub fn after_load(self, succeeded: bool) -> Option<Self> {
        match self {
            Self::Declared if succeeded => Some(Self::Loaded),
            Self::Declared => Some(Self::Failed),
            Self::Loaded | Self::Failed => None,
        }
    }
}

impl std::fmt::Display for ApiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Declared => f.write_str("declared"),
            Self::Loaded => f.write_str("loaded"),
            Self::Failed => f.write_str("failed"),
        }
    }
}
