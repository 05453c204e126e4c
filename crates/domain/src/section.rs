//! Config section — the controller section a batch of descriptors came from.

use serde::Deserialize;

/// Identity of the controller config section being processed.
///
/// Handed untouched to the control layer when a declared API loads, so
/// plugins can tell which section configured them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConfigSection {
    /// Section key in the control config (e.g. `"fapis"`).
    pub key: String,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub info: Option<String>,
}

impl ConfigSection {
    /// Section with only a key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            uid: None,
            info: None,
        }
    }

    #[must_use]
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }
}

impl std::fmt::Display for ConfigSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.uid {
            Some(uid) => write!(f, "{}({uid})", self.key),
            None => f.write_str(&self.key),
        }
    }
}
