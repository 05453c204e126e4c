//! Control config — the controller document holding `metadata` and named
//! sections such as `fapis`.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::section::ConfigSection;

/// Key of the section listing sub-APIs.
pub const FAPIS_SECTION: &str = "fapis";

/// Identity of the controller owning the config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Metadata {
    pub uid: String,
    #[serde(default)]
    pub api: Option<String>,
    #[serde(default)]
    pub info: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// A parsed controller config file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ControlConfig {
    pub metadata: Metadata,
    /// Every other top-level key, by name.
    #[serde(flatten)]
    pub sections: Map<String, Value>,
}

impl ControlConfig {
    /// Parse a controller config from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the decoder error when the text is not JSON or has no valid
    /// `metadata` object.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Remove and return a section, with its [`ConfigSection`] identity.
    ///
    /// A missing section comes back as `null`.
    #[must_use]
    pub fn take_section(&mut self, key: &str) -> (ConfigSection, Value) {
        let value = self.sections.remove(key).unwrap_or(Value::Null);
        let mut section = ConfigSection::new(key).with_uid(self.metadata.uid.clone());
        section.info.clone_from(&self.metadata.info);
        (section, value)
    }
}
