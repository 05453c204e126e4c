//! API descriptor — one entry of a `fapis` section.
//!
//! A descriptor declares one API: its name (`uid`), an optional description,
//! the plugin-level settings consumed by the control layer (`spath`, `libs`,
//! `lua`) and the `verbs` it exposes. The set of keys is closed; anything
//! else is rejected at decode time.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::SchemaError;

/// Strictly decoded fapi descriptor.
///
/// `info` and `spath` may be absent but, when present, must be strings.
/// `libs` and `lua` keep whatever value they hold, `null` included.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiDescriptor {
    /// Name of the API to declare.
    pub uid: String,
    /// Human readable description.
    #[serde(default, deserialize_with = "present")]
    pub info: Option<String>,
    /// Plugin search path.
    #[serde(default, deserialize_with = "present")]
    pub spath: Option<String>,
    /// Plugin libraries.
    #[serde(default, deserialize_with = "present")]
    pub libs: Option<Value>,
    /// Script payload.
    #[serde(default, deserialize_with = "present")]
    pub lua: Option<Value>,
    /// Verb definitions, opaque to the glue.
    pub verbs: Value,
}

/// A key that is present decodes as `Some`, even when its value is `null`.
/// Only an absent key (through `#[serde(default)]`) gives `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl ApiDescriptor {
    /// Decode a descriptor from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when `uid` or `verbs` is missing, when a field
    /// has the wrong type, or when the object carries any other key.
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        serde_json::from_value(value).map_err(SchemaError)
    }

    /// Detach the verbs, leaving the plugin-level config.
    #[must_use]
    pub fn into_parts(self) -> (ApiConfig, Value) {
        let config = ApiConfig {
            uid: self.uid,
            info: self.info,
            spath: self.spath,
            libs: self.libs,
            lua: self.lua,
        };
        (config, self.verbs)
    }
}

/// Plugin-level configuration of an API: its descriptor minus `verbs`.
///
/// Serializes back to the descriptor's JSON with only absent keys left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiConfig {
    pub uid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spath: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub libs: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lua: Option<Value>,
}

impl fmt::Display for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn residual(descriptor: Value) -> Value {
        let (config, _) = ApiDescriptor::from_value(descriptor).unwrap().into_parts();
        serde_json::to_value(&config).unwrap()
    }

    #[test]
    fn should_decode_minimal_descriptor() {
        let d = ApiDescriptor::from_value(json!({"uid": "demo", "verbs": []})).unwrap();
        assert_eq!(d.uid, "demo");
        assert!(d.info.is_none());
        assert!(d.libs.is_none());
        assert_eq!(d.verbs, json!([]));
    }

    #[test]
    fn should_decode_every_known_field() {
        let d = ApiDescriptor::from_value(json!({
            "uid": "audio",
            "info": "audio control",
            "spath": "/usr/lib/plugins",
            "libs": ["audio.ctlso"],
            "lua": {"script": "init.lua"},
            "verbs": [{"uid": "volume", "action": "lua://volume"}]
        }))
        .unwrap();

        assert_eq!(d.info.as_deref(), Some("audio control"));
        assert_eq!(d.spath.as_deref(), Some("/usr/lib/plugins"));
        assert_eq!(d.libs, Some(json!(["audio.ctlso"])));
        assert_eq!(d.lua, Some(json!({"script": "init.lua"})));
    }

    #[test]
    fn should_reject_unknown_field() {
        let result = ApiDescriptor::from_value(json!({"uid": "bad", "extra": 1, "verbs": []}));
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_when_uid_missing() {
        let result = ApiDescriptor::from_value(json!({"verbs": []}));
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_when_verbs_missing() {
        let result = ApiDescriptor::from_value(json!({"uid": "demo"}));
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_when_uid_is_not_a_string() {
        let result = ApiDescriptor::from_value(json!({"uid": 42, "verbs": []}));
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_when_spath_is_not_a_string() {
        let result = ApiDescriptor::from_value(json!({"uid": "a", "spath": [1], "verbs": []}));
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_null_info() {
        let result = ApiDescriptor::from_value(json!({"uid": "a", "info": null, "verbs": []}));
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_null_spath() {
        let result = ApiDescriptor::from_value(json!({"uid": "a", "spath": null, "verbs": []}));
        assert!(result.is_err());
    }

    #[test]
    fn should_keep_null_libs_and_lua_in_config() {
        let d = ApiDescriptor::from_value(json!({
            "uid": "a",
            "libs": null,
            "lua": null,
            "verbs": []
        }))
        .unwrap();
        assert_eq!(d.libs, Some(Value::Null));
        assert_eq!(d.lua, Some(Value::Null));

        assert_eq!(
            residual(json!({"uid": "a", "libs": null, "lua": null, "verbs": []})),
            json!({"uid": "a", "libs": null, "lua": null})
        );
    }

    #[test]
    fn should_reject_non_object_descriptor() {
        assert!(ApiDescriptor::from_value(json!("demo")).is_err());
        assert!(ApiDescriptor::from_value(json!([1, 2])).is_err());
    }

    #[test]
    fn should_strip_verbs_from_config() {
        let d = ApiDescriptor::from_value(json!({
            "uid": "demo",
            "info": "test api",
            "verbs": []
        }))
        .unwrap();

        let (config, verbs) = d.into_parts();
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({"uid": "demo", "info": "test api"})
        );
        assert_eq!(verbs, json!([]));
    }

    #[test]
    fn should_keep_plugin_fields_in_config() {
        assert_eq!(
            residual(json!({
                "uid": "demo",
                "libs": "demo.ctlso",
                "lua": "demo.lua",
                "spath": "/opt",
                "verbs": {"uid": "ping"}
            })),
            json!({"uid": "demo", "libs": "demo.ctlso", "lua": "demo.lua", "spath": "/opt"})
        );
    }

    #[test]
    fn should_display_config_as_json_text() {
        let (config, _) = ApiDescriptor::from_value(json!({"uid": "demo", "verbs": []}))
            .unwrap()
            .into_parts();
        assert_eq!(config.to_string(), r#"{"uid":"demo"}"#);
    }
}
