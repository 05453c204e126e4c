//! In-process control layer — checks plugin specs, records configs and
//! adds verbs to the API being loaded.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use serde::Deserialize;
use serde_json::Value;

use fapis_app::ports::{LiveApi, PluginConfigurator, VerbRegistrar};
use fapis_domain::descriptor::ApiConfig;
use fapis_domain::error::ControllerError;
use fapis_domain::json::for_each_item;
use fapis_domain::section::ConfigSection;

/// One verb of a `verbs` list.
///
/// Only the name and description are read; other keys such as `action`
/// are left to the controller's action engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VerbDefinition {
    pub uid: String,
    #[serde(default)]
    pub info: Option<String>,
}

/// [`PluginConfigurator`] and [`VerbRegistrar`] keeping everything in memory.
#[derive(Default)]
pub struct VirtualController {
    configs: Mutex<HashMap<String, ApiConfig>>,
    plugins: Mutex<HashMap<String, Vec<String>>>,
}

impl VirtualController {
    /// Config applied to `api`, if it was loaded.
    #[must_use]
    pub fn config(&self, api: &str) -> Option<ApiConfig> {
        self.configs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(api)
            .cloned()
    }

    /// Plugins named by the `libs` entry of `api`.
    #[must_use]
    pub fn plugins(&self, api: &str) -> Vec<String> {
        self.plugins
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(api)
            .cloned()
            .unwrap_or_default()
    }
}

fn plugin_names(api: &str, libs: Option<&Value>) -> Result<Vec<String>, ControllerError> {
    let invalid = || ControllerError::InvalidPlugin(api.to_string());
    match libs {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(lib)) => Ok(vec![lib.clone()]),
        Some(Value::Array(libs)) => libs
            .iter()
            .map(|lib| lib.as_str().map(str::to_string).ok_or_else(invalid))
            .collect(),
        Some(_) => Err(invalid()),
    }
}

impl PluginConfigurator for VirtualController {
    fn configure(
        &self,
        api: &mut dyn LiveApi,
        section: &ConfigSection,
        config: &ApiConfig,
    ) -> Result<(), ControllerError> {
        let names = plugin_names(api.name(), config.libs.as_ref())?;
        tracing::debug!(
            api = api.name(),
            section = %section,
            plugins = ?names,
            spath = config.spath.as_deref(),
            "plugin config applied"
        );

        let name = api.name().to_string();
        self.plugins
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.clone(), names);
        self.configs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, config.clone());
        Ok(())
    }
}

impl VerbRegistrar for VirtualController {
    fn register_verbs(
        &self,
        api: &mut dyn LiveApi,
        verbs: &Value,
        inherit: bool,
    ) -> Result<(), ControllerError> {
        let mut items = Vec::new();
        for_each_item(verbs.clone(), |item| items.push(item));

        let definitions = items
            .into_iter()
            .map(serde_json::from_value::<VerbDefinition>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(ControllerError::InvalidVerbs)?;

        for (index, definition) in definitions.iter().enumerate() {
            if definitions[..index].iter().any(|d| d.uid == definition.uid) {
                return Err(ControllerError::DuplicateVerb(definition.uid.clone()));
            }
        }

        for definition in &definitions {
            api.add_verb(&definition.uid, definition.info.as_deref())?;
        }
        tracing::debug!(
            api = api.name(),
            count = definitions.len(),
            inherit,
            "verbs registered"
        );
        Ok(())
    }
}
