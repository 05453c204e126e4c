//! Control-layer ports — what a controller does with a freshly loaded API.

use fapis_domain::descriptor::ApiConfig;
use fapis_domain::error::ControllerError;
use fapis_domain::section::ConfigSection;

use super::LiveApi;

/// Applies plugin-level configuration (`spath`, `libs`, `lua`, …) to an API.
pub trait PluginConfigurator: Send + Sync {
    /// Configure `api` from `config`, which came from `section`.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError`] when a plugin cannot be loaded.
    fn configure(
        &self,
        api: &mut dyn LiveApi,
        section: &ConfigSection,
        config: &ApiConfig,
    ) -> Result<(), ControllerError>;
}

/// Registers a list of verb definitions on an API.
pub trait VerbRegistrar: Send + Sync {
    /// Register `verbs` on `api`.
    ///
    /// With `inherit` set, verbs may refer to actions of the parent
    /// controller.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError`] when the verbs cannot be decoded or the
    /// host refuses one of them.
    fn register_verbs(
        &self,
        api: &mut dyn LiveApi,
        verbs: &serde_json::Value,
        inherit: bool,
    ) -> Result<(), ControllerError>;
}
