//! Fapi loader — the continuation run by the host when it instantiates a
//! declared API.

use std::sync::Arc;

use fapis_domain::descriptor::ApiConfig;
use fapis_domain::error::LoadError;
use fapis_domain::section::ConfigSection;

use crate::ports::{ApiLoader, EventDispatcher, LiveApi, PluginConfigurator, VerbRegistrar};

/// Everything needed to load one API, captured when it was declared.
pub struct FapiLoader<P, V> {
    section: Arc<ConfigSection>,
    config: ApiConfig,
    verbs: serde_json::Value,
    plugins: Arc<P>,
    registrar: Arc<V>,
    dispatcher: Arc<dyn EventDispatcher>,
}

impl<P, V> FapiLoader<P, V> {
    /// Capture the state of one declared API.
    pub fn new(
        section: Arc<ConfigSection>,
        config: ApiConfig,
        verbs: serde_json::Value,
        plugins: Arc<P>,
        registrar: Arc<V>,
        dispatcher: Arc<dyn EventDispatcher>,
    ) -> Self {
        Self {
            section,
            config,
            verbs,
            plugins,
            registrar,
            dispatcher,
        }
    }
}

impl<P, V> ApiLoader for FapiLoader<P, V>
where
    P: PluginConfigurator + 'static,
    V: VerbRegistrar + 'static,
{
    fn load(self: Box<Self>, api: &mut dyn LiveApi) -> Result<(), LoadError> {
        let _span = tracing::debug_span!("load_fapi", api = api.name()).entered();

        if let Err(source) = self.plugins.configure(api, &self.section, &self.config) {
            return Err(fail(
                api,
                LoadError::PluginConfig {
                    config: self.config.to_string(),
                    source,
                },
            ));
        }

        if let Err(source) = self.registrar.register_verbs(api, &self.verbs, true) {
            return Err(fail(
                api,
                LoadError::Verbs {
                    config: self.config.to_string(),
                    source,
                },
            ));
        }

        api.on_event(Arc::clone(&self.dispatcher));

        tracing::debug!(api = api.name(), "fapi loaded");
        Ok(())
    }
}

fn fail(api: &dyn LiveApi, err: LoadError) -> LoadError {
    let cause = std::error::Error::source(&err).map(ToString::to_string);
    tracing::error!(api = api.name(), cause = ?cause, "{err}");
    api.report_error(&err.to_string());
    err
}
