//! In-memory fakes for the ports, shared by the service tests.

use std::cell::RefCell;
use std::sync::{Arc, Mutex};

use fapis_domain::descriptor::ApiConfig;
use fapis_domain::error::{ControllerError, HostError, LoadError};
use fapis_domain::event::ApiEvent;
use fapis_domain::section::ConfigSection;
use serde_json::Value;

use crate::ports::{
    ApiDeclaration, ApiHost, ApiLoader, EventDispatcher, LiveApi, PluginConfigurator,
    VerbRegistrar,
};

/// Host recording every declaration and reported error.
#[derive(Default)]
pub struct FakeHost {
    declared: Mutex<Vec<(ApiDeclaration, Box<dyn ApiLoader>)>>,
    errors: Mutex<Vec<String>>,
    refuse: Option<&'static str>,
}

impl FakeHost {
    pub fn refusing(name: &'static str) -> Self {
        Self {
            refuse: Some(name),
            ..Self::default()
        }
    }

    pub fn declarations(&self) -> Vec<ApiDeclaration> {
        self.declared
            .lock()
            .unwrap()
            .iter()
            .map(|(d, _)| d.clone())
            .collect()
    }

    pub fn declared_names(&self) -> Vec<String> {
        self.declarations().into_iter().map(|d| d.name).collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    /// Run the loader of the first pending declaration on a fresh API.
    pub fn load_next(&self) -> (FakeApi, Result<(), LoadError>) {
        let (declaration, loader) = self.declared.lock().unwrap().remove(0);
        let mut api = FakeApi::new(&declaration.name);
        let result = loader.load(&mut api);
        (api, result)
    }
}

impl ApiHost for FakeHost {
    fn report_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn new_api(
        &self,
        declaration: ApiDeclaration,
        loader: Box<dyn ApiLoader>,
    ) -> Result<(), HostError> {
        if self.refuse == Some(declaration.name.as_str()) {
            return Err(HostError::Rejected("refused by test".to_string()));
        }
        self.declared.lock().unwrap().push((declaration, loader));
        Ok(())
    }
}

/// Live API recording verbs, errors and subscriptions.
pub struct FakeApi {
    pub name: String,
    pub verbs: Vec<String>,
    pub subscriptions: Vec<Arc<dyn EventDispatcher>>,
    errors: RefCell<Vec<String>>,
}

impl FakeApi {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            verbs: Vec::new(),
            subscriptions: Vec::new(),
            errors: RefCell::new(Vec::new()),
        }
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }
}

impl LiveApi for FakeApi {
    fn name(&self) -> &str {
        &self.name
    }

    fn report_error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }

    fn add_verb(&mut self, verb: &str, _info: Option<&str>) -> Result<(), HostError> {
        self.verbs.push(verb.to_string());
        Ok(())
    }

    fn on_event(&mut self, dispatcher: Arc<dyn EventDispatcher>) {
        self.subscriptions.push(dispatcher);
    }
}

/// Control layer recording what it was asked to apply.
#[derive(Default)]
pub struct FakeController {
    configured: Mutex<Vec<(String, Value)>>,
    registered: Mutex<Vec<(Value, bool)>>,
    fail_plugins: bool,
    fail_verbs: bool,
}

impl FakeController {
    pub fn failing_plugins() -> Self {
        Self {
            fail_plugins: true,
            ..Self::default()
        }
    }

    pub fn failing_verbs() -> Self {
        Self {
            fail_verbs: true,
            ..Self::default()
        }
    }

    /// `(section key, config json)` pairs, in call order.
    pub fn configured(&self) -> Vec<(String, Value)> {
        self.configured.lock().unwrap().clone()
    }

    /// `(verbs, inherit)` pairs, in call order.
    pub fn registered(&self) -> Vec<(Value, bool)> {
        self.registered.lock().unwrap().clone()
    }
}

impl PluginConfigurator for FakeController {
    fn configure(
        &self,
        api: &mut dyn LiveApi,
        section: &ConfigSection,
        config: &ApiConfig,
    ) -> Result<(), ControllerError> {
        self.configured
            .lock()
            .unwrap()
            .push((section.key.clone(), serde_json::to_value(config).unwrap()));
        if self.fail_plugins {
            return Err(ControllerError::InvalidPlugin(api.name().to_string()));
        }
        Ok(())
    }
}

impl VerbRegistrar for FakeController {
    fn register_verbs(
        &self,
        _api: &mut dyn LiveApi,
        verbs: &Value,
        inherit: bool,
    ) -> Result<(), ControllerError> {
        self.registered
            .lock()
            .unwrap()
            .push((verbs.clone(), inherit));
        if self.fail_verbs {
            return Err(ControllerError::DuplicateVerb("ping".to_string()));
        }
        Ok(())
    }
}

/// Dispatcher counting the events it receives.
#[derive(Default)]
pub struct FakeDispatcher {
    pub received: Mutex<Vec<(String, String)>>,
}

impl EventDispatcher for FakeDispatcher {
    fn dispatch(&self, api: &str, event: &ApiEvent) {
        self.received
            .lock()
            .unwrap()
            .push((api.to_string(), event.name.clone()));
    }
}
