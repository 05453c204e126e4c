//! Host port — the framework binder that owns APIs.
//!
//! Declaring an API and loading it are two distinct moments: the host
//! receives an [`ApiLoader`] with the declaration and runs it whenever it
//! actually instantiates the API, possibly later and on another thread.

use std::sync::Arc;

use fapis_domain::error::{HostError, LoadError};

use super::EventDispatcher;

/// What the host needs to know to declare a new API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiDeclaration {
    /// API name, unique within the host.
    pub name: String,
    /// Description shown by the host.
    pub info: Option<String>,
    /// The API waits for an explicit start before its loader runs.
    pub explicit_start: bool,
}

/// The framework binder, seen from the API that owns the config.
pub trait ApiHost {
    /// Report an error on the main API's error channel.
    fn report_error(&self, message: &str);

    /// Declare a new API whose `loader` the host runs on instantiation.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] when the host refuses the declaration; the
    /// loader is dropped without running.
    fn new_api(
        &self,
        declaration: ApiDeclaration,
        loader: Box<dyn ApiLoader>,
    ) -> Result<(), HostError>;
}

/// An API the host has instantiated and is handing to its loader.
pub trait LiveApi {
    /// Name the API was declared with.
    fn name(&self) -> &str;

    /// Report an error on this API's error channel.
    fn report_error(&self, message: &str);

    /// Add one verb to the API.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] when the host refuses the verb.
    fn add_verb(&mut self, verb: &str, info: Option<&str>) -> Result<(), HostError>;

    /// Route the API's events to `dispatcher`.
    fn on_event(&mut self, dispatcher: Arc<dyn EventDispatcher>);
}

/// Continuation the host runs once when it instantiates a declared API.
pub trait ApiLoader: Send {
    /// Bring `api` to life.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the API cannot be configured. The host
    /// decides what happens to the API then.
    fn load(self: Box<Self>, api: &mut dyn LiveApi) -> Result<(), LoadError>;
}
