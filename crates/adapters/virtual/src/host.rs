//! In-process host — keeps declared APIs in memory and runs their loaders
//! on demand.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use fapis_app::ports::{ApiDeclaration, ApiHost, ApiLoader, EventDispatcher, LiveApi};
use fapis_domain::error::HostError;
use fapis_domain::event::ApiEvent;
use fapis_domain::lifecycle::ApiState;

/// An error reported on the host, tagged with the API it was reported on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedError {
    pub api: String,
    pub message: String,
}

/// A verb added to a [`VirtualApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbInfo {
    pub name: String,
    pub info: Option<String>,
}

type ErrorLog = Arc<Mutex<Vec<ReportedError>>>;

/// An API living inside a [`VirtualHost`].
pub struct VirtualApi {
    name: String,
    info: Option<String>,
    verbs: Vec<VerbInfo>,
    dispatchers: Vec<Arc<dyn EventDispatcher>>,
    errors: ErrorLog,
}

impl VirtualApi {
    /// Move verbs and subscriptions out, leaving a shell with the same
    /// identity behind.
    fn detach(&mut self) -> Self {
        Self {
            name: self.name.clone(),
            info: self.info.clone(),
            verbs: std::mem::take(&mut self.verbs),
            dispatchers: std::mem::take(&mut self.dispatchers),
            errors: Arc::clone(&self.errors),
        }
    }
}

impl LiveApi for VirtualApi {
    fn name(&self) -> &str {
        &self.name
    }

    fn report_error(&self, message: &str) {
        record(&self.errors, &self.name, message);
    }

    fn add_verb(&mut self, verb: &str, info: Option<&str>) -> Result<(), HostError> {
        if verb.is_empty() {
            return Err(HostError::Rejected(format!(
                "empty verb name in api {:?}",
                self.name
            )));
        }
        if self.verbs.iter().any(|v| v.name == verb) {
            return Err(HostError::DuplicateVerb {
                api: self.name.clone(),
                verb: verb.to_string(),
            });
        }
        tracing::debug!(api = %self.name, verb, "verb added");
        self.verbs.push(VerbInfo {
            name: verb.to_string(),
            info: info.map(str::to_string),
        });
        Ok(())
    }

    fn on_event(&mut self, dispatcher: Arc<dyn EventDispatcher>) {
        self.dispatchers.push(dispatcher);
    }
}

struct Slot {
    state: ApiState,
    loader: Option<Box<dyn ApiLoader>>,
    api: VirtualApi,
}

/// In-memory [`ApiHost`].
///
/// APIs are kept in declaration order. Declarations flagged
/// `explicit_start` wait for [`start`](Self::start); the others are loaded
/// right away.
pub struct VirtualHost {
    main_api: String,
    apis: Mutex<Vec<Slot>>,
    errors: ErrorLog,
}

impl VirtualHost {
    /// Create a host whose main API is `main_api`.
    #[must_use]
    pub fn new(main_api: impl Into<String>) -> Self {
        Self {
            main_api: main_api.into(),
            apis: Mutex::new(Vec::new()),
            errors: Arc::default(),
        }
    }

    /// Run the loader of a declared API.
    ///
    /// The loader runs without the host lock held, so it may call back into
    /// the host. Until it returns, the API stays [`ApiState::Declared`] with
    /// no verbs or subscriptions visible.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::UnknownApi`] if `name` was never declared and
    /// [`HostError::AlreadyStarted`] if its loader already ran. A failing
    /// loader is not an error here: the API ends up [`ApiState::Failed`].
    #[tracing::instrument(skip(self))]
    pub fn start(&self, name: &str) -> Result<ApiState, HostError> {
        let (loader, mut api) = {
            let mut apis = lock(&self.apis);
            let slot = find_slot(&mut apis, name)?;
            let loader = slot
                .loader
                .take()
                .ok_or_else(|| HostError::AlreadyStarted(name.to_string()))?;
            (loader, slot.api.detach())
        };

        let succeeded = loader.load(&mut api).is_ok();

        let mut apis = lock(&self.apis);
        let slot = find_slot(&mut apis, name)?;
        slot.api = api;
        slot.state = slot
            .state
            .after_load(succeeded)
            .ok_or_else(|| HostError::AlreadyStarted(name.to_string()))?;

        tracing::info!(state = %slot.state, "api started");
        Ok(slot.state)
    }

    /// Start every API still waiting for its loader, in declaration order.
    pub fn start_all(&self) -> Vec<(String, ApiState)> {
        let pending: Vec<String> = lock(&self.apis)
            .iter()
            .filter(|slot| slot.loader.is_some())
            .map(|slot| slot.api.name.clone())
            .collect();

        pending
            .into_iter()
            .filter_map(|name| match self.start(&name) {
                Ok(state) => Some((name, state)),
                Err(err) => {
                    tracing::warn!(api = %name, error = %err, "api not started");
                    None
                }
            })
            .collect()
    }

    /// Hand `event` to every dispatcher subscribed by `api`.
    ///
    /// Returns how many dispatchers received it.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::UnknownApi`] if `api` was never declared.
    pub fn push_event(&self, api: &str, event: &ApiEvent) -> Result<usize, HostError> {
        let dispatchers = lock(&self.apis)
            .iter()
            .find(|slot| slot.api.name == api)
            .map(|slot| slot.api.dispatchers.clone())
            .ok_or_else(|| HostError::UnknownApi(api.to_string()))?;

        for dispatcher in &dispatchers {
            dispatcher.dispatch(api, event);
        }
        Ok(dispatchers.len())
    }

    /// Names of the declared APIs, in declaration order.
    #[must_use]
    pub fn api_names(&self) -> Vec<String> {
        lock(&self.apis)
            .iter()
            .map(|slot| slot.api.name.clone())
            .collect()
    }

    #[must_use]
    pub fn state(&self, name: &str) -> Option<ApiState> {
        lock(&self.apis)
            .iter()
            .find(|slot| slot.api.name == name)
            .map(|slot| slot.state)
    }

    /// Verbs of a declared API.
    #[must_use]
    pub fn verbs(&self, name: &str) -> Option<Vec<VerbInfo>> {
        lock(&self.apis)
            .iter()
            .find(|slot| slot.api.name == name)
            .map(|slot| slot.api.verbs.clone())
    }

    /// Description of a declared API.
    #[must_use]
    pub fn info(&self, name: &str) -> Option<String> {
        lock(&self.apis)
            .iter()
            .find(|slot| slot.api.name == name)
            .and_then(|slot| slot.api.info.clone())
    }

    /// Every error reported so far, on the main API or any declared one.
    #[must_use]
    pub fn errors(&self) -> Vec<ReportedError> {
        lock(&self.errors).clone()
    }

    fn check_name(&self, apis: &[Slot], name: &str) -> Result<(), HostError> {
        if name.is_empty() || name.contains(char::is_whitespace) || name.contains('/') {
            return Err(HostError::InvalidName(name.to_string()));
        }
        if name == self.main_api || apis.iter().any(|slot| slot.api.name == name) {
            return Err(HostError::DuplicateApi(name.to_string()));
        }
        Ok(())
    }
}

impl ApiHost for VirtualHost {
    fn report_error(&self, message: &str) {
        record(&self.errors, &self.main_api, message);
    }

    fn new_api(
        &self,
        declaration: ApiDeclaration,
        loader: Box<dyn ApiLoader>,
    ) -> Result<(), HostError> {
        let name = declaration.name.clone();
        {
            let mut apis = lock(&self.apis);
            self.check_name(&apis, &name)?;
            apis.push(Slot {
                state: ApiState::Declared,
                loader: Some(loader),
                api: VirtualApi {
                    name: declaration.name,
                    info: declaration.info,
                    verbs: Vec::new(),
                    dispatchers: Vec::new(),
                    errors: Arc::clone(&self.errors),
                },
            });
        }
        tracing::debug!(api = %name, explicit_start = declaration.explicit_start, "api declared");

        if !declaration.explicit_start {
            self.start(&name)?;
        }
        Ok(())
    }
}

fn find_slot<'a>(apis: &'a mut [Slot], name: &str) -> Result<&'a mut Slot, HostError> {
    apis.iter_mut()
        .find(|slot| slot.api.name == name)
        .ok_or_else(|| HostError::UnknownApi(name.to_string()))
}

fn record(errors: &Mutex<Vec<ReportedError>>, api: &str, message: &str) {
    tracing::error!(api, "{message}");
    lock(errors).push(ReportedError {
        api: api.to_string(),
        message: message.to_string(),
    });
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
