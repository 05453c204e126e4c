//! Fapis service — declares one API per entry of a `fapis` section.

use std::sync::Arc;

use fapis_domain::descriptor::ApiDescriptor;
use fapis_domain::error::{DeclareError, SchemaError};
use fapis_domain::json::{for_each_item, item_count};
use fapis_domain::section::ConfigSection;
use serde_json::Value;

use crate::ports::{ApiDeclaration, ApiHost, EventDispatcher, PluginConfigurator, VerbRegistrar};
use crate::services::loader::FapiLoader;

/// Outcome of one walked entry.
#[derive(Debug)]
pub enum Declaration {
    /// The host accepted the API; its loader is pending.
    Declared { uid: String },
    /// The entry was `null`.
    Skipped,
    /// The entry was reported and dropped.
    Rejected(DeclareError),
}

/// Per-entry outcomes of one [`FapisService::configure`] pass, in input
/// order.
#[derive(Debug, Default)]
pub struct FapisReport {
    outcomes: Vec<Declaration>,
}

impl FapisReport {
    #[must_use]
    pub fn outcomes(&self) -> &[Declaration] {
        &self.outcomes
    }

    /// Names of the declared APIs.
    pub fn declared(&self) -> impl Iterator<Item = &str> {
        self.outcomes.iter().filter_map(|o| match o {
            Declaration::Declared { uid } => Some(uid.as_str()),
            Declaration::Skipped | Declaration::Rejected(_) => None,
        })
    }

    /// Errors of the rejected entries.
    pub fn rejected(&self) -> impl Iterator<Item = &DeclareError> {
        self.outcomes.iter().filter_map(|o| match o {
            Declaration::Rejected(err) => Some(err),
            Declaration::Declared { .. } | Declaration::Skipped => None,
        })
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Declaration::Skipped))
            .count()
    }

    /// Whether no entry was rejected.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected().next().is_none()
    }
}

/// Application service turning `fapis` sections into declared APIs.
///
/// The control-layer ports are shared with every loader the service hands
/// to the host, so they live behind `Arc`s.
pub struct FapisService<P, V> {
    plugins: Arc<P>,
    registrar: Arc<V>,
    dispatcher: Arc<dyn EventDispatcher>,
}

impl<P, V> Clone for FapisService<P, V> {
    fn clone(&self) -> Self {
        Self {
            plugins: Arc::clone(&self.plugins),
            registrar: Arc::clone(&self.registrar),
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

impl<P, V> FapisService<P, V>
where
    P: PluginConfigurator + 'static,
    V: VerbRegistrar + 'static,
{
    /// Create a service applying plugins with `plugins`, registering verbs
    /// with `registrar`, and routing API events to `dispatcher`.
    pub fn new(plugins: Arc<P>, registrar: Arc<V>, dispatcher: Arc<dyn EventDispatcher>) -> Self {
        Self {
            plugins,
            registrar,
            dispatcher,
        }
    }

    /// Declare one API per entry of `fapis`.
    ///
    /// `fapis` may be an array, a single descriptor, or `null`. Every entry
    /// is handled on its own: a rejected entry is reported on the host and
    /// the walk goes on.
    #[tracing::instrument(skip_all, fields(section = %section))]
    pub fn configure(
        &self,
        host: &impl ApiHost,
        section: ConfigSection,
        fapis: Value,
    ) -> FapisReport {
        let section = Arc::new(section);
        let mut outcomes = Vec::with_capacity(item_count(&fapis));
        for_each_item(fapis, |descriptor| {
            outcomes.push(self.declare(host, &section, descriptor));
        });

        let report = FapisReport { outcomes };
        tracing::info!(
            declared = report.declared().count(),
            rejected = report.rejected().count(),
            skipped = report.skipped(),
            "fapis section processed"
        );
        report
    }

    /// Declare the API described by one entry.
    pub fn declare(
        &self,
        host: &impl ApiHost,
        section: &Arc<ConfigSection>,
        descriptor: Value,
    ) -> Declaration {
        if descriptor.is_null() {
            return Declaration::Skipped;
        }

        let descriptor = match ApiDescriptor::from_value(descriptor) {
            Ok(descriptor) => descriptor,
            Err(err) => return Declaration::Rejected(reject_schema(host, err)),
        };

        let (config, verbs) = descriptor.into_parts();
        let declaration = ApiDeclaration {
            name: config.uid.clone(),
            info: config.info.clone(),
            explicit_start: true,
        };
        let uid = declaration.name.clone();
        let loader = FapiLoader::new(
            Arc::clone(section),
            config,
            verbs,
            Arc::clone(&self.plugins),
            Arc::clone(&self.registrar),
            Arc::clone(&self.dispatcher),
        );

        match host.new_api(declaration, Box::new(loader)) {
            Ok(()) => {
                tracing::debug!(uid = %uid, "fapi declared");
                Declaration::Declared { uid }
            }
            Err(source) => {
                let err = DeclareError::Registration { uid, source };
                tracing::error!(cause = %source_of(&err), "{err}");
                host.report_error(&err.to_string());
                Declaration::Rejected(err)
            }
        }
    }
}

fn reject_schema(host: &impl ApiHost, err: SchemaError) -> DeclareError {
    tracing::error!(cause = %err.0, "{err}");
    host.report_error(&err.to_string());
    err.into()
}

fn source_of(err: &DeclareError) -> String {
    std::error::Error::source(err)
        .map(ToString::to_string)
        .unwrap_or_default()
}
