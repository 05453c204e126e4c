//! Error types shared across the workspace.
//!
//! Each stage of a fapi's life has its own typed error: the strict decode of
//! a descriptor ([`SchemaError`]), the host refusing a declaration
//! ([`HostError`]), the control layer failing to apply a config or verbs
//! ([`ControllerError`]). [`DeclareError`] and [`LoadError`] carry the
//! messages reported back to the host.

/// Message reported when a descriptor does not match the closed schema.
pub const SCHEMA_MESSAGE: &str =
    "Wrong fapis specification, missing uid|[info]|[spath]|[libs]|[lua]|verbs";

/// A descriptor did not decode against the closed fapi schema.
#[derive(Debug, thiserror::Error)]
#[error("{}", SCHEMA_MESSAGE)]
pub struct SchemaError(#[source] pub serde_json::Error);

/// The host framework refused an operation on an API.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// An API with the same name has already been declared.
    #[error("api {0:?} already exists")]
    DuplicateApi(String),

    /// The API name is not acceptable to the host.
    #[error("invalid api name {0:?}")]
    InvalidName(String),

    /// No API with this name has been declared.
    #[error("unknown api {0:?}")]
    UnknownApi(String),

    /// The API already went through its loader.
    #[error("api {0:?} is already started")]
    AlreadyStarted(String),

    /// The API already holds a verb with this name.
    #[error("verb {verb:?} already exists in api {api:?}")]
    DuplicateVerb { api: String, verb: String },

    /// Host-specific refusal.
    #[error("host rejected the request: {0}")]
    Rejected(String),
}

/// The control layer could not apply plugin config or verbs to an API.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// The `libs` entry names plugins in an unsupported shape.
    #[error("invalid plugin specification for api {0:?}")]
    InvalidPlugin(String),

    /// The verbs payload does not decode as a list of verb definitions.
    #[error("invalid verb definitions")]
    InvalidVerbs(#[source] serde_json::Error),

    /// Two verb definitions share a name.
    #[error("verb {0:?} is defined twice")]
    DuplicateVerb(String),

    /// The host refused a verb or subscription.
    #[error("host error")]
    Host(#[from] HostError),
}

/// A descriptor could not be turned into a declared API.
#[derive(Debug, thiserror::Error)]
pub enum DeclareError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Error creating new api: {uid}")]
    Registration {
        uid: String,
        #[source]
        source: HostError,
    },
}

/// A declared API could not be loaded.
///
/// `config` holds the JSON text of the plugin-level config so the message
/// identifies the offending descriptor.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Problem loading the plugin as an API for {config}, see log message above")]
    PluginConfig {
        config: String,
        #[source]
        source: ControllerError,
    },

    #[error("Problems at verbs creations for {config}")]
    Verbs {
        config: String,
        #[source]
        source: ControllerError,
    },
}
