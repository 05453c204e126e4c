//! # fapis-adapter-virtual
//!
//! In-process implementations of the host and control-layer ports, for
//! demos and end-to-end tests.
//!
//! ## Provided adapters
//!
//! | Type | Port(s) | Behaviour |
//! |------|---------|-----------|
//! | [`VirtualHost`] | `ApiHost`, `LiveApi` | Keeps declared APIs in memory, runs loaders on `start`, forwards events |
//! | [`VirtualController`] | `PluginConfigurator`, `VerbRegistrar` | Checks `libs`, records configs, adds verbs to the API |
//! | [`TracingDispatcher`] | `EventDispatcher` | Logs every event |
//!
//! ## Dependency rule
//!
//! Depends on `fapis-app` (port traits) and `fapis-domain` only.

mod controller;
mod dispatcher;
mod host;

pub use controller::{VerbDefinition, VirtualController};
pub use dispatcher::TracingDispatcher;
pub use host::{ReportedError, VerbInfo, VirtualApi, VirtualHost};
