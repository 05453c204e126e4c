//! # fapis-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **host ports** that a framework binder implements:
//!   - `ApiHost` — declare new APIs, report errors on the main API
//!   - `LiveApi` — an instantiated API: add verbs, subscribe events
//!   - `ApiLoader` — the continuation the host runs when it instantiates an API
//! - Define the **control-layer ports**:
//!   - `PluginConfigurator` — apply plugin-level config to an API
//!   - `VerbRegistrar` — register a verb list on an API
//!   - `EventDispatcher` — receive the events of subscribed APIs
//! - Provide the use-cases:
//!   - `FapisService` — walk a `fapis` section and declare one API per entry
//!   - `FapiLoader` — load one declared API
//!
//! ## Dependency rule
//! Depends on `fapis-domain` only. Never imports adapter crates.

pub mod ports;
pub mod services;
