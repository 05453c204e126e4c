//! Port definitions — traits that the host framework and control layer
//! implement.
//!
//! The host owns API lifecycle, verb dispatch and event delivery. This crate
//! only calls into it through these traits.

pub mod control;
pub mod event_dispatch;
pub mod host;

pub use control::{PluginConfigurator, VerbRegistrar};
pub use event_dispatch::EventDispatcher;
pub use host::{ApiDeclaration, ApiHost, ApiLoader, LiveApi};
