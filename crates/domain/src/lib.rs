//! # fapis-domain
//!
//! Pure domain model for declaring sub-APIs ("fapis") from a controller
//! config.
//!
//! ## Responsibilities
//! - Strict decoding of API descriptors (closed schema, `verbs` detached)
//! - The controller config document and its sections
//! - Events handed to API event dispatchers
//! - The declared → loaded/failed lifecycle
//! - Typed errors for every stage
//!
//! ## Dependency rule
//! This crate has **no internal dependencies** and performs no IO.
//! The host framework and control layer are expressed as traits in the
//! `app` crate (ports).

pub mod control;
pub mod descriptor;
pub mod error;
pub mod event;
pub mod json;
pub mod lifecycle;
pub mod section;
