//! # fapisd — fapis daemon
//!
//! Composition root that reads a controller config and declares its fapis.
//!
//! ## Responsibilities
//! - Load settings (`fapisd.toml`, env vars, first CLI argument)
//! - Install the `tracing` subscriber
//! - Read and parse the controller JSON file
//! - Wire `FapisService` with the in-process host and controller
//! - Declare every fapi, start them, log a summary
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use fapis_adapter_virtual::{TracingDispatcher, VirtualController, VirtualHost};
use fapis_app::services::fapis_service::FapisService;
use fapis_domain::control::ControlConfig;
use fapis_domain::lifecycle::ApiState;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

fn main() -> anyhow::Result<()> {
    let mut config = Config::load().context("loading fapisd settings")?;
    if let Some(file) = std::env::args_os().nth(1) {
        config.override_control_file(file);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let path = &config.control.file;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading controller config {}", path.display()))?;
    let mut control = ControlConfig::from_json(&text)
        .with_context(|| format!("parsing controller config {}", path.display()))?;
    let (section, fapis) = control.take_section(&config.control.section);

    // Host and control layer
    let host = VirtualHost::new(config.host.main_api.clone());
    let controller = Arc::new(VirtualController::default());
    let service = FapisService::new(
        Arc::clone(&controller),
        controller,
        Arc::new(TracingDispatcher),
    );

    let report = service.configure(&host, section, fapis);
    let started = host.start_all();

    let loaded = started
        .iter()
        .filter(|(_, state)| *state == ApiState::Loaded)
        .count();
    tracing::info!(
        controller = %control.metadata.uid,
        declared = report.declared().count(),
        rejected = report.rejected().count(),
        loaded,
        failed = started.len() - loaded,
        "fapis ready"
    );
    for (name, state) in &started {
        let verbs = host.verbs(name).unwrap_or_default();
        tracing::info!(api = %name, %state, verbs = verbs.len(), "api");
    }

    Ok(())
}
