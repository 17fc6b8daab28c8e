// Library root
// -----------
// This crate exposes the pieces the CLI wires together. The binary
// (`main.rs`) loads configuration, reads the host list, authenticates
// once and then uploads the hosts as collections, one batch at a time.
//
// Module responsibilities:
// - `config`: process-wide settings read once from the environment.
// - `hosts`: reading the newline-delimited host file.
// - `batch`: splitting the host list and naming each batch.
// - `api`: HTTP calls against the console (authenticate, collections).
// - `upload`: the per-batch upload loop and its summary.
// - `error`: typed errors for the fatal precondition failures.
pub mod api;
pub mod batch;
pub mod config;
pub mod error;
pub mod hosts;
pub mod upload;

use anyhow::Result;
use log::{info, warn};

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::RunError;
use crate::upload::UploadSummary;

/// Run the whole flow with an already loaded configuration.
///
/// Local preconditions (the host file) are checked before the first
/// network call. A failed authentication aborts before any upload.
/// Individual batch failures are only reported in the summary.
pub fn run_with_config(config: &Config) -> Result<UploadSummary> {
    let hosts = hosts::load_hosts(&config.hosts_file)?;
    info!("Loaded {} hosts from {}", hosts.len(), config.hosts_file.display());

    let blank = hosts::count_blank(&hosts);
    if blank > 0 {
        warn!(
            "{} blank line(s) in {} will be sent as empty host names",
            blank,
            config.hosts_file.display()
        );
    }

    let api = ApiClient::new(config)?;
    let auth = api.authenticate(
        &config.credentials.access_key,
        &config.credentials.access_secret,
    )?;
    if auth.token.is_empty() {
        return Err(RunError::Auth { status: auth.status }.into());
    }

    upload::upload_collections(
        &api,
        &auth.token,
        &hosts,
        config.batch_size,
        &config.name_template,
    )
}
