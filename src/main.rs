// Entrypoint for the CLI application.
// - Keeps `main` small: load configuration, run the upload flow, map
//   the result to an exit status.
// - Fatal errors are logged rather than printed so every line of output
//   goes through the same logger.

use std::process::ExitCode;

use log::{error, info};
use pc_collections_cli::{config::Config, run_with_config};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let summary = run_with_config(&config)?;
    info!(
        "Finished: {} of {} collections created, {} failed",
        summary.succeeded(),
        summary.outcomes.len(),
        summary.failed()
    );
    Ok(())
}
