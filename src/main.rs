//! NZBGet post-processing entry point

use extended_unrar::extraction::CliUnrar;
use extended_unrar::{Config, Outcome, logging, pipeline};
use std::process::ExitCode;
use tracing::{debug, error, info, warn};

fn main() -> ExitCode {
    logging::init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "ExtendedUnrar script successfully started"
    );

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return Outcome::Failure.into();
        }
    };

    let unrar = CliUnrar::new(&config.unrar_path);
    match unrar.resolve() {
        Some(resolved) => debug!(
            unrar = ?resolved,
            from_host_setting = config.unrar_from_host,
            "using unrar"
        ),
        None => warn!(
            unrar = ?config.unrar_path,
            "unrar executable not found, extractions will fail"
        ),
    }

    pipeline::run(&config, &unrar).into()
}
