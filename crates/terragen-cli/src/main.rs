//! `terragen` command-line entry point.
//!
//! Loads `config.ron`, applies command-line overrides, initialises logging and
//! runs one generation.
//!
//! Run with: `cargo run -p terragen-cli -- --file level.map --shape hill`

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use terragen_cli::{AppDirs, GenerationRequest, run_logged};
use terragen_config::{CliArgs, Config};
use terragen_terrain::{entropy_seed, require_power_of_two};
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match &args.config {
        Some(dir) => AppDirs::with_config_dir(dir),
        None => AppDirs::resolve()
            .unwrap_or_else(|_| AppDirs::with_config_dir(Path::new(".terragen"))),
    };

    let (mut config, config_err) = match Config::load_or_create(&dirs.config_dir) {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    config.apply_cli_overrides(&args);

    terragen_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    if let Some(err) = config_err {
        warn!("{err}; using default settings");
    }

    let generation = &config.generation;
    if let Err(err) = require_power_of_two(generation.step_x, generation.step_y) {
        error!("generation failed: {err}");
        return ExitCode::FAILURE;
    }

    let seed = generation.seed.unwrap_or_else(entropy_seed);
    let request = match GenerationRequest::from_config(&config, seed) {
        Ok(request) => request,
        Err(err) => {
            error!("generation failed: {err}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        mode = %generation.mode,
        shape = %generation.shape,
        noise = %generation.noise,
        seed,
        "generating terrain"
    );

    if run_logged(&request) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
