//! Structured logging for terragen.
//!
//! Console output with uptime timestamps and module paths, plus a JSON log
//! file in debug builds. The level comes from `RUST_LOG` when set, otherwise
//! from the `debug.log_level` config setting.

use std::path::Path;

use terragen_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log written in debug builds.
pub const LOG_FILE_NAME: &str = "terragen.log";

/// Filter directives for `config`, falling back to [`DEFAULT_FILTER`].
pub fn filter_directives(config: Option<&Config>) -> String {
    config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Install the global tracing subscriber.
///
/// * `log_dir` - directory for the JSON log file (debug builds only)
/// * `debug_build` - whether file logging is enabled
/// * `config` - source of the log level when `RUST_LOG` is unset
///
/// Returns `false` when a global subscriber was already installed.
///
/// ```no_run
/// use terragen_config::Config;
/// use terragen_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) -> bool {
    let directives = filter_directives(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directives));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        return subscriber.with(file_layer).try_init().is_ok();
    }

    subscriber.try_init().is_ok()
}
