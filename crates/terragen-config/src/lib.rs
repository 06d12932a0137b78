//! User configuration for terragen.
//!
//! Settings persist to disk as `config.ron` and can be overridden per run from
//! the command line. Every section uses `#[serde(default)]`, so files written
//! by older or newer versions still load.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, Config, DebugConfig, GenerationConfig, GenerationMode, OutputConfig,
};
pub use error::ConfigError;
