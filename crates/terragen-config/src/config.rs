//! Configuration structs with defaults and RON persistence.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use terragen_terrain::{NoiseKind, Shape, TerrainParams};

use crate::error::ConfigError;

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where generated maps are written.
    pub output: OutputConfig,
    /// Default generation parameters.
    pub generation: GenerationConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for manual-mode output.
    pub folder: PathBuf,
    /// File name used in manual mode when no name is given.
    pub manual_file_name: String,
    /// Explicit output file name. Hint mode writes it next to the source map.
    pub file_name: Option<String>,
    /// Hint mode only: write back into the source map.
    pub override_source: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("."),
            manual_file_name: "terrain_output.map".to_string(),
            file_name: None,
            override_source: false,
        }
    }
}

/// Where the generation bounds come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationMode {
    /// Bounds of the hint brush in a source map.
    #[default]
    Hint,
    /// Bounds from width/length/height, centred on the origin.
    Manual,
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GenerationMode::Hint => "hint",
            GenerationMode::Manual => "manual",
        })
    }
}

impl FromStr for GenerationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hint" => Ok(GenerationMode::Hint),
            "manual" => Ok(GenerationMode::Manual),
            other => Err(format!("unknown mode '{other}' (expected hint or manual)")),
        }
    }
}

/// Generation parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    pub mode: GenerationMode,
    /// Source map for hint mode.
    pub file: Option<PathBuf>,
    /// Manual-mode extent along X.
    pub width: f64,
    /// Manual-mode extent along Y.
    pub length: f64,
    /// Manual-mode extent along Z.
    pub height: f64,
    /// Cell size along X.
    pub step_x: f64,
    /// Cell size along Y.
    pub step_y: f64,
    /// Texture of the visible surface.
    pub texture: String,
    pub shape: Shape,
    pub shape_height: f64,
    /// Opening height of a slope tunnel.
    pub tunnel_height: f64,
    /// Terrace height (0 = off).
    pub terrace_step: f64,
    pub noise: NoiseKind,
    pub variance: f64,
    pub frequency: f64,
    /// Fixed RNG seed. A fresh one is drawn per run when unset.
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        let params = TerrainParams::default();
        Self {
            mode: GenerationMode::Hint,
            file: None,
            width: 2048.0,
            length: 2048.0,
            height: 256.0,
            step_x: params.step_x,
            step_y: params.step_y,
            texture: "common/caulk".to_string(),
            shape: params.shape,
            shape_height: params.shape_height,
            tunnel_height: params.tunnel_height,
            terrace_step: params.terrace_step,
            noise: params.noise,
            variance: params.variance,
            frequency: params.frequency,
            seed: None,
        }
    }
}

impl GenerationConfig {
    /// Terrain parameters for these settings.
    pub fn terrain_params(&self) -> TerrainParams {
        TerrainParams {
            step_x: self.step_x,
            step_y: self.step_y,
            shape: self.shape,
            shape_height: self.shape_height,
            tunnel_height: self.tunnel_height,
            terrace_step: self.terrace_step,
            noise: self.noise,
            variance: self.variance,
            frequency: self.frequency,
        }
    }
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
                    path: config_path.clone(),
                    source,
                })?;
            let config: Config = ron::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: config_path.clone(),
                source,
            })?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let write_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| ConfigError::Write { path, source }
        };
        std::fs::create_dir_all(config_dir).map_err(write_err(config_dir))?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, serialized).map_err(write_err(config_path.as_path()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("manual_file_name: \"terrain_output.map\""), "{ron_str}");
        assert!(ron_str.contains("texture: \"common/caulk\""), "{ron_str}");
        assert!(ron_str.contains("shape: flat"), "{ron_str}");
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_generation_defaults() {
        let generation = GenerationConfig::default();
        assert_eq!(generation.mode, GenerationMode::Hint);
        assert_eq!((generation.width, generation.length, generation.height), (2048.0, 2048.0, 256.0));
        assert_eq!((generation.step_x, generation.step_y), (64.0, 64.0));
        assert_eq!(generation.variance, 32.0);
        assert_eq!(generation.frequency, 0.005);
        assert_eq!(generation.terrain_params(), TerrainParams::default());
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(generation: (shape: hill, variance: 0.0))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.output, OutputConfig::default());
        assert_eq!(config.generation.shape, Shape::Hill);
        assert_eq!(config.generation.variance, 0.0);
        assert_eq!(config.generation.step_x, 64.0);
    }

    #[test]
    fn test_extra_field_ignored() {
        let ron_str = "(future_setting: true)";
        let result: Result<Config, _> = ron::from_str(ron_str);
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.generation.mode = GenerationMode::Manual;
        config.generation.noise = NoiseKind::Simplex;
        config.generation.seed = Some(1234);
        config.output.folder = dir.path().join("maps");

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{{not valid}}").unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
        assert!(err.to_string().contains(CONFIG_FILE_NAME), "{err}");
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("Manual".parse::<GenerationMode>(), Ok(GenerationMode::Manual));
        assert_eq!(GenerationMode::Hint.to_string(), "hint");
        assert!("auto".parse::<GenerationMode>().is_err());
    }
}
