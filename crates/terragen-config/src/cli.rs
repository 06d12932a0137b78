//! Command-line argument parsing for terragen.

use std::path::PathBuf;

use clap::Parser;
use terragen_terrain::{NoiseKind, Shape};

use crate::{Config, GenerationMode};

/// terragen command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "terragen", about = "Brush terrain generator for .map files")]
pub struct CliArgs {
    /// Where bounds come from: hint or manual.
    #[arg(long)]
    pub mode: Option<GenerationMode>,

    /// Source map holding the hint brush.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Manual-mode width.
    #[arg(long)]
    pub width: Option<f64>,

    /// Manual-mode length.
    #[arg(long)]
    pub length: Option<f64>,

    /// Manual-mode height.
    #[arg(long)]
    pub height: Option<f64>,

    /// Cell size along X (power of two).
    #[arg(long)]
    pub sub_x: Option<f64>,

    /// Cell size along Y (power of two).
    #[arg(long)]
    pub sub_y: Option<f64>,

    /// Texture of the visible surface.
    #[arg(long)]
    pub texture: Option<String>,

    /// flat, hill, crater, ridge, slope, volcano, valley, tunnel or slope-tunnel.
    #[arg(long)]
    pub shape: Option<Shape>,

    /// Shape amplitude.
    #[arg(long)]
    pub shape_height: Option<f64>,

    /// Opening height of a slope tunnel.
    #[arg(long)]
    pub tunnel_height: Option<f64>,

    /// Terrace height (0 = off).
    #[arg(long)]
    pub terrace: Option<f64>,

    /// perlin, simplex or random.
    #[arg(long)]
    pub noise: Option<NoiseKind>,

    /// Noise amplitude.
    #[arg(long)]
    pub variance: Option<f64>,

    /// Noise frequency.
    #[arg(long)]
    pub frequency: Option<f64>,

    /// Output file name.
    #[arg(long)]
    pub out: Option<String>,

    /// Hint mode: write into the source map instead of a sibling file.
    #[arg(long = "override")]
    pub override_source: bool,

    /// RNG seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        let generation = &mut self.generation;
        if let Some(mode) = args.mode {
            generation.mode = mode;
        }
        if let Some(ref file) = args.file {
            generation.file = Some(file.clone());
        }
        if let Some(w) = args.width {
            generation.width = w;
        }
        if let Some(l) = args.length {
            generation.length = l;
        }
        if let Some(h) = args.height {
            generation.height = h;
        }
        if let Some(x) = args.sub_x {
            generation.step_x = x;
        }
        if let Some(y) = args.sub_y {
            generation.step_y = y;
        }
        if let Some(ref texture) = args.texture {
            generation.texture = texture.clone();
        }
        if let Some(shape) = args.shape {
            generation.shape = shape;
        }
        if let Some(h) = args.shape_height {
            generation.shape_height = h;
        }
        if let Some(h) = args.tunnel_height {
            generation.tunnel_height = h;
        }
        if let Some(t) = args.terrace {
            generation.terrace_step = t;
        }
        if let Some(noise) = args.noise {
            generation.noise = noise;
        }
        if let Some(v) = args.variance {
            generation.variance = v;
        }
        if let Some(f) = args.frequency {
            generation.frequency = f;
        }
        if let Some(seed) = args.seed {
            generation.seed = Some(seed);
        }
        if let Some(ref out) = args.out {
            self.output.file_name = Some(out.clone());
        }
        if args.override_source {
            self.output.override_source = true;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs::parse_from([
            "terragen",
            "--mode",
            "manual",
            "--width",
            "512",
            "--shape",
            "slope-tunnel",
            "--noise",
            "simplex",
            "--sub-x",
            "32",
            "--out",
            "cave",
            "--override",
        ]);
        config.apply_cli_overrides(&args);
        assert_eq!(config.generation.mode, GenerationMode::Manual);
        assert_eq!(config.generation.width, 512.0);
        assert_eq!(config.generation.shape, Shape::SlopeTunnel);
        assert_eq!(config.generation.noise, NoiseKind::Simplex);
        assert_eq!(config.generation.step_x, 32.0);
        assert_eq!(config.output.file_name.as_deref(), Some("cave"));
        assert!(config.output.override_source);
        // Non-overridden fields retain defaults
        assert_eq!(config.generation.length, 2048.0);
        assert_eq!(config.generation.step_y, 64.0);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::parse_from(["terragen"]));
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_rejects_unknown_shape() {
        let result = CliArgs::try_parse_from(["terragen", "--shape", "mesa"]);
        assert!(result.is_err());
    }
}
