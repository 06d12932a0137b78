//! The generation pipeline.
//!
//! bounds -> grid fit -> elevation -> brush text -> splice or standalone file

use std::path::{Path, PathBuf};

use terragen_config::{Config, GenerationMode};
use terragen_map::{
    CAULK_TEXTURE, GeneratedGeometry, LineSpan, find_hint_brush, output_path, read_map,
    serialize_terrain, serialize_tunnel, splice, standalone_map, write_map,
};
use terragen_math::BrushBounds;
use terragen_terrain::{
    TerrainParams, TunnelShape, fit_to_grid, generate_elevation, generate_tunnel, seeded_rng,
};
use tracing::{error, info, warn};

use crate::error::{DimensionProblem, GenerationError};

/// Largest manual dimension the target engine accepts.
pub const MAX_DIMENSION: f64 = 131_072.0;

/// Where the generation bounds come from.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundsSource {
    /// The hint brush in this map.
    Hint(PathBuf),
    /// A box of this size centred on the origin.
    Manual { width: f64, length: f64, height: f64 },
}

/// Everything one generation call needs.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub source: BoundsSource,
    pub params: TerrainParams,
    /// Texture of the visible surface. Blank means caulk.
    pub texture: String,
    /// Output file name; see [`terragen_map::output_path`].
    pub output_name: Option<String>,
    /// Hint mode only: replace the hint brush in the source map itself.
    pub override_source: bool,
    /// Manual-mode output directory.
    pub output_folder: PathBuf,
    /// Seed for every random draw of the call.
    pub seed: u64,
}

impl GenerationRequest {
    /// Build a request from configuration (after CLI overrides).
    pub fn from_config(config: &Config, seed: u64) -> Result<Self, GenerationError> {
        let generation = &config.generation;
        let (source, output_name) = match generation.mode {
            GenerationMode::Hint => {
                let file = generation.file.clone().ok_or(GenerationError::MissingSourceFile)?;
                (BoundsSource::Hint(file), config.output.file_name.clone())
            }
            GenerationMode::Manual => {
                let name = config
                    .output
                    .file_name
                    .clone()
                    .unwrap_or_else(|| config.output.manual_file_name.clone());
                let source = BoundsSource::Manual {
                    width: generation.width,
                    length: generation.length,
                    height: generation.height,
                };
                (source, Some(name))
            }
        };
        Ok(Self {
            source,
            params: generation.terrain_params(),
            texture: generation.texture.clone(),
            output_name,
            override_source: config.output.override_source,
            output_folder: config.output.folder.clone(),
            seed,
        })
    }

    fn texture(&self) -> &str {
        match self.texture.trim() {
            "" => CAULK_TEXTURE,
            texture => texture,
        }
    }
}

/// Outcome of a successful generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    /// File that was written.
    pub output: PathBuf,
    /// Bounds after snapping to the grid.
    pub bounds: BrushBounds,
    pub cells_x: usize,
    pub cells_y: usize,
    pub brush_count: usize,
    pub seed: u64,
}

/// Source map text and the block to replace in it.
struct HintSource<'a> {
    path: &'a Path,
    span: LineSpan,
    text: String,
}

/// Validate manual dimensions and lay them out around the origin.
pub fn manual_bounds(width: f64, length: f64, height: f64) -> Result<BrushBounds, DimensionProblem> {
    for (axis, value) in [("width", width), ("length", length), ("height", height)] {
        if value.is_nan() || value <= 0.0 {
            return Err(DimensionProblem::NotPositive { axis, value });
        }
        if value > MAX_DIMENSION {
            return Err(DimensionProblem::TooLarge { axis, value });
        }
    }
    Ok(BrushBounds::centered(width, length, height))
}

/// Generate terrain for `request` and write it out.
pub fn generate_and_export(request: &GenerationRequest) -> Result<GenerationReport, GenerationError> {
    let mut rng = seeded_rng(request.seed);
    let params = &request.params;

    let (mut bounds, hint) = match &request.source {
        BoundsSource::Manual {
            width,
            length,
            height,
        } => (manual_bounds(*width, *length, *height)?, None),
        BoundsSource::Hint(path) => {
            let text = read_map(path)?;
            let brush = {
                let lines: Vec<&str> = text.lines().collect();
                find_hint_brush(&lines)?
            };
            let source = HintSource {
                path,
                span: brush.span,
                text,
            };
            (brush.bounds, Some(source))
        }
    };

    if fit_to_grid(&mut bounds, params.step_x, params.step_y)? {
        info!(
            width = bounds.width(),
            length = bounds.length(),
            "bounds adjusted to fit the grid"
        );
    }

    let texture = request.texture();
    let (geometry, cells_x, cells_y) = match TunnelShape::from_params(params) {
        Some(shape) => {
            let grids = generate_tunnel(&bounds, params, shape, &mut rng)?;
            let geometry =
                serialize_tunnel(&bounds, &grids, params.step_x, params.terrace_step, texture);
            let (u, v) = (grids.floor.u_axis().cells(), grids.floor.v_axis().cells());
            (geometry, u, v)
        }
        None => {
            let grid = generate_elevation(&bounds, params, &mut rng)?;
            let geometry = serialize_terrain(&bounds, &grid, params.splits_diagonally(), texture);
            (geometry, grid.u_axis().cells(), grid.v_axis().cells())
        }
    };
    info!(cells_x, cells_y, brushes = geometry.brush_count, "terrain generated");

    let output = write_output(request, hint.as_ref(), &geometry)?;
    Ok(GenerationReport {
        output,
        bounds,
        cells_x,
        cells_y,
        brush_count: geometry.brush_count,
        seed: request.seed,
    })
}

fn write_output(
    request: &GenerationRequest,
    hint: Option<&HintSource<'_>>,
    geometry: &GeneratedGeometry,
) -> Result<PathBuf, GenerationError> {
    let path = output_path(
        hint.map(|h| h.path),
        request.output_name.as_deref(),
        request.override_source,
        &request.output_folder,
    )?;
    let contents = match hint {
        Some(h) => splice(&h.text, h.span, &geometry.text)?,
        None => standalone_map(&geometry.text),
    };
    if hint.is_some() && request.override_source {
        warn!(path = %path.display(), "overwriting source map");
    }
    write_map(&path, &contents)?;
    Ok(path)
}

/// Run a generation, logging the outcome. Returns whether it succeeded.
pub fn run_logged(request: &GenerationRequest) -> bool {
    match generate_and_export(request) {
        Ok(report) => {
            info!(
                output = %report.output.display(),
                brushes = report.brush_count,
                seed = report.seed,
                "generation finished"
            );
            true
        }
        Err(err) => {
            match err.path() {
                Some(path) => error!(path = %path.display(), "generation failed: {err}"),
                None => error!("generation failed: {err}"),
            }
            false
        }
    }
}
