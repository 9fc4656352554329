//! Configuration: level validation, level files and session settings.
//!
//! Levels come from a JSON array of [`GridConfiguration`] or from the built-in
//! list. Session settings are read from environment variables, falling back to
//! defaults on missing or unparsable values.
//!
//! # Environment Variables
//!
//! - `JIGSAW_SEED`: shuffle seed (default: derived from the clock)
//! - `JIGSAW_SNAP_THRESHOLD`: drop-target distance in world units
//! - `JIGSAW_LEVELS_PATH`: JSON level file (default: built-in levels)
//! - `JIGSAW_MODE`: `drag` or `click`, overriding every level's mode

use std::env;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::types::{
    GridConfiguration, ImagePattern, PuzzleMode, SourceImage, BOARD_MARGIN_RANGE,
    DEFAULT_SNAP_THRESHOLD, MAX_GRID_DIMENSION, MIN_GRID_DIMENSION, SPACING_RANGE,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} = {value} is outside [{min}, {max}]")]
    DimensionOutOfRange {
        name: &'static str,
        value: u8,
        min: u8,
        max: u8,
    },
    #[error("{name} = {value} is outside [{min}, {max}]")]
    FactorOutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("level has no source image")]
    MissingImage,
    #[error("source image is {width}x{height}; both sides must be non-zero")]
    EmptyImage { width: u32, height: u32 },
    #[error("level list is empty")]
    NoLevels,
    #[error("level {index}: {source}")]
    Level {
        index: usize,
        #[source]
        source: Box<ConfigError>,
    },
    #[error("invalid level file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot read level file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

fn check_dimension(name: &'static str, value: u8) -> Result<(), ConfigError> {
    if (MIN_GRID_DIMENSION..=MAX_GRID_DIMENSION).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::DimensionOutOfRange {
            name,
            value,
            min: MIN_GRID_DIMENSION,
            max: MAX_GRID_DIMENSION,
        })
    }
}

fn check_factor(name: &'static str, value: f32, (min, max): (f32, f32)) -> Result<(), ConfigError> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::FactorOutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

/// Check a level against the grid limits.
///
/// Dimensions in range also guarantee the level fits the tile pool.
pub fn validate(config: &GridConfiguration) -> Result<(), ConfigError> {
    check_dimension("rows", config.rows)?;
    check_dimension("columns", config.columns)?;
    check_factor("spacing", config.spacing, SPACING_RANGE)?;
    check_factor("board_margin", config.board_margin, BOARD_MARGIN_RANGE)?;
    let image = config.image.ok_or(ConfigError::MissingImage)?;
    if image.width == 0 || image.height == 0 {
        return Err(ConfigError::EmptyImage {
            width: image.width,
            height: image.height,
        });
    }
    Ok(())
}

/// Parse and validate a JSON array of levels.
///
/// # Examples
///
/// ```
/// use tui_jigsaw_core::config::levels_from_json;
/// use tui_jigsaw_core::types::PuzzleMode;
///
/// let levels = levels_from_json(
///     r#"[{ "rows": 3, "columns": 3, "image": { "width": 600, "height": 600 }, "mode": "clickAndSwap" }]"#,
/// )
/// .unwrap();
/// assert_eq!(levels[0].mode, PuzzleMode::ClickAndSwap);
/// ```
pub fn levels_from_json(json: &str) -> Result<Vec<GridConfiguration>, ConfigError> {
    let levels: Vec<GridConfiguration> = serde_json::from_str(json)?;
    if levels.is_empty() {
        return Err(ConfigError::NoLevels);
    }
    for (index, level) in levels.iter().enumerate() {
        validate(level).map_err(|e| ConfigError::Level {
            index,
            source: Box::new(e),
        })?;
    }
    Ok(levels)
}

pub fn load_levels(path: &Path) -> Result<Vec<GridConfiguration>, ConfigError> {
    let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    levels_from_json(&json)
}

/// Built-in level list used when no level file is configured.
pub fn default_levels() -> Vec<GridConfiguration> {
    vec![
        GridConfiguration::new(
            2,
            3,
            Some(SourceImage::new(1600, 900).with_pattern(ImagePattern::Gradient)),
            PuzzleMode::DragAndDrop,
        ),
        GridConfiguration::new(
            3,
            3,
            Some(SourceImage::new(1200, 900).with_pattern(ImagePattern::Rings)),
            PuzzleMode::ClickAndSwap,
        ),
        GridConfiguration::new(
            3,
            4,
            Some(SourceImage::new(1600, 900).with_pattern(ImagePattern::Checker)),
            PuzzleMode::DragAndDrop,
        ),
        GridConfiguration::new(
            4,
            5,
            Some(SourceImage::new(1600, 1000).with_pattern(ImagePattern::Stripes)),
            PuzzleMode::ClickAndSwap,
        ),
    ]
}

/// Apply the `JIGSAW_MODE` override, if any, to every level.
pub fn apply_mode_override(levels: &mut [GridConfiguration], mode: Option<PuzzleMode>) {
    if let Some(mode) = mode {
        for level in levels {
            level.mode = mode;
        }
    }
}

pub fn mode_override_from_env() -> Option<PuzzleMode> {
    env::var("JIGSAW_MODE")
        .ok()
        .and_then(|s| PuzzleMode::from_str(&s))
}

pub fn levels_path_from_env() -> Option<String> {
    env::var("JIGSAW_LEVELS_PATH")
        .ok()
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(s) })
}

/// Tunables of a puzzle session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    /// Maximum world distance between a dropped tile and its swap target.
    pub snap_threshold: f32,
    pub seed: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            seed: 1,
        }
    }
}

impl SessionSettings {
    /// Create from environment variables.
    ///
    /// `default_threshold` is used when `JIGSAW_SNAP_THRESHOLD` is unset or invalid.
    pub fn from_env(default_threshold: f32) -> Self {
        let seed = env::var("JIGSAW_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let snap_threshold = env::var("JIGSAW_SNAP_THRESHOLD")
            .ok()
            .and_then(|s| s.trim().parse::<f32>().ok())
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(default_threshold);

        Self {
            snap_threshold,
            seed,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
