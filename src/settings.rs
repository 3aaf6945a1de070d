//! # Settings Module
//!
//! ## Purpose
//! One explicit configuration for EquiSim: the convergence solver, the molecule grid and the
//! logging level. Settings are plain serde structs with documented defaults and can be kept in
//! a JSON file next to the application.
//!
//! ## Key Features
//! - **Defaults**: every field has a default, a missing file gives the default settings
//! - **JSON persistence**: load from / save to a pretty printed JSON file
//! - **Validation**: tolerance, iteration cap, grid extents and log level are checked on load
//!
//! ## Usage Pattern
//! ```rust
//! use EquiSim::settings::EngineSettings;
//!
//! let settings = EngineSettings::from_json_str(r#"{"grid": {"cols": 12, "rows": 8}}"#).unwrap();
//! assert_eq!(settings.grid.capacity(), 96);
//! assert_eq!(settings.solver.max_iterations, 30);
//! ```
//!
//! ## Defaults
//! | Setting | Default |
//! |---------|---------|
//! | solver.tolerance | 1e-4 |
//! | solver.max_iterations | 30 |
//! | grid.cols x grid.rows | 10 x 10 |
//! | grid.min_rows..=grid.max_rows | 5..=20 |
//! | log_level | "info" |

use crate::Grid::GridError;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Bisection settings of the convergence solver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// largest accepted |Q - K|
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-4,
            max_iterations: 30,
        }
    }
}

/// Extents of the molecule grid. Concentrations are fractions of `capacity()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub cols: usize,
    pub rows: usize,
    pub min_rows: usize,
    pub max_rows: usize,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            cols: 10,
            rows: 10,
            min_rows: 5,
            max_rows: 20,
        }
    }
}

impl GridSettings {
    pub fn capacity(&self) -> usize {
        self.cols * self.rows
    }

    /// same grid with another number of rows, which must lie within `min_rows..=max_rows`
    pub fn with_rows(&self, rows: usize) -> Result<Self, GridError> {
        if rows < self.min_rows || rows > self.max_rows {
            return Err(GridError::RowsOutOfRange {
                rows,
                min: self.min_rows,
                max: self.max_rows,
            });
        }
        Ok(Self { rows, ..*self })
    }
}

/// All settings of the application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub solver: SolverSettings,
    pub grid: GridSettings,
    /// "debug", "info", "warn", "error" or "off"
    pub log_level: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            solver: SolverSettings::default(),
            grid: GridSettings::default(),
            log_level: "info".to_string(),
        }
    }
}

impl EngineSettings {
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: EngineSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json_string(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        self.validate()?;
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Settings from `path`, or the defaults if the file does not exist.
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        if path.as_ref().exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.solver.tolerance.is_finite() || self.solver.tolerance <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "solver tolerance must be positive, got {}",
                self.solver.tolerance
            )));
        }
        if self.solver.max_iterations == 0 {
            return Err(SettingsError::Invalid(
                "solver needs at least one iteration".to_string(),
            ));
        }
        let grid = &self.grid;
        if grid.cols == 0 || grid.min_rows == 0 || grid.min_rows > grid.max_rows {
            return Err(SettingsError::Invalid(format!(
                "grid of {} columns with rows in {}..={} is empty",
                grid.cols, grid.min_rows, grid.max_rows
            )));
        }
        grid.with_rows(grid.rows)
            .map_err(|e| SettingsError::Invalid(e.to_string()))?;
        self.log_level_filter()?;
        Ok(())
    }

    pub fn log_level_filter(&self) -> Result<LevelFilter, SettingsError> {
        match self.log_level.to_lowercase().as_str() {
            "debug" => Ok(LevelFilter::Debug),
            "info" => Ok(LevelFilter::Info),
            "warn" => Ok(LevelFilter::Warn),
            "error" => Ok(LevelFilter::Error),
            "off" => Ok(LevelFilter::Off),
            other => Err(SettingsError::Invalid(format!("unknown log level '{}'", other))),
        }
    }
}
