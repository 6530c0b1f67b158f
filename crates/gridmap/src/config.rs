//! Grid configuration: defaults, validation and TOML loading.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

const DEFAULT_ROWS: u32 = 7;
const DEFAULT_COLS: u32 = 7;
const DEFAULT_WIDTH: f64 = 1000.0;
const DEFAULT_HEIGHT: f64 = 750.0;
const DEFAULT_NUM_PATHS: u32 = 6;

/// Construction inputs for a [`GridMap`](crate::GridMap).
///
/// Every field is optional in a TOML file; missing fields take the
/// [`Default`] values. `seed = None` selects [`DEFAULT_SEED`](crate::DEFAULT_SEED).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridMapConfig {
    pub rows: u32,
    pub cols: u32,
    pub width: f64,
    pub height: f64,
    pub width_scale: f64,
    pub height_scale: f64,
    pub num_paths: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

impl Default for GridMapConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            width_scale: 1.0,
            height_scale: 1.0,
            num_paths: DEFAULT_NUM_PATHS,
            seed: None,
        }
    }
}

impl GridMapConfig {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols, ..Self::default() }
    }

    pub fn with_paths(mut self, num_paths: u32) -> Self {
        self.num_paths = num_paths;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_extent(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_scale(mut self, width_scale: f64, height_scale: f64) -> Self {
        self.width_scale = width_scale;
        self.height_scale = height_scale;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.rows < 2 {
            return Err(ConfigurationError::TooFewRows { rows: self.rows });
        }
        if self.cols < 1 {
            return Err(ConfigurationError::NoColumns);
        }
        for (field, value) in [
            ("width", self.width),
            ("height", self.height),
            ("width_scale", self.width_scale),
            ("height_scale", self.height_scale),
        ] {
            if !value.is_finite() {
                return Err(ConfigurationError::NonFiniteExtent { field, value });
            }
        }
        Ok(())
    }

    pub fn block_width(&self) -> f64 {
        self.width_scale * self.width / f64::from(self.cols)
    }

    pub fn block_height(&self) -> f64 {
        self.height_scale * self.height / f64::from(self.rows)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = toml::from_str(source).map_err(ConfigLoadError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

/// Errors from [`GridMapConfig::load`] and [`GridMapConfig::from_toml_str`].
#[derive(Debug)]
pub enum ConfigLoadError {
    Io(io::Error),
    Parse(toml::de::Error),
    Invalid(ConfigurationError),
}

impl fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config I/O error: {e}"),
            Self::Parse(e) => write!(f, "config is not valid TOML: {e}"),
            Self::Invalid(e) => write!(f, "invalid grid config: {e}"),
        }
    }
}

impl Error for ConfigLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid(e) => Some(e),
        }
    }
}

impl From<io::Error> for ConfigLoadError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ConfigurationError> for ConfigLoadError {
    fn from(e: ConfigurationError) -> Self {
        Self::Invalid(e)
    }
}
