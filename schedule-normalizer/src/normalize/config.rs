//! Run configuration for the normalizer.

use std::path::PathBuf;

use crate::domain::DirectionId;
use crate::tables::{TableError, Tables};

/// Environment variable naming a table file to use instead of the built-in tables.
pub const TABLES_ENV: &str = "NORMALIZER_TABLES";

/// Configuration parameters for a normalization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeConfig {
    /// Direction given to trips whose feed direction id is missing.
    pub default_direction: DirectionId,

    /// Whether stop names are cleaned for display.
    /// When false, feed stop names are passed through unchanged.
    pub clean_stop_names: bool,

    /// JSON table file replacing the built-in curated tables.
    pub tables_path: Option<PathBuf>,
}

impl NormalizeConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        default_direction: DirectionId,
        clean_stop_names: bool,
        tables_path: Option<PathBuf>,
    ) -> Self {
        Self {
            default_direction,
            clean_stop_names,
            tables_path,
        }
    }

    /// Default configuration, with the table path taken from
    /// `NORMALIZER_TABLES` when it is set and non-empty.
    pub fn from_env() -> Self {
        let tables_path = std::env::var_os(TABLES_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self {
            tables_path,
            ..Self::default()
        }
    }

    /// Builder-style setter for the table file.
    pub fn with_tables_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.tables_path = Some(path.into());
        self
    }

    /// The tables this configuration selects: the table file if one is set,
    /// otherwise the built-in tables.
    pub fn load_tables(&self) -> Result<Tables, TableError> {
        match &self.tables_path {
            Some(path) => Tables::load(path),
            None => Tables::builtin(),
        }
    }
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            default_direction: DirectionId::ZERO,
            clean_stop_names: true,
            tables_path: None,
        }
    }
}
