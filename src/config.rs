// config.rs - Board settings from an optional JSON file plus command-line overrides

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use life_engine::{Engine, LifeResult, RowTaskEngine, SerialEngine};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// How the main board computes a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Single pass over the grid
    #[default]
    Serial,
    /// One tokio task per row
    Rows,
}

impl EngineKind {
    pub fn build(self) -> LifeResult<Box<dyn Engine>> {
        Ok(match self {
            EngineKind::Serial => Box::new(SerialEngine),
            EngineKind::Rows => Box::new(RowTaskEngine::new()?),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Side length of the square board
    pub board_size: usize,
    /// Pixel size of one board cell
    pub cell_size: f32,
    /// Time between generations on the main board (ms)
    pub update_interval_ms: u64,
    /// Chance of a cell starting alive when the board is randomized
    pub initial_population: f64,
    /// Time between generations in library previews (ms)
    pub preview_interval_ms: u64,
    pub engine: EngineKind,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            board_size: life_engine::grid::DEFAULT_BOARD_SIZE,
            cell_size: 7.0,
            update_interval_ms: 500,
            initial_population: life_engine::board::DEFAULT_POPULATION,
            preview_interval_ms: 500,
            engine: EngineKind::Serial,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid {
                field,
                reason: reason.into(),
            })
        }

        if !(1..=1000).contains(&self.board_size) {
            return invalid("board_size", format!("{} is not within 1..=1000", self.board_size));
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return invalid("cell_size", "must be a positive number of pixels");
        }
        if self.update_interval_ms == 0 {
            return invalid("update_interval_ms", "must be at least 1");
        }
        if self.preview_interval_ms == 0 {
            return invalid("preview_interval_ms", "must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.initial_population) {
            return invalid(
                "initial_population",
                format!("{} is not within 0..=1", self.initial_population),
            );
        }
        Ok(())
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }

    pub fn preview_interval(&self) -> Duration {
        Duration::from_millis(self.preview_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().unwrap();
        assert_eq!(config.board_size, 100);
        assert_eq!(config.update_interval(), Duration::from_millis(500));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "board_size": 40, "engine": "rows" }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.board_size, 40);
        assert_eq!(config.engine, EngineKind::Rows);
        assert_eq!(config.preview_interval_ms, 500);
    }

    #[test]
    fn unknown_engine_is_rejected() {
        assert!(serde_json::from_str::<AppConfig>(r#"{ "engine": "gpu" }"#).is_err());
    }

    #[test]
    fn out_of_range_values_fail_validation() {
        let bad = [
            AppConfig { board_size: 0, ..AppConfig::default() },
            AppConfig { cell_size: -1.0, ..AppConfig::default() },
            AppConfig { update_interval_ms: 0, ..AppConfig::default() },
            AppConfig { initial_population: 1.2, ..AppConfig::default() },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })), "{config:?}");
        }
    }

    #[test]
    fn load_reports_missing_file_and_bad_json() {
        let dir = std::env::temp_dir().join(format!("life_board_config_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let missing = dir.join("missing.json");
        assert!(matches!(AppConfig::load(&missing), Err(ConfigError::Io { .. })));

        let broken = dir.join("broken.json");
        fs::write(&broken, "{ board_size: ").unwrap();
        assert!(matches!(AppConfig::load(&broken), Err(ConfigError::Parse { .. })));

        let good = dir.join("good.json");
        fs::write(&good, r#"{ "update_interval_ms": 250 }"#).unwrap();
        assert_eq!(AppConfig::load(&good).unwrap().update_interval_ms, 250);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn engines_build() {
        assert_eq!(EngineKind::Serial.build().unwrap().name(), "serial");
        assert_eq!(EngineKind::Rows.build().unwrap().name(), "rows");
    }
}
