//! Dashboard Configuration
//! Loads data/logo locations and normalization settings from an optional JSON file.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "MCH_DASHBOARD_CONFIG";
/// Environment variable overriding the dataset path.
pub const DATA_PATH_ENV: &str = "MCH_DATA_PATH";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Runtime settings for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Pre-cleaned CSV dataset
    pub data_path: PathBuf,
    /// Sidebar logo, shown as-is
    pub logo_path: Option<PathBuf>,
    /// Index columns written by the exporting tool, dropped on load
    pub index_columns: Vec<String>,
    /// Date-bearing fields parsed besides `event_date`
    pub date_columns: Vec<String>,
    /// chrono format strings tried in order for textual dates
    pub date_formats: Vec<String>,
    /// Rows shown by the raw data preview
    pub raw_preview_rows: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("clean.csv"),
            logo_path: Some(PathBuf::from("logoCISM.png")),
            index_columns: vec![
                "Unnamed: 0".to_string(),
                String::new(),
                "column_1".to_string(),
            ],
            date_columns: vec![
                "start".to_string(),
                "end".to_string(),
                "dob".to_string(),
                "father_death_date".to_string(),
                "mother_death_date".to_string(),
            ],
            date_formats: crate::data::DateParser::default_formats(),
            raw_preview_rows: 100,
        }
    }
}

impl DashboardConfig {
    /// Resolve configuration from the environment.
    ///
    /// `MCH_DASHBOARD_CONFIG` wins over `dashboard.json`; without either the
    /// defaults apply. `MCH_DATA_PATH` overrides the data path last.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = env::var_os(CONFIG_ENV).map(PathBuf::from);
        let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None if fallback.is_file() => Self::from_file(&fallback)?,
            None => Self::default(),
        };

        if let Some(data_path) = env::var_os(DATA_PATH_ENV) {
            config.data_path = PathBuf::from(data_path);
        }

        Ok(config)
    }

    /// Read a JSON config file; missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "data_path": "data/records.csv", "raw_preview_rows": 20 }}"#).unwrap();

        let config = DashboardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.data_path, PathBuf::from("data/records.csv"));
        assert_eq!(config.raw_preview_rows, 20);
        assert_eq!(config.date_columns.len(), 5);
        assert_eq!(config.logo_path, Some(PathBuf::from("logoCISM.png")));
    }

    #[test]
    fn malformed_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = DashboardConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DashboardConfig::from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
