use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Dashboard settings. Every field has a default, so a config file only
/// needs the keys it wants to change.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("zimra_data.csv"),
            window_width: 1280.0,
            window_height: 860.0,
        }
    }
}

impl DashboardConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the effective config: defaults, then `config_file`, then an
    /// explicit data path (command line or environment, already merged).
    pub fn resolve(
        config_file: Option<&Path>,
        data_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(path) = data_path {
            config.data_path = path;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "data_path": "/srv/audit/q3.csv" }}"#).unwrap();

        let config = DashboardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.data_path, PathBuf::from("/srv/audit/q3.csv"));
        assert_eq!(config.window_width, DashboardConfig::default().window_width);
    }

    #[test]
    fn explicit_data_path_wins_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "data_path": "from_file.csv", "window_width": 900 }}"#).unwrap();

        let config =
            DashboardConfig::resolve(Some(file.path()), Some(PathBuf::from("cli.csv"))).unwrap();
        assert_eq!(config.data_path, PathBuf::from("cli.csv"));
        assert_eq!(config.window_width, 900.0);

        let config = DashboardConfig::resolve(Some(file.path()), None).unwrap();
        assert_eq!(config.data_path, PathBuf::from("from_file.csv"));
    }

    #[test]
    fn no_inputs_means_defaults() {
        assert_eq!(
            DashboardConfig::resolve(None, None).unwrap(),
            DashboardConfig::default()
        );
    }

    #[test]
    fn bad_json_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "data_path = nope").unwrap();
        assert!(matches!(
            DashboardConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            DashboardConfig::resolve(Some(&dir.path().join("absent.json")), None),
            Err(ConfigError::Io { .. })
        ));
    }
}
