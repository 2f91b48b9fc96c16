use std::path::{Path, PathBuf};

use formcoach_domain::DEFAULT_SEARCH_LIMIT;
use log::warn;
use serde::Deserialize;

pub const CONFIG_ENV: &str = "FORMCOACH_CONFIG";

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub catalog_path: PathBuf,
    pub data_dir: PathBuf,
    pub search_limit: usize,
    pub system_prompt_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("data/megaGymDataset.csv"),
            data_dir: PathBuf::from(".formcoach"),
            search_limit: DEFAULT_SEARCH_LIMIT,
            system_prompt_path: None,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("search limit must be greater than 0")]
    InvalidSearchLimit,
}

impl Settings {
    /// Load settings from a JSON file, or the defaults if no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let settings: Self =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if settings.search_limit == 0 {
            return Err(ConfigError::InvalidSearchLimit);
        }

        Ok(settings)
    }

    /// Read the assistant system prompt. A missing prompt file yields an empty prompt.
    #[must_use]
    pub fn system_prompt(&self) -> String {
        let Some(path) = &self.system_prompt_path else {
            return String::new();
        };

        match std::fs::read_to_string(path) {
            Ok(prompt) => prompt,
            Err(err) => {
                warn!("failed to read system prompt {}: {err}", path.display());
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    fn config_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_load_defaults() {
        assert_eq!(Settings::load(None).unwrap(), Settings::default());
        assert_eq!(Settings::default().search_limit, 8);
    }

    #[test]
    fn test_load_partial_file() {
        let file = config_file(r#"{"data_dir": "/tmp/coach", "search_limit": 3}"#);
        assert_eq!(
            Settings::load(Some(file.path())).unwrap(),
            Settings {
                data_dir: PathBuf::from("/tmp/coach"),
                search_limit: 3,
                ..Settings::default()
            }
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Settings::load(Some(&dir.path().join("missing.json"))),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_load_invalid_file() {
        let file = config_file(r#"{"search_limt": 3}"#);
        assert!(matches!(
            Settings::load(Some(file.path())),
            Err(ConfigError::Parse { .. })
        ));
        let file = config_file(r#"{"search_limit": 0}"#);
        assert!(matches!(
            Settings::load(Some(file.path())),
            Err(ConfigError::InvalidSearchLimit)
        ));
    }

    #[test]
    fn test_system_prompt() {
        let file = config_file("You are a fitness coach.");
        let settings = Settings {
            system_prompt_path: Some(file.path().to_path_buf()),
            ..Settings::default()
        };
        assert_eq!(settings.system_prompt(), "You are a fitness coach.");

        let settings = Settings {
            system_prompt_path: Some(PathBuf::from("/nonexistent/prompt.txt")),
            ..Settings::default()
        };
        assert_eq!(settings.system_prompt(), "");
        assert_eq!(Settings::default().system_prompt(), "");
    }
}
