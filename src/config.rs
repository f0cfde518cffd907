use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;

/// Application configuration loaded from TOML config file.
/// All fields have defaults; the config file is optional.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Custom database path (overrides the working-directory default).
    pub db_path: Option<PathBuf>,
    /// CSV file to import when `import` is run without an argument.
    pub csv_path: Option<PathBuf>,
    /// Rows printed by the verification query after an import.
    pub sample_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            csv_path: None,
            sample_limit: 3,
        }
    }
}

impl AppConfig {
    /// Load config from `~/.config/trackdb/config.toml`.
    /// Returns default config if file doesn't exist.
    /// Logs a warning if the file exists but can't be parsed.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => match std::fs::read_to_string(&path) {
                Ok(contents) => match Self::parse(&contents) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", path.display());
                        config
                    }
                    Err(e) => {
                        log::warn!(
                            "Failed to parse {}: {}. Using defaults.",
                            path.display(),
                            e
                        );
                        Self::default()
                    }
                },
                Err(e) => {
                    log::warn!(
                        "Failed to read {}: {}. Using defaults.",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            _ => {
                log::debug!("No config file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Get the config file path.
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", crate::APP_NAME)
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

/// Database file used when neither the CLI nor the config names one.
pub fn default_db_path() -> PathBuf {
    PathBuf::from(crate::DEFAULT_DB_NAME)
}

/// CSV file used when neither the CLI nor the config names one.
pub fn default_csv_path() -> PathBuf {
    PathBuf::from(crate::DEFAULT_CSV_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert!(config.db_path.is_none());
        assert!(config.csv_path.is_none());
        assert_eq!(config.sample_limit, 3);
    }

    #[test]
    fn test_partial_config() {
        let config = AppConfig::parse(
            "db_path = \"/tmp/library.sqlite\"\nsample_limit = 10\n",
        )
        .unwrap();
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/library.sqlite")));
        assert!(config.csv_path.is_none());
        assert_eq!(config.sample_limit, 10);
    }

    #[test]
    fn test_bad_config_is_error() {
        assert!(AppConfig::parse("sample_limit = \"three\"").is_err());
    }
}
