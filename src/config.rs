//! Optional `insertgen.toml` configuration.
//!
//! ```toml
//! input = "models/user.go"
//! strict = true
//! log_level = "info"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "insertgen.toml";

/// Source path used when neither the CLI nor a config file names one.
pub const DEFAULT_INPUT: &str = "./example.go";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Source file to scan.
    pub input: PathBuf,
    /// Exit with a distinct code when the file cannot be parsed.
    pub strict: bool,
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            strict: false,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from an explicit file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::parse(&content)
    }

    /// Load `explicit` if given, else the first existing of
    /// `./insertgen.toml` and `<config dir>/insertgen/config.toml`,
    /// else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::discover() {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }
        dirs::config_dir()
            .map(|dir| dir.join("insertgen").join("config.toml"))
            .filter(|path| path.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.input, PathBuf::from("./example.go"));
        assert!(!config.strict);
    }

    #[test]
    fn test_parse_all_keys() {
        let config = Config::parse(
            r#"
input = "models/user.go"
strict = true
log_level = "debug"
"#,
        )
        .unwrap();
        assert_eq!(config.input, PathBuf::from("models/user.go"));
        assert!(config.strict);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Config::parse("output = \"x.sql\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_missing_explicit_file() {
        let path = std::env::temp_dir().join("insertgen-missing-config.toml");
        assert!(matches!(Config::load(Some(&path)), Err(Error::Config(_))));
    }
}
