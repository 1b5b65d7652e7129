// SPDX-License-Identifier: MIT
//
// stylemark.toml — optional user configuration.
//
// Every key is optional; a missing file means all defaults.
//
//   stylesheet       = "assets/tokens.css"   # token source, else the builtin sheet
//   default_format   = "scss"                # export format when --format is absent
//   default_family   = "primary"             # palette family for `palette --apply`
//   preferences_path = "~/.stylemark.toml"   # where the theme choice is kept
//   prefers_dark     = false                 # system preference stand-in
//   log_level        = "info"                # used when STYLEMARK_LOG is unset

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use sm_tokens::ExportFormat;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub stylesheet: Option<PathBuf>,
    pub default_format: String,
    pub default_family: String,
    pub preferences_path: Option<PathBuf>,
    pub prefers_dark: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stylesheet: None,
            default_format: ExportFormat::default().to_string(),
            default_family: "primary".to_string(),
            preferences_path: None,
            prefers_dark: false,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// `<config_dir>/stylemark/stylemark.toml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("stylemark").join("stylemark.toml"))
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing file yields defaults; a present but invalid one is an
    /// error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            return Ok(Self::default());
        };
        match fs::read_to_string(&path) {
            Ok(text) => Self::parse(&text)
                .with_context(|| format!("invalid config file {}", path.display())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => {
                Err(e).with_context(|| format!("failed to read config file {}", path.display()))
            }
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.export_format()?;
        Ok(config)
    }

    /// The configured default export format.
    pub fn export_format(&self) -> Result<ExportFormat> {
        self.default_format
            .parse()
            .context("invalid `default_format` in config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::parse("default_format = \"tailwind\"\nprefers_dark = true\n").unwrap();
        assert_eq!(config.export_format().unwrap(), ExportFormat::Tailwind);
        assert!(config.prefers_dark);
        assert_eq!(config.default_family, "primary");
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn rejects_unknown_keys_and_formats() {
        assert!(Config::parse("colour = \"red\"").is_err());
        assert!(Config::parse("default_format = \"yaml\"").is_err());
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stylemark.toml");
        fs::write(&path, "stylesheet = \"tokens.css\"\nlog_level = \"debug\"\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.stylesheet, Some(PathBuf::from("tokens.css")));
        assert_eq!(config.log_level, "debug");
    }
}
