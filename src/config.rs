//! Phlog configuration module.
//!
//! Handles loading and validating `phlogmap.toml`. The file is
//! optional and lives in the phlog directory itself, next to the posts:
//!
//! ```text
//! phlog/
//! ├── phlogmap.toml            # Optional, overrides stock defaults
//! ├── gophermap.tmpl           # Template passed on the command line
//! ├── 2024-05-01__My_Post.txt
//! └── AR_2023/
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! output_file = "gophermap"             # Written into the phlog directory
//! archive_prefix = "AR_"                # "" disables archive grouping
//! text_extensions = ["txt", "md"]       # Regular files listed as posts
//! link_extension = "glink"              # Pointer files (first line = selector)
//! date_format = "%Y-%m-%d %H:%M:%S %Z"  # {{ DATE_TIME }} format (strftime)
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the phlog directory.
pub const CONFIG_FILE: &str = "phlogmap.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Phlog configuration loaded from `phlogmap.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhlogConfig {
    /// File name of the generated gophermap inside the phlog directory.
    pub output_file: String,
    /// Directory name prefix marking archive directories. Empty disables it.
    pub archive_prefix: String,
    /// Extensions (without dot, case-sensitive) of files listed as posts.
    pub text_extensions: Vec<String>,
    /// Extension (without dot) of glink pointer files.
    pub link_extension: String,
    /// strftime pattern for the `DATE_TIME` placeholder.
    pub date_format: String,
}

impl Default for PhlogConfig {
    fn default() -> Self {
        Self {
            output_file: "gophermap".to_string(),
            archive_prefix: "AR_".to_string(),
            text_extensions: vec!["txt".to_string(), "md".to_string()],
            link_extension: "glink".to_string(),
            date_format: "%Y-%m-%d %H:%M:%S %Z".to_string(),
        }
    }
}

impl PhlogConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_file.is_empty() {
            return Err(ConfigError::Validation(
                "output_file must not be empty".into(),
            ));
        }
        if self.output_file.contains(&['/', '\\'][..])
            || matches!(self.output_file.as_str(), "." | "..")
        {
            return Err(ConfigError::Validation(format!(
                "output_file must be a plain file name, got '{}'",
                self.output_file
            )));
        }
        if self.text_extensions.is_empty() {
            return Err(ConfigError::Validation(
                "text_extensions must not be empty".into(),
            ));
        }
        for ext in self.text_extensions.iter().chain([&self.link_extension]) {
            if ext.is_empty() || ext.starts_with('.') {
                return Err(ConfigError::Validation(format!(
                    "extensions must be non-empty and given without a dot, got '{ext}'"
                )));
            }
        }
        if self.text_extensions.contains(&self.link_extension) {
            return Err(ConfigError::Validation(format!(
                "link_extension '{}' is also listed in text_extensions",
                self.link_extension
            )));
        }
        if StrftimeItems::new(&self.date_format).any(|item| item == Item::Error) {
            return Err(ConfigError::Validation(format!(
                "date_format '{}' is not a valid strftime pattern",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Text suffixes including the dot, e.g. `[".txt", ".md"]`.
    pub fn text_suffixes(&self) -> Vec<String> {
        self.text_extensions
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect()
    }

    /// Link suffix including the dot, e.g. `".glink"`.
    pub fn link_suffix(&self) -> String {
        format!(".{}", self.link_extension)
    }

    /// The archive prefix, or `None` when archive grouping is disabled.
    pub fn archive_prefix(&self) -> Option<&str> {
        Some(self.archive_prefix.as_str()).filter(|p| !p.is_empty())
    }
}

/// Parse and validate the contents of a `phlogmap.toml`.
///
/// Missing keys take their stock defaults.
pub fn parse_config(content: &str) -> Result<PhlogConfig, ConfigError> {
    let config: PhlogConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from `phlogmap.toml` in the given directory, falling back to
/// stock defaults when the file is absent.
pub fn load_config(dir: &Path) -> Result<PhlogConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.is_file() {
        return Ok(PhlogConfig::default());
    }
    parse_config(&fs::read_to_string(&config_path)?)
}

/// Returns a fully-commented stock `phlogmap.toml`.
///
/// Used by the `--print-config` flag.
pub fn stock_config_toml() -> &'static str {
    r##"# phlogmap configuration
# ======================
# Place this file as phlogmap.toml in the phlog directory.
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Name of the generated file, written into the phlog directory.
# Any existing file with this name is overwritten.
output_file = "gophermap"

# Subdirectories whose name starts with this prefix are listed by
# {{ ARCHIVE_LIST }} instead of {{ FILE_LIST }}, titled with the rest of
# their name (AR_2023 -> "2023"). Set to "" to treat them as plain directories.
archive_prefix = "AR_"

# Regular files with one of these extensions become text entries (type 0).
# Matching is case-sensitive.
text_extensions = ["txt", "md"]

# Files with this extension are pointers: their first line is used as the
# selector, their name as the title.
link_extension = "glink"

# Format of the {{ DATE_TIME }} placeholder (strftime syntax).
# %Z prints the local zone abbreviation (EDT, CET), or the UTC offset
# when the system zone cannot be determined.
date_format = "%Y-%m-%d %H:%M:%S %Z"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = PhlogConfig::default();
        assert_eq!(config.output_file, "gophermap");
        assert_eq!(config.archive_prefix(), Some("AR_"));
        assert_eq!(config.text_suffixes(), vec![".txt", ".md"]);
        assert_eq!(config.link_suffix(), ".glink");
    }

    #[test]
    fn default_config_is_valid() {
        PhlogConfig::default().validate().unwrap();
    }

    #[test]
    fn stock_toml_matches_defaults() {
        let config = parse_config(stock_config_toml()).unwrap();
        let defaults = PhlogConfig::default();
        assert_eq!(config.output_file, defaults.output_file);
        assert_eq!(config.archive_prefix, defaults.archive_prefix);
        assert_eq!(config.text_extensions, defaults.text_extensions);
        assert_eq!(config.link_extension, defaults.link_extension);
        assert_eq!(config.date_format, defaults.date_format);
    }

    #[test]
    fn parse_partial_config() {
        let config: PhlogConfig = toml::from_str(r#"archive_prefix = "OLD_""#).unwrap();
        assert_eq!(config.archive_prefix, "OLD_");
        assert_eq!(config.output_file, "gophermap");
    }

    #[test]
    fn empty_archive_prefix_disables_archives() {
        let config: PhlogConfig = toml::from_str(r#"archive_prefix = """#).unwrap();
        assert_eq!(config.archive_prefix(), None);
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<PhlogConfig, _> = toml::from_str("outptu_file = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn parse_config_validates() {
        let err = parse_config("link_extension = \"txt\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn validation_rejects_path_in_output_file() {
        let config = PhlogConfig {
            output_file: "../gophermap".into(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validation_rejects_dotted_extension() {
        let config = PhlogConfig {
            text_extensions: vec![".txt".into()],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validation_rejects_link_extension_overlap() {
        let config = PhlogConfig {
            link_extension: "md".into(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validation_rejects_bad_date_format() {
        let config = PhlogConfig {
            date_format: "%Q".into(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.output_file, "gophermap");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "text_extensions = [\"txt\", \"gmi\"]\n",
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.text_extensions, vec!["txt", "gmi"]);
        assert_eq!(config.archive_prefix, "AR_");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "output_file = ").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn load_config_validates() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "output_file = \"\"\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }
}
