use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, SelectorError};
use crate::indicator::DEFAULT_BUSY_CLASS;
use crate::resolver::fragment::{DEFAULT_CONTENT_SELECTORS, FragmentExtractor};
use crate::trigger::{DEFAULT_IMAGE_CLASS, DEFAULT_TRIGGER_CLASS};

/// Which settlement wins when invocations overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettlePolicy {
    /// Every settlement is applied; the response that arrives last wins.
    #[default]
    LastSettled,
    /// Only the most recently issued invocation may write or open the overlay.
    LatestIssued,
}

/// Loader configuration. Every key is optional.
///
/// ```toml
/// base_url = "https://example.org/"
/// trigger_class = "load-in-modal"
/// image_class = "load-raster-image-in-modal"
/// busy_class = "show"
/// content_selectors = ["article", ".main"]
/// settle_policy = "latest-issued"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub base_url: Option<String>,
    pub trigger_class: String,
    pub image_class: String,
    pub busy_class: String,
    pub content_selectors: Vec<String>,
    pub settle_policy: SettlePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            trigger_class: DEFAULT_TRIGGER_CLASS.to_string(),
            image_class: DEFAULT_IMAGE_CLASS.to_string(),
            busy_class: DEFAULT_BUSY_CLASS.to_string(),
            content_selectors: DEFAULT_CONTENT_SELECTORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            settle_policy: SettlePolicy::default(),
        }
    }
}

impl Config {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load from `path`; a missing file means defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    pub fn extractor(&self) -> Result<FragmentExtractor, SelectorError> {
        FragmentExtractor::new(&self.content_selectors)
    }
}

/// `MODAL_LOADER_CONFIG`, else `<config dir>/modal-loader/config.toml`.
pub fn config_file_path() -> PathBuf {
    if let Some(path) = std::env::var_os("MODAL_LOADER_CONFIG").filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("modal-loader/config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_config_is_default() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.trigger_class, "load-in-modal");
        assert_eq!(config.image_class, "load-raster-image-in-modal");
        assert_eq!(config.busy_class, "show");
        assert_eq!(config.content_selectors, vec!["article", ".main"]);
        assert_eq!(config.settle_policy, SettlePolicy::LastSettled);
    }

    #[test]
    fn parse_full_config() {
        let input = r##"
base_url = "https://example.org/"
trigger_class = "js-modal"
busy_class = "is-busy"
content_selectors = ["#content"]
settle_policy = "latest-issued"
"##;
        let config = Config::parse(input).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("https://example.org/"));
        assert_eq!(config.trigger_class, "js-modal");
        assert_eq!(config.image_class, "load-raster-image-in-modal"); // default
        assert_eq!(config.busy_class, "is-busy");
        assert_eq!(config.content_selectors, vec!["#content"]);
        assert_eq!(config.settle_policy, SettlePolicy::LatestIssued);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::parse("trigger = \"x\"").is_err());
        assert!(Config::parse("settle_policy = \"first\"").is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "image_class = \"lightbox\"").unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.image_class, "lightbox");
    }

    #[test]
    fn parse_error_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = [").unwrap();
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { ref path, .. } if path == file.path()));
    }

    #[test]
    fn extractor_reports_bad_selectors() {
        let config = Config {
            content_selectors: vec!["article".into(), "[[nope".into()],
            ..Config::default()
        };
        assert!(config.extractor().is_err());
        assert!(Config::default().extractor().is_ok());
    }
}
