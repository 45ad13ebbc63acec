//! Engine configuration.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Colour theme name ("default", "one-dark", "monokai").
    #[serde(default = "default_theme_name")]
    pub theme: String,

    /// Documents larger than this many bytes render without syntax
    /// highlighting.
    #[serde(default = "default_highlight_threshold")]
    pub highlight_threshold: usize,

    /// Copy the previous line's leading whitespace on newline insertion.
    #[serde(default = "default_true")]
    pub auto_indent: bool,
}

fn default_theme_name() -> String {
    "default".to_string()
}

fn default_highlight_threshold() -> usize {
    10_000
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            theme: default_theme_name(),
            highlight_threshold: default_highlight_threshold(),
            auto_indent: default_true(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.theme, "default");
        assert_eq!(config.highlight_threshold, 10_000);
        assert!(config.auto_indent);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"theme": "monokai"}"#).unwrap();
        assert_eq!(config.theme, "monokai");
        assert_eq!(config.highlight_threshold, 10_000);
        assert!(config.auto_indent);
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"auto_indent": false, "highlight_threshold": 512}"#).unwrap();
        let config = Config::from_json_file(&path).unwrap();
        assert!(!config.auto_indent);
        assert_eq!(config.highlight_threshold, 512);
        assert!(Config::from_json_file(dir.path().join("missing.json")).is_err());
    }
}
