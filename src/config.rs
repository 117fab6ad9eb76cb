use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TocResult;
use crate::parser::TocOptions;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub toc: TocConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Heading extraction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocConfig {
    /// Shallowest heading level kept in the TOC (default: 1)
    #[serde(default = "default_min_level")]
    pub min_level: usize,

    /// Deepest heading level kept in the TOC (default: 6)
    #[serde(default = "default_max_level")]
    pub max_level: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "tree", "plain" or "json"
    #[serde(default = "default_format")]
    pub format: String,

    /// Append `[start-end]` line ranges in tree output (default: true)
    #[serde(default = "default_show_lines")]
    pub show_lines: bool,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            min_level: default_min_level(),
            max_level: default_max_level(),
        }
    }
}

fn default_min_level() -> usize {
    1
}

fn default_max_level() -> usize {
    6
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            show_lines: default_show_lines(),
        }
    }
}

fn default_format() -> String {
    "tree".to_string()
}

fn default_show_lines() -> bool {
    true
}

impl Config {
    /// Get the platform-specific config file path
    /// - macOS: ~/Library/Application Support/nohow/config.toml
    /// - Linux: ~/.config/nohow/config.toml
    /// - Windows: %APPDATA%/nohow/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("nohow").join("config.toml"))
    }

    /// Load config from the platform path, or return default if it doesn't exist
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load config from `path`; unreadable or malformed files yield defaults
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save config to the platform path
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let path = Self::config_path().ok_or("Could not determine config directory")?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Validated level window for extraction
    pub fn toc_options(&self) -> TocResult<TocOptions> {
        TocOptions::new(self.toc.min_level, self.toc.max_level)
    }

    /// Update the level window; an invalid window leaves the config untouched
    pub fn set_levels(&mut self, min_level: usize, max_level: usize) -> TocResult<()> {
        TocOptions::new(min_level, max_level)?;
        self.toc.min_level = min_level;
        self.toc.max_level = max_level;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TocError;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.toc.min_level, 1);
        assert_eq!(config.toc.max_level, 6);
        assert_eq!(config.output.format, "tree");
        assert!(config.output.show_lines);
        assert_eq!(config.toc_options().unwrap(), TocOptions::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("[toc]\nmax_level = 3\n").unwrap();
        assert_eq!(config.toc.min_level, 1);
        assert_eq!(config.toc.max_level, 3);
        assert_eq!(config.output.format, "tree");
    }

    #[test]
    fn test_invalid_levels_surface_as_error() {
        let config: Config = toml::from_str("[toc]\nmin_level = 4\nmax_level = 2\n").unwrap();
        assert!(matches!(
            config.toc_options(),
            Err(TocError::InvalidLevelRange { min: 4, max: 2 })
        ));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.toc.min_level = 2;
        config.output.format = "json".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path);
        assert_eq!(loaded.toc.min_level, 2);
        assert_eq!(loaded.output.format, "json");
    }

    #[test]
    fn test_missing_or_malformed_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = Config::load_from(&dir.path().join("absent.toml"));
        assert_eq!(missing.toc.max_level, 6);

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "toc = [not valid").unwrap();
        let loaded = Config::load_from(&bad);
        assert_eq!(loaded.output.format, "tree");
    }

    #[test]
    fn test_set_levels_persists_window() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.set_levels(2, 4).unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path);
        assert_eq!(loaded.toc_options().unwrap(), TocOptions::new(2, 4).unwrap());
    }

    #[test]
    fn test_set_levels_rejects_invalid_window() {
        let mut config = Config::default();
        assert!(matches!(
            config.set_levels(5, 3),
            Err(TocError::InvalidLevelRange { min: 5, max: 3 })
        ));
        assert_eq!(config.toc.min_level, 1);
        assert_eq!(config.toc.max_level, 6);
    }
}
