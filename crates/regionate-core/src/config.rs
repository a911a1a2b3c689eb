//! Configuration file discovery and loading
//!
//! Settings live in a `regionate.toml` discovered by walking upward from
//! the working directory. Every field has a default, and a missing config
//! file simply means defaults everywhere.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::RegionateError;
use crate::normalizer::LineEnding;
use crate::result::Result;

/// Name of the config file searched for during auto-discovery
pub const CONFIG_FILE_NAME: &str = "regionate.toml";

/// Root configuration structure (`regionate.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RegionateConfig {
    /// Marker formatting settings
    #[serde(default)]
    pub format: FormatConfig,

    /// File discovery settings
    #[serde(default)]
    pub files: FilesConfig,
}

/// Formatting settings for inserted marker lines
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FormatConfig {
    /// Line ending written into inserted lines
    #[serde(default)]
    pub line_ending: LineEndingConfig,

    /// Indentation style assumed by the whitespace cleanup pass
    #[serde(default)]
    pub indent: IndentStyle,

    /// Indentation width in spaces (used when `indent` is `spaces`)
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            line_ending: LineEndingConfig::default(),
            indent: IndentStyle::default(),
            indent_width: default_indent_width(),
        }
    }
}

impl FormatConfig {
    /// One level of indentation as text
    pub fn indent_unit(&self) -> String {
        match self.indent {
            IndentStyle::Tab => "\t".to_string(),
            IndentStyle::Spaces => " ".repeat(self.indent_width),
        }
    }
}

fn default_indent_width() -> usize {
    4
}

/// File discovery settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FilesConfig {
    /// File extensions to process
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Directory names skipped during traversal
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            exclude: default_exclude(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["cs".to_string()]
}

fn default_exclude() -> Vec<String> {
    vec!["bin".to_string(), "obj".to_string(), ".git".to_string()]
}

/// Line ending policy: fixed, or detected per file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEndingConfig {
    /// Detect from each file's first line break
    #[default]
    Auto,
    Lf,
    Crlf,
}

impl LineEndingConfig {
    /// Resolve to a concrete line ending for one file's text
    pub fn resolve(self, source: &str) -> LineEnding {
        match self {
            LineEndingConfig::Auto => LineEnding::detect(source),
            LineEndingConfig::Lf => LineEnding::Lf,
            LineEndingConfig::Crlf => LineEnding::Crlf,
        }
    }
}

/// Indent style for inserted marker lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentStyle {
    #[default]
    Tab,
    Spaces,
}

impl RegionateConfig {
    /// Check field values for consistency
    pub fn validate(&self) -> Result<()> {
        if self.format.indent_width == 0 {
            return Err(RegionateError::config_error(
                "indent_width must be at least 1",
            ));
        }
        if self.files.extensions.is_empty() {
            return Err(RegionateError::config_error(
                "files.extensions must name at least one extension",
            ));
        }
        for ext in &self.files.extensions {
            if ext.starts_with('.') {
                return Err(RegionateError::config_error(format!(
                    "extension '{ext}' must be written without the leading dot"
                )));
            }
        }
        Ok(())
    }
}

/// Configuration loader for discovering and loading `regionate.toml`
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover a config file by traversing upward from `start_path`
    ///
    /// Starts from the given directory and moves up the directory tree
    /// until `regionate.toml` is found or the filesystem root is reached.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| RegionateError::config_error(format!("Invalid path: {e}")))?;

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                tracing::debug!("Found config: {}", config_path.display());
                return Ok(Some(config_path));
            }
            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }

    /// Load and validate configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<RegionateConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RegionateError::io_error(path.to_path_buf(), e))?;
        let config: RegionateConfig = toml::from_str(&content).map_err(|e| {
            RegionateError::config_error(format!(
                "Failed to parse '{}': {e}",
                path.display()
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from an explicit path or by auto-discovery
    ///
    /// An explicit path must exist; with no explicit path, discovery that
    /// finds nothing yields the default configuration.
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<RegionateConfig> {
        if let Some(path) = custom_path {
            if !path.exists() {
                return Err(RegionateError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_from_file(path);
        }

        let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
        match Self::auto_discover(search_dir)? {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(RegionateConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_temp_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILE_NAME);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = RegionateConfig::default();
        assert_eq!(config.format.line_ending, LineEndingConfig::Auto);
        assert_eq!(config.format.indent, IndentStyle::Tab);
        assert_eq!(config.format.indent_unit(), "\t");
        assert_eq!(config.files.extensions, vec!["cs"]);
        config.validate().unwrap();
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_temp_config(
            temp_dir.path(),
            "[format]\nline_ending = \"crlf\"\nindent = \"spaces\"\nindent_width = 2\n\n[files]\nextensions = [\"cs\", \"csx\"]\n",
        );

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.format.line_ending, LineEndingConfig::Crlf);
        assert_eq!(config.format.indent_unit(), "  ");
        assert_eq!(config.files.extensions, vec!["cs", "csx"]);
        // exclude keeps its default when the key is absent
        assert!(config.files.exclude.contains(&"obj".to_string()));
    }

    #[test]
    fn test_documented_keys_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_temp_config(
            temp_dir.path(),
            "[format]\nline_ending = \"auto\"\nindent = \"tab\"\nindent_width = 4\n\n[files]\nextensions = [\"cs\"]\nexclude = []\n",
        );
        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.format.indent, IndentStyle::Tab);
        assert_eq!(config.format.indent_unit(), "\t");
        assert!(config.files.exclude.is_empty());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_temp_config(temp_dir.path(), "[format]\nline_endings = \"lf\"\n");
        assert!(ConfigLoader::load_from_file(&path).is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_temp_config(temp_dir.path(), "[format]\nindent_width = 0\n");
        assert!(ConfigLoader::load_from_file(&path).is_err());

        let path = create_temp_config(temp_dir.path(), "[files]\nextensions = [\".cs\"]\n");
        assert!(ConfigLoader::load_from_file(&path).is_err());
    }

    #[test]
    fn test_auto_discover_walks_upward() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("src/nested");
        fs::create_dir_all(&nested).unwrap();
        create_temp_config(temp_dir.path(), "[format]\nline_ending = \"lf\"\n");

        let found = ConfigLoader::auto_discover(&nested).unwrap().unwrap();
        assert_eq!(
            found.canonicalize().unwrap(),
            temp_dir.path().canonicalize().unwrap().join(CONFIG_FILE_NAME)
        );
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigLoader::load(None, Some(temp_dir.path())).unwrap();
        assert_eq!(config, RegionateConfig::default());
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let err = ConfigLoader::load(Some(Path::new("/nonexistent/regionate.toml")), None);
        assert!(err.is_err());
    }

    #[test]
    fn test_line_ending_resolution() {
        assert_eq!(LineEndingConfig::Auto.resolve("a\r\nb"), LineEnding::Crlf);
        assert_eq!(LineEndingConfig::Auto.resolve("a\nb"), LineEnding::Lf);
        assert_eq!(LineEndingConfig::Lf.resolve("a\r\nb"), LineEnding::Lf);
        assert_eq!(LineEndingConfig::Crlf.resolve("a\nb"), LineEnding::Crlf);
    }
}
