//! Configuration management for tocnav.
//!
//! Parses `tocnav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.source_dir`
//! - `docs.root_doc`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override root document.
    pub root_doc: Option<String>,
    /// Override output format.
    pub format: Option<OutputFormat>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "tocnav.toml";

const DEFAULT_SOURCE_DIR: &str = "docs";
const DEFAULT_ROOT_DOC: &str = "index";
const DEFAULT_SUFFIX: &str = ".rst";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Integrity check configuration.
    pub check: CheckConfig,
    /// Output configuration.
    pub output: OutputConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    root_doc: Option<String>,
    source_suffix: Option<Vec<String>>,
    exclude_patterns: Option<Vec<String>>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug)]
pub struct DocsConfig {
    /// Source directory for reStructuredText files.
    pub source_dir: PathBuf,
    /// Identifier of the document navigation starts from.
    pub root_doc: String,
    /// Source file suffixes, in priority order.
    pub source_suffix: Vec<String>,
    /// Glob patterns (relative to `source_dir`) to leave out.
    pub exclude_patterns: Vec<String>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            root_doc: DEFAULT_ROOT_DOC.to_owned(),
            source_suffix: vec![DEFAULT_SUFFIX.to_owned()],
            exclude_patterns: Vec::new(),
        }
    }
}

/// Integrity check configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Report documents not reachable from the root document.
    pub orphans: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self { orphans: true }
    }
}

/// Output configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format for `nav` and `render`.
    pub format: OutputFormat,
}

/// Output format for navigation and rendered pages.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented text outline.
    #[default]
    Text,
    /// JSON.
    Json,
    /// HTML fragment.
    Html,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.source_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `tocnav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(root_doc) = &settings.root_doc {
            self.docs_resolved.root_doc.clone_from(root_doc);
        }
        if let Some(format) = settings.format {
            self.output.format = format;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            check: CheckConfig::default(),
            output: OutputConfig::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join(DEFAULT_SOURCE_DIR),
                ..DocsConfig::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_docs()
    }

    /// Validate docs configuration.
    fn validate_docs(&self) -> Result<(), ConfigError> {
        let docs = &self.docs_resolved;
        require_non_empty(&docs.root_doc, "docs.root_doc")?;

        if docs.source_suffix.is_empty() {
            return Err(ConfigError::Validation(
                "docs.source_suffix cannot be empty".to_owned(),
            ));
        }
        if let Some(suffix) = docs
            .source_suffix
            .iter()
            .find(|s| s.len() < 2 || !s.starts_with('.'))
        {
            return Err(ConfigError::Validation(format!(
                "docs.source_suffix entry `{suffix}` must start with '.'"
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref source_dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(source_dir, "docs.source_dir")?);
        }
        if let Some(ref root_doc) = self.docs.root_doc {
            self.docs.root_doc = Some(expand::expand_env(root_doc, "docs.root_doc")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let defaults = DocsConfig::default();
        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(
                self.docs
                    .source_dir
                    .as_deref()
                    .unwrap_or(DEFAULT_SOURCE_DIR),
            ),
            root_doc: self.docs.root_doc.clone().unwrap_or(defaults.root_doc),
            source_suffix: self
                .docs
                .source_suffix
                .clone()
                .unwrap_or(defaults.source_suffix),
            exclude_patterns: self.docs.exclude_patterns.clone().unwrap_or_default(),
        };
    }
}
