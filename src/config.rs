//! Configuration management for astyle-task.
//!
//! This module provides the [`Config`] struct which controls what the format
//! task runs and on which files. Configuration can be loaded from:
//! - A TOML file in the project root (`astyle-task.toml`)
//! - An explicit TOML file given on the command line
//! - CLI arguments (which override file settings)
//!
//! Every setting has a default, so a project without a config file formats
//! `main/**/*.{c,cpp,h}` with `scripts/astyle.cfg`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Config file name looked up in the project root
pub const CONFIG_FILE_NAME: &str = "astyle-task.toml";

/// Formatter executable used when none is configured
pub const DEFAULT_FORMATTER: &str = "astyle";

/// Formatter options file, relative to the project root
pub const DEFAULT_OPTIONS_FILE: &str = "scripts/astyle.cfg";

/// Directory searched for sources, relative to the project root
pub const DEFAULT_SOURCE_DIR: &str = "main";

/// Source patterns, matched against file names in this order
pub const DEFAULT_PATTERNS: &[&str] = &["*.c", "*.cpp", "*.h"];

// Serde default functions
fn default_formatter() -> String {
    DEFAULT_FORMATTER.to_string()
}
fn default_options_file() -> PathBuf {
    PathBuf::from(DEFAULT_OPTIONS_FILE)
}
fn default_source_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SOURCE_DIR)
}
fn default_patterns() -> Vec<String> {
    DEFAULT_PATTERNS.iter().map(ToString::to_string).collect()
}
fn default_true() -> bool {
    true
}

/// Main configuration struct for the format task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Formatter executable, looked up on `PATH` unless it contains a separator
    #[serde(default = "default_formatter")]
    pub formatter: String,

    /// Formatter options file, relative to the project root unless absolute
    #[serde(default = "default_options_file")]
    pub options_file: PathBuf,

    /// Directory searched recursively for sources, relative to the project root
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// File name glob patterns, in the order their matches are passed on
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,

    /// Sort the matches of each pattern by path (default: true)
    #[serde(default = "default_true")]
    pub sort_files: bool,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    pub formatter: Option<String>,
    pub options_file: Option<PathBuf>,
    pub source_dir: Option<PathBuf>,
    pub patterns: Option<Vec<String>>,
    pub sort_files: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            formatter: default_formatter(),
            options_file: default_options_file(),
            source_dir: default_source_dir(),
            patterns: default_patterns(),
            sort_files: true,
        }
    }
}

impl Config {
    /// Validate configuration values
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.formatter.trim().is_empty() {
            return Some("formatter must not be empty".to_string());
        }
        if self.options_file.as_os_str().is_empty() {
            return Some("options_file must not be empty".to_string());
        }
        if self.source_dir.is_absolute() {
            return Some(format!(
                "source_dir {} must be relative to the project directory",
                self.source_dir.display()
            ));
        }
        if self.patterns.is_empty() {
            return Some("patterns must contain at least one glob".to_string());
        }
        for pattern in &self.patterns {
            if let Err(e) = glob::Pattern::new(pattern) {
                return Some(format!("invalid pattern '{pattern}': {e}"));
            }
        }
        None
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let partial: PartialConfig = toml::from_str(&contents)?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Load `astyle-task.toml` from the project directory if present
    ///
    /// A missing file yields the defaults. A file that can't be read or
    /// parsed is reported as a warning and also yields the defaults.
    #[must_use]
    pub fn from_project_dir(project_dir: &Path) -> Self {
        let path = project_dir.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Self::default();
        }

        match Self::from_toml_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: failed to load {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = &partial.formatter {
            self.formatter.clone_from(v);
        }
        if let Some(v) = &partial.options_file {
            self.options_file.clone_from(v);
        }
        if let Some(v) = &partial.source_dir {
            self.source_dir.clone_from(v);
        }
        if let Some(v) = &partial.patterns {
            self.patterns.clone_from(v);
        }
        if let Some(v) = partial.sort_files {
            self.sort_files = v;
        }
    }

    /// Absolute location of the formatter options file
    #[must_use]
    pub fn options_path(&self, project_dir: &Path) -> PathBuf {
        // join() keeps an absolute options_file as-is
        project_dir.join(&self.options_file)
    }

    /// Absolute location of the source directory
    #[must_use]
    pub fn source_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.source_dir)
    }
}
