//! Project configuration module.
//!
//! Handles loading and validating `config.toml` from the project root. The
//! file is sparse: stock defaults are the base layer and user values are
//! merged on top, so a config only needs the keys it wants to change.
//!
//! ## Project Layout
//!
//! ```text
//! site/
//! ├── config.toml              # Project config (optional)
//! ├── templates/
//! │   ├── base.html            # Base template with one {Content} marker
//! │   ├── index.html           # Page fragment → page "index"
//! │   └── about.html           # Page fragment → page "about"
//! ├── dictionaries/
//! │   ├── en.json              # One flat key → text object per language
//! │   └── es.json
//! └── assets/                  # Copied verbatim to the output root (optional)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! templates_dir = "templates"
//! dictionaries_dir = "dictionaries"
//! base_template = "base.html"
//! template_extension = "html"
//! assets_dir = "assets"
//!
//! [languages]
//! supported = ["en"]        # One dictionary per code: dictionaries/<code>.json
//! default = "en"            # Also written to the output root without a prefix
//!
//! [build]
//! max_threads = 4           # Max parallel renders (omit for auto = CPU cores)
//! keep_going = false        # Write what renders and report every failure
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Config file name, looked up in the project root.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Project configuration loaded from `config.toml`.
///
/// All fields have defaults. Paths are relative to the project root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory holding the base template and page fragments.
    pub templates_dir: String,
    /// Directory holding one `<code>.json` dictionary per language.
    pub dictionaries_dir: String,
    /// Filename of the base template inside `templates_dir`.
    pub base_template: String,
    /// Extension (without dot) identifying page fragments.
    pub template_extension: String,
    /// Static assets copied to the output root, if the directory exists.
    pub assets_dir: String,
    /// Supported languages and the default one.
    pub languages: LanguagesConfig,
    /// Build driver settings.
    pub build: BuildConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            templates_dir: "templates".to_string(),
            dictionaries_dir: "dictionaries".to_string(),
            base_template: "base.html".to_string(),
            template_extension: "html".to_string(),
            assets_dir: "assets".to_string(),
            languages: LanguagesConfig::default(),
            build: BuildConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let langs = &self.languages;
        if langs.supported.is_empty() {
            return Err(ConfigError::Validation(
                "languages.supported must not be empty".into(),
            ));
        }
        let mut seen = HashSet::new();
        for code in &langs.supported {
            if !is_valid_language_code(code) {
                return Err(ConfigError::Validation(format!(
                    "languages.supported: invalid language code '{}'",
                    code
                )));
            }
            if !seen.insert(code.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "languages.supported: duplicate language code '{}'",
                    code
                )));
            }
        }
        if !langs.supported.contains(&langs.default) {
            return Err(ConfigError::Validation(format!(
                "languages.default '{}' is not in languages.supported",
                langs.default
            )));
        }
        if self.template_extension.is_empty() || self.template_extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "template_extension must be non-empty and given without a leading dot".into(),
            ));
        }
        if self.base_template.is_empty() {
            return Err(ConfigError::Validation(
                "base_template must not be empty".into(),
            ));
        }
        if self.build.max_threads == Some(0) {
            return Err(ConfigError::Validation(
                "build.max_threads must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Language codes double as output directory and dictionary file names.
fn is_valid_language_code(code: &str) -> bool {
    !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// The fixed set of output languages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LanguagesConfig {
    /// Language codes, in output order.
    pub supported: Vec<String>,
    /// Language whose pages are also written unprefixed at the output root.
    pub default: String,
}

impl Default for LanguagesConfig {
    fn default() -> Self {
        Self {
            supported: vec!["en".to_string()],
            default: "en".to_string(),
        }
    }
}

impl LanguagesConfig {
    pub fn is_default(&self, code: &str) -> bool {
        self.default == code
    }
}

/// Build driver settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Maximum number of parallel render workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_threads: Option<usize>,
    /// Keep rendering after a failed page and report all failures at the end.
    pub keep_going: bool,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &BuildConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_threads.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# polypage Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Paths are relative to this file.
# Unknown keys will cause an error.

# Directory holding the base template and the page fragments.
templates_dir = "templates"

# Directory holding one <code>.json dictionary per language.
dictionaries_dir = "dictionaries"

# Base template inside templates_dir. Must contain one {Content} marker.
base_template = "base.html"

# Every other file with this extension in templates_dir is a page.
# The page name is the filename without the extension.
template_extension = "html"

# Copied verbatim into the output root when the directory exists.
assets_dir = "assets"

# ---------------------------------------------------------------------------
# Languages
# ---------------------------------------------------------------------------
[languages]
# Every page is rendered once per language into <output>/<code>/<page>.html.
supported = ["en"]

# Pages in this language are also written to <output>/<page>.html.
default = "en"

# ---------------------------------------------------------------------------
# Build
# ---------------------------------------------------------------------------
[build]
# Maximum parallel render workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_threads = 4

# By default the first failed render aborts the build before anything is
# written. Set to true to write every page that renders and report all
# failures at the end.
keep_going = false
"##
}
