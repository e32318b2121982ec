//! Project discovery and loading.
//!
//! First stage of a build. Reads the project configuration, the base
//! template, every page fragment, and one dictionary per supported language,
//! and returns them as a [`Manifest`] the build driver renders from. Nothing
//! is rendered or written here.
//!
//! ## Discovery Rules
//!
//! - The base template is `<templates_dir>/<base_template>` and must exist.
//! - Every other regular file in `<templates_dir>` ending in
//!   `.<template_extension>` is a page. Subdirectories and hidden files are
//!   ignored. Pages are sorted by name.
//! - Each supported language must have `<dictionaries_dir>/<code>.json`.
//!
//! ## Validation
//!
//! - Page names must use the placeholder alphabet (letters, digits, `-`, `.`)
//! - Two fragments may not map to the same page name
//! - Dictionary keys are validated by [`crate::dictionary`]

use crate::config::{self, SiteConfig};
use crate::dictionary::{self, DictionaryError};
use crate::naming;
use crate::types::{Language, Page};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Templates directory not found: {0}")]
    MissingTemplatesDir(PathBuf),
    #[error("Base template not found: {0}")]
    MissingBaseTemplate(PathBuf),
    #[error("No dictionary for language '{code}': {path} does not exist")]
    MissingDictionary { code: String, path: PathBuf },
    #[error("Dictionary {path}: {source}")]
    Dictionary {
        path: PathBuf,
        #[source]
        source: DictionaryError,
    },
    #[error("Invalid page name '{name}' from {path}: use only letters, digits, '-' and '.'")]
    InvalidPageName { name: String, path: PathBuf },
    #[error("Page '{name}' is defined twice: {first} and {second}")]
    DuplicatePage {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Everything a build needs, loaded into memory.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Project root the paths in `config` are relative to.
    pub root: PathBuf,
    /// Base template text.
    pub base: String,
    pub pages: Vec<Page>,
    /// Languages in configured order.
    pub languages: Vec<Language>,
    pub config: SiteConfig,
}

impl Manifest {
    pub fn find_page(&self, name: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.name == name)
    }

    pub fn find_language(&self, code: &str) -> Option<&Language> {
        self.languages.iter().find(|l| l.code == code)
    }
}

/// Load a project rooted at `root`.
pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;

    let templates_dir = root.join(&config.templates_dir);
    if !templates_dir.is_dir() {
        return Err(ScanError::MissingTemplatesDir(templates_dir));
    }

    let base_path = templates_dir.join(&config.base_template);
    if !base_path.is_file() {
        return Err(ScanError::MissingBaseTemplate(base_path));
    }
    let base = fs::read_to_string(&base_path)?;

    let pages = collect_pages(&templates_dir, &config)?;
    if pages.is_empty() {
        warn!(dir = %templates_dir.display(), "no page fragments found");
    }

    let languages = load_languages(&root.join(&config.dictionaries_dir), &config)?;

    Ok(Manifest {
        root: root.to_path_buf(),
        base,
        pages,
        languages,
        config,
    })
}

/// Read every page fragment in the templates directory, sorted by name.
fn collect_pages(templates_dir: &Path, config: &SiteConfig) -> Result<Vec<Page>, ScanError> {
    let mut entries: Vec<PathBuf> = fs::read_dir(templates_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    entries.sort();

    let mut pages = Vec::new();
    for path in entries {
        let filename = path
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_default();

        if filename.starts_with('.') || filename == config.base_template {
            continue;
        }
        let Some(name) = naming::page_name_from_filename(&filename, &config.template_extension)
        else {
            debug!(file = %filename, "skipping non-template file");
            continue;
        };
        if !naming::is_valid_page_name(&name) {
            return Err(ScanError::InvalidPageName { name, path });
        }

        let content = fs::read_to_string(&path)?;
        debug!(page = %name, bytes = content.len(), "loaded page fragment");
        pages.push(Page {
            name,
            source: filename,
            content,
        });
    }

    pages.sort_by(|a, b| a.name.cmp(&b.name));

    // `index.html` and `index.HTML` both name page `index`
    if let Some(pair) = pages.windows(2).find(|w| w[0].name == w[1].name) {
        return Err(ScanError::DuplicatePage {
            name: pair[0].name.clone(),
            first: templates_dir.join(&pair[0].source),
            second: templates_dir.join(&pair[1].source),
        });
    }
    Ok(pages)
}

/// Load one dictionary per supported language, in configured order.
fn load_languages(dict_dir: &Path, config: &SiteConfig) -> Result<Vec<Language>, ScanError> {
    config
        .languages
        .supported
        .iter()
        .map(|code| {
            let filename = format!("{code}.json");
            let path = dict_dir.join(&filename);
            if !path.is_file() {
                return Err(ScanError::MissingDictionary {
                    code: code.clone(),
                    path,
                });
            }
            let dictionary = dictionary::load_dictionary(&path)
                .map_err(|source| ScanError::Dictionary { path: path.clone(), source })?;
            if dictionary.is_empty() {
                warn!(language = %code, path = %path.display(), "dictionary is empty");
            }
            debug!(language = %code, keys = dictionary.len(), "loaded dictionary");
            Ok(Language {
                code: code.clone(),
                is_default: config.languages.is_default(code),
                source: filename,
                dictionary,
            })
        })
        .collect()
}
