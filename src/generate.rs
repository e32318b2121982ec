//! The build driver.
//!
//! Second stage of a build. Takes a scanned [`Manifest`], renders every
//! (page, language) pair with [`crate::render`], and writes the results.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # Default-language copies, no prefix
//! ├── about.html
//! ├── en/
//! │   ├── index.html
//! │   └── about.html
//! ├── es/
//! │   ├── index.html
//! │   └── about.html
//! └── ...                        # Contents of assets/, copied verbatim
//! ```
//!
//! An asset whose destination is a rendered page path fails the build
//! with [`GenerateError::AssetCollision`] before anything is written.
//!
//! ## Failure Policy
//!
//! Every pair is rendered before anything is written. By default a single
//! failed render aborts the build with [`GenerateError::Render`] and leaves
//! the output directory untouched. With `build.keep_going` the pages that
//! rendered are written and every failure is listed in the [`BuildReport`].
//!
//! ## Parallelism
//!
//! Pairs are rendered on the global rayon pool. Rendering is pure and the
//! manifest is only read, so no synchronization is needed.

use crate::render::{self, RenderError};
use crate::scan::Manifest;
use crate::types::{Language, Page};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Extension of every written page.
pub const OUTPUT_EXTENSION: &str = "html";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Asset copy error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Rendering page '{page}' in '{language}' failed: {source}")]
    Render {
        page: String,
        language: String,
        #[source]
        source: RenderError,
    },
    #[error("Unknown page '{0}'")]
    UnknownPage(String),
    #[error("Unknown language '{0}'")]
    UnknownLanguage(String),
    #[error("Asset {0} would overwrite a rendered page")]
    AssetCollision(PathBuf),
}

/// A successfully rendered (page, language) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub page: String,
    pub language: String,
    pub is_default: bool,
    pub html: String,
}

/// A (page, language) pair that failed to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFailure {
    pub page: String,
    pub language: String,
    pub error: RenderError,
}

impl From<RenderFailure> for GenerateError {
    fn from(failure: RenderFailure) -> Self {
        GenerateError::Render {
            page: failure.page,
            language: failure.language,
            source: failure.error,
        }
    }
}

/// One file written by the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub page: String,
    pub language: String,
    /// Path relative to the output directory.
    pub path: PathBuf,
    /// True for the unprefixed default-language copy.
    pub root_copy: bool,
}

/// Result of a build or check.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub rendered: usize,
    pub files: Vec<OutputFile>,
    pub failures: Vec<RenderFailure>,
    pub assets_copied: usize,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Relative output path of a page in a language, e.g. `es/about.html`.
pub fn language_page_path(language: &str, page: &str) -> PathBuf {
    Path::new(language).join(format!("{page}.{OUTPUT_EXTENSION}"))
}

/// Relative output path of a default-language root copy, e.g. `about.html`.
pub fn root_page_path(page: &str) -> PathBuf {
    PathBuf::from(format!("{page}.{OUTPUT_EXTENSION}"))
}

fn render_pair(base: &str, page: &Page, language: &Language) -> Result<RenderedPage, RenderFailure> {
    render::render(base, &page.content, &page.name, &language.dictionary)
        .map(|html| RenderedPage {
            page: page.name.clone(),
            language: language.code.clone(),
            is_default: language.is_default,
            html,
        })
        .map_err(|error| RenderFailure {
            page: page.name.clone(),
            language: language.code.clone(),
            error,
        })
}

/// Render every (page, language) pair, in page-major order.
pub fn render_all(manifest: &Manifest) -> Vec<Result<RenderedPage, RenderFailure>> {
    let pairs: Vec<(&Page, &Language)> = manifest
        .pages
        .iter()
        .flat_map(|page| manifest.languages.iter().map(move |lang| (page, lang)))
        .collect();

    pairs
        .par_iter()
        .map(|(page, lang)| render_pair(&manifest.base, page, lang))
        .collect()
}

/// Render a single page. `language` defaults to the default language.
pub fn render_one(
    manifest: &Manifest,
    page: &str,
    language: Option<&str>,
) -> Result<String, GenerateError> {
    let page = manifest
        .find_page(page)
        .ok_or_else(|| GenerateError::UnknownPage(page.to_string()))?;
    let code = language.unwrap_or(manifest.config.languages.default.as_str());
    let language = manifest
        .find_language(code)
        .ok_or_else(|| GenerateError::UnknownLanguage(code.to_string()))?;
    let rendered = render_pair(&manifest.base, page, language)?;
    Ok(rendered.html)
}

/// Render everything without writing. Failures are collected, never fatal.
pub fn check(manifest: &Manifest) -> BuildReport {
    let mut report = BuildReport::default();
    for result in render_all(manifest) {
        match result {
            Ok(_) => report.rendered += 1,
            Err(failure) => report.failures.push(failure),
        }
    }
    report
}

/// Render all pages and write them under `output_dir`.
pub fn generate(manifest: &Manifest, output_dir: &Path) -> Result<BuildReport, GenerateError> {
    let keep_going = manifest.config.build.keep_going;
    let mut report = BuildReport::default();
    let mut rendered = Vec::new();

    for result in render_all(manifest) {
        match result {
            Ok(page) => rendered.push(page),
            Err(failure) if keep_going => report.failures.push(failure),
            Err(failure) => return Err(failure.into()),
        }
    }
    report.rendered = rendered.len();

    let mut planned: Vec<(OutputFile, &str)> = Vec::new();
    for page in &rendered {
        planned.push((
            OutputFile {
                page: page.page.clone(),
                language: page.language.clone(),
                path: language_page_path(&page.language, &page.page),
                root_copy: false,
            },
            page.html.as_str(),
        ));
        if page.is_default {
            planned.push((
                OutputFile {
                    page: page.page.clone(),
                    language: page.language.clone(),
                    path: root_page_path(&page.page),
                    root_copy: true,
                },
                page.html.as_str(),
            ));
        }
    }
    // Root copies after language copies, so the report reads per language first
    planned.sort_by_key(|(file, _)| file.root_copy);

    let assets_dir = manifest.root.join(&manifest.config.assets_dir);
    let assets = collect_assets(&assets_dir)?;
    if let Some(asset) = assets
        .iter()
        .find(|asset| planned.iter().any(|(file, _)| &file.path == *asset))
    {
        return Err(GenerateError::AssetCollision(assets_dir.join(asset)));
    }

    fs::create_dir_all(output_dir)?;
    for (file, html) in planned {
        write_page(output_dir, &file.path, html)?;
        report.files.push(file);
    }
    report.assets_copied = copy_assets(&assets_dir, &assets, output_dir)?;

    info!(
        files = report.files.len(),
        failures = report.failures.len(),
        output = %output_dir.display(),
        "build finished"
    );
    Ok(report)
}

fn write_page(output_dir: &Path, rel: &Path, html: &str) -> std::io::Result<()> {
    let path = output_dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    debug!(path = %path.display(), "writing page");
    fs::write(path, html)
}

/// Every file under the assets directory, relative to it, sorted.
///
/// A missing assets directory has no assets.
pub fn collect_assets(assets_dir: &Path) -> Result<Vec<PathBuf>, GenerateError> {
    if !assets_dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut assets = Vec::new();
    for entry in WalkDir::new(assets_dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Ok(rel) = entry.path().strip_prefix(assets_dir) {
            assets.push(rel.to_path_buf());
        }
    }
    Ok(assets)
}

/// Copy `assets` from `assets_dir` into `output_dir`. Returns files copied.
pub fn copy_assets(
    assets_dir: &Path,
    assets: &[PathBuf],
    output_dir: &Path,
) -> Result<usize, GenerateError> {
    for rel in assets {
        let dest = output_dir.join(rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(assets_dir.join(rel), &dest)?;
    }
    debug!(count = assets.len(), from = %assets_dir.display(), "copied assets");
    Ok(assets.len())
}
