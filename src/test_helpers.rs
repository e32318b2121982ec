//! Shared test utilities for the polypage test suite.
//!
//! Provides a fixture project builder plus lookup helpers and bulk
//! extractors over scan-stage data (`Manifest`, `Page`, `Language`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_project();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let page = find_page(&manifest, "about");
//! assert_eq!(page.source, "about.html");
//! assert_eq!(language_codes(&manifest), vec!["en", "es"]);
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::scan::Manifest;
use crate::types::{Language, Page};

// =========================================================================
// Fixture setup
// =========================================================================

pub const FIXTURE_CONFIG: &str = r#"
[languages]
supported = ["en", "es"]
default = "es"
"#;

pub const FIXTURE_BASE: &str = r#"<!DOCTYPE html>
<html lang="{lang}">
<head><title>{site.title} - {.name}</title></head>
<body>
<nav>{If"index"<span>{nav.home}</span>}{If"about"<a href="/">{nav.home}</a>}</nav>
{Content}
</body>
</html>
"#;

pub const FIXTURE_INDEX: &str = r#"<h1>{greeting}</h1>
<p>{intro}</p>
"#;

pub const FIXTURE_ABOUT: &str = r#"<h1>{about.title}</h1>
<p>This page is {.name}.</p>
"#;

pub const FIXTURE_EN: &str = r#"{
  "lang": "en",
  "site.title": "Example",
  "nav.home": "Home",
  "greeting": "Hello",
  "intro": "Welcome to the site.",
  "about.title": "About us"
}"#;

pub const FIXTURE_ES: &str = r#"{
  "lang": "es",
  "site.title": "Ejemplo",
  "nav.home": "Inicio",
  "greeting": "Hola",
  "intro": "Bienvenido al sitio.",
  "about.title": "Sobre nosotros"
}"#;

/// Build a two-page, two-language project in a temp directory.
///
/// Pages `index` and `about`; languages `en` and `es`, default `es`.
pub fn setup_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_file(root, "config.toml", FIXTURE_CONFIG);
    write_file(root, "templates/base.html", FIXTURE_BASE);
    write_file(root, "templates/index.html", FIXTURE_INDEX);
    write_file(root, "templates/about.html", FIXTURE_ABOUT);
    write_file(root, "dictionaries/en.json", FIXTURE_EN);
    write_file(root, "dictionaries/es.json", FIXTURE_ES);
    tmp
}

/// Write `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Read `root/rel` to a string. Panics with the path on failure.
pub fn read_file(root: &Path, rel: &str) -> String {
    let path = root.join(rel);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

// =========================================================================
// Manifest lookups — panics with a clear message on miss
// =========================================================================

/// Find a page by name. Panics if not found.
pub fn find_page<'a>(manifest: &'a Manifest, name: &str) -> &'a Page {
    manifest.find_page(name).unwrap_or_else(|| {
        let names = page_names(manifest);
        panic!("page '{name}' not found. Available: {names:?}")
    })
}

/// Find a language by code. Panics if not found.
pub fn find_language<'a>(manifest: &'a Manifest, code: &str) -> &'a Language {
    manifest.find_language(code).unwrap_or_else(|| {
        let codes = language_codes(manifest);
        panic!("language '{code}' not found. Available: {codes:?}")
    })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All page names in manifest order.
pub fn page_names(manifest: &Manifest) -> Vec<&str> {
    manifest.pages.iter().map(|p| p.name.as_str()).collect()
}

/// All language codes in manifest order.
pub fn language_codes(manifest: &Manifest) -> Vec<&str> {
    manifest.languages.iter().map(|l| l.code.as_str()).collect()
}
