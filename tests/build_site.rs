//! End-to-end builds through the public library API.
//!
//! Each test lays out a small project in a temp directory, scans it, builds
//! it, and checks the written files.

use polypage::generate::{self, GenerateError};
use polypage::render::RenderError;
use polypage::scan;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

/// Templates under `res/templates`, dictionaries under `res/tarje`, four
/// languages with `pd` as the default.
fn four_language_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(
        root,
        "config.toml",
        r#"
templates_dir = "res/templates"
dictionaries_dir = "res/tarje"

[languages]
supported = ["en", "es", "jp", "pd"]
default = "pd"
"#,
    );
    write(root, "res/templates/base.html", "<html>{Content}</html>");
    write(
        root,
        "res/templates/index.html",
        r#"<p>{greeting}, {.name}!</p>{If"index"<b>Home</b>}{If"about"<b>About</b>}"#,
    );
    write(
        root,
        "res/templates/about.html",
        r#"<p>{greeting}, {.name}!</p>{If"index"<b>Home</b>}{If"about"<b>About</b>}"#,
    );
    write(root, "res/tarje/en.json", r#"{"greeting": "Hello"}"#);
    write(root, "res/tarje/es.json", r#"{"greeting": "Hola"}"#);
    write(root, "res/tarje/jp.json", r#"{"greeting": "Konnichiwa"}"#);
    write(root, "res/tarje/pd.json", r#"{"greeting": "Salu"}"#);
    tmp
}

#[test]
fn builds_every_page_in_every_language() {
    let project = four_language_project();
    let out = TempDir::new().unwrap();

    let manifest = scan::scan(project.path()).unwrap();
    let report = generate::generate(&manifest, out.path()).unwrap();

    assert!(report.is_success());
    assert_eq!(report.rendered, 8);
    assert_eq!(
        read(out.path(), "en/index.html"),
        "<html><p>Hello, index!</p><b>Home</b></html>"
    );
    assert_eq!(
        read(out.path(), "es/about.html"),
        "<html><p>Hola, about!</p><b>About</b></html>"
    );
    assert_eq!(
        read(out.path(), "jp/index.html"),
        "<html><p>Konnichiwa, index!</p><b>Home</b></html>"
    );
}

#[test]
fn default_language_copies_land_at_root() {
    let project = four_language_project();
    let out = TempDir::new().unwrap();

    let manifest = scan::scan(project.path()).unwrap();
    generate::generate(&manifest, out.path()).unwrap();

    assert_eq!(
        read(out.path(), "index.html"),
        "<html><p>Salu, index!</p><b>Home</b></html>"
    );
    assert_eq!(read(out.path(), "about.html"), read(out.path(), "pd/about.html"));
}

#[test]
fn missing_translation_stops_the_build() {
    let project = four_language_project();
    write(project.path(), "res/tarje/jp.json", "{}");
    let out = TempDir::new().unwrap();
    let dist = out.path().join("dist");

    let manifest = scan::scan(project.path()).unwrap();
    let err = generate::generate(&manifest, &dist).unwrap_err();

    match err {
        GenerateError::Render {
            language, source, ..
        } => {
            assert_eq!(language, "jp");
            assert_eq!(
                source,
                RenderError::UnresolvedPlaceholder {
                    key: "greeting".to_string()
                }
            );
        }
        other => panic!("expected a render error, got {other:?}"),
    }
    assert!(!dist.exists());
}

#[test]
fn rebuild_is_byte_identical() {
    let project = four_language_project();
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    let manifest = scan::scan(project.path()).unwrap();
    generate::generate(&manifest, first.path()).unwrap();
    generate::generate(&manifest, second.path()).unwrap();

    for rel in ["index.html", "en/about.html", "pd/index.html"] {
        assert_eq!(read(first.path(), rel), read(second.path(), rel), "{rel}");
    }
}
