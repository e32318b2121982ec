//! CLI output formatting for scan, check, and build.
//!
//! # Information-First Display
//!
//! Output is **page-centric, not file-centric**. Each entity leads with its
//! positional index and name; source files and output paths are secondary
//! context on indented lines. The same page reads the same way across
//! stages.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Pages
//! 001 about
//!     Source: about.html
//! 002 index
//!     Source: index.html
//!
//! Languages
//! 001 en (6 keys)
//!     Source: en.json
//! 002 es (6 keys, default)
//!     Source: es.json
//! ```
//!
//! ## Build
//!
//! ```text
//! en
//!     001 about → en/about.html
//!     002 index → en/index.html
//! es (default)
//!     001 about → es/about.html, about.html
//!     002 index → es/index.html, index.html
//!
//! Generated 4 pages in 2 languages, 2 at root, 0 assets
//! ```
//!
//! ## Failures
//!
//! ```text
//! Failed
//!     about [en]: No value for placeholder '{about.title}'
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.

use crate::generate::{BuildReport, RenderFailure};
use crate::scan::Manifest;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

fn failure_lines(failures: &[RenderFailure]) -> Vec<String> {
    let mut lines = Vec::new();
    if failures.is_empty() {
        return lines;
    }
    lines.push(String::new());
    lines.push("Failed".to_string());
    for failure in failures {
        lines.push(format!(
            "{}{} [{}]: {}",
            indent(1),
            failure.page,
            failure.language,
            failure.error
        ));
    }
    lines
}

// ============================================================================
// Scan output
// ============================================================================

/// Format the discovered pages and languages.
pub fn format_scan_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];

    for (i, page) in manifest.pages.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), page.name));
        lines.push(format!("{}Source: {}", indent(1), page.source));
    }

    lines.push(String::new());
    lines.push("Languages".to_string());
    for (i, lang) in manifest.languages.iter().enumerate() {
        let keys = plural(lang.dictionary.len(), "key");
        let detail = if lang.is_default {
            format!("{}, default", keys)
        } else {
            keys
        };
        lines.push(format!("{} {} ({})", format_index(i + 1), lang.code, detail));
        lines.push(format!("{}Source: {}", indent(1), lang.source));
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest) {
    for line in format_scan_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the result of rendering everything without writing.
pub fn format_check_output(report: &BuildReport) -> Vec<String> {
    let mut lines = failure_lines(&report.failures);
    lines.push(format!(
        "Rendered {}, {} failed",
        plural(report.rendered, "page"),
        report.failures.len()
    ));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(report: &BuildReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Format the written files, grouped by language.
///
/// A default-language root copy is shown on the same line as the page's
/// language file rather than as a separate entry.
pub fn format_build_output(manifest: &Manifest, report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();
    let mut root_copies = 0;

    for lang in &manifest.languages {
        let files: Vec<_> = report
            .files
            .iter()
            .filter(|f| f.language == lang.code && !f.root_copy)
            .collect();
        if files.is_empty() {
            continue;
        }

        let marker = if lang.is_default { " (default)" } else { "" };
        lines.push(format!("{}{}", lang.code, marker));

        for (i, file) in files.iter().enumerate() {
            let root = report
                .files
                .iter()
                .find(|f| f.root_copy && f.page == file.page && f.language == file.language);
            let targets = match root {
                Some(r) => {
                    root_copies += 1;
                    format!("{}, {}", file.path.display(), r.path.display())
                }
                None => file.path.display().to_string(),
            };
            lines.push(format!(
                "{}{} {} \u{2192} {}",
                indent(1),
                format_index(i + 1),
                file.page,
                targets
            ));
        }
    }

    lines.extend(failure_lines(&report.failures));

    lines.push(String::new());
    lines.push(format!(
        "Generated {} in {}, {} at root, {}",
        plural(report.rendered, "page"),
        plural(manifest.languages.len(), "language"),
        root_copies,
        plural(report.assets_copied, "asset")
    ));

    lines
}

/// Print build output to stdout.
pub fn print_build_output(manifest: &Manifest, report: &BuildReport) {
    for line in format_build_output(manifest, report) {
        println!("{}", line);
    }
}
