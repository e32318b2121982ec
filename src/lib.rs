//! # polypage
//!
//! A static multi-language HTML page generator. One base layout, one HTML
//! fragment per page, and one key → text dictionary per language go in; one
//! rendered HTML file per (page, language) comes out.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      project/  →  Manifest       (config, base, pages, dictionaries)
//! 2. Generate  Manifest  →  dist/          (render every pair, write files)
//! ```
//!
//! All rendering logic lives in [`render`], a pure function from strings to
//! a string. Scanning and generating are the I/O around it, so the renderer
//! is tested without touching the filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`render`] | The page renderer: content injection, key substitution, completeness check, conditional tags |
//! | [`scan`] | Stage 1 — loads config, base template, page fragments, and dictionaries into a manifest |
//! | [`generate`] | Stage 2 — renders every (page, language) pair in parallel and writes the output tree |
//! | [`config`] | `config.toml` loading, merging over stock defaults, and validation |
//! | [`dictionary`] | Language dictionaries: JSON loading and key validation |
//! | [`naming`] | Page-name and key alphabet rules, page names from filenames |
//! | [`types`] | Shared types passed from scan to generate (`Page`, `Language`) |
//! | [`output`] | CLI output formatting |
//!
//! # Template Syntax
//!
//! ```text
//! {Content}            base template only: where the page fragment goes
//! {.name}              the current page name
//! {key}                the current language's value for `key`
//! {If"page"BODY}       BODY on page `page`, nothing elsewhere
//! ```
//!
//! Keys use letters, digits, `-` and `.`. A `{key}` with no value in the
//! current language fails the render, so every page is complete in every
//! language or the build stops.
//!
//! # Design Decisions
//!
//! ## Literal Substitution Over a Template Engine
//!
//! The syntax is four literal forms with no expressions, loops, or escaping.
//! Translators edit flat JSON and designers edit plain HTML; neither needs to
//! learn a template language. Substitution is a single pass, so dictionary
//! values are inserted as-is and never interpreted.
//!
//! ## Fail the Build on Missing Keys
//!
//! A missing translation is a build error, not a page with `{greeting}` in
//! it. By default nothing is written if any page fails; `build.keep_going`
//! writes what rendered and lists every failure.
//!
//! ## Default Language at the Root
//!
//! Every language gets its own directory (`/es/about.html`). The default
//! language is additionally written unprefixed (`/about.html`) so the
//! canonical URLs work without a language segment.

pub mod config;
pub mod dictionary;
pub mod generate;
pub mod naming;
pub mod output;
pub mod render;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
