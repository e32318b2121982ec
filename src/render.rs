//! The page renderer.
//!
//! Turns one (base template, page fragment, page name, dictionary) tuple into
//! the final HTML for that page in that language. Pure text in, text out: no
//! I/O, no shared state, identical inputs always give identical output.
//!
//! ## Pipeline
//!
//! ```text
//! 1. inject_content        base + fragment   {Content} → fragment (first occurrence)
//! 2. substitute_name       {.name}           → page name
//! 3. substitute_keys       {key}             → dictionary value
//! 4. check_complete        any {key} left?   → UnresolvedPlaceholder
//! 5. resolve_conditionals  {If"page"BODY}    → BODY, other {If"..."...} removed
//! ```
//!
//! The order matters. Conditionals are resolved after keys so that keys can
//! appear inside conditional bodies, and the completeness check runs before
//! conditionals are stripped, so a missing key inside another page's
//! conditional block still fails the render.
//!
//! ## Substitution Is Single-Pass
//!
//! Key substitution scans the text once. A dictionary value is inserted
//! verbatim and never scanned again, so a value like `"{other}"` stays
//! literal (and is then reported by the completeness check). Values are not
//! templates.
//!
//! ## Conditional Tags
//!
//! ```text
//! {If"about"<a href="/">Back home</a>}
//! ```
//!
//! The tag name is compared to the page name exactly. The body ends at the
//! first `}`; bodies cannot contain braces that close early, and nesting is
//! not supported.

use crate::dictionary::Dictionary;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use thiserror::Error;

/// Injection point for the page fragment in the base template.
pub const CONTENT_MARKER: &str = "{Content}";

/// Placeholder substituted with the page name.
pub const NAME_PLACEHOLDER: &str = "{.name}";

const CONDITIONAL_OPEN: &str = "{If\"";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9.-]+)\}").expect("placeholder pattern is valid"));

static CONDITIONAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\{If"[^"]*"[^}]*\}"#).expect("conditional pattern is valid"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("No value for placeholder '{{{key}}}'")]
    UnresolvedPlaceholder { key: String },
    #[error("Base template has no {{Content}} marker")]
    MissingContentMarker,
    #[error("Conditional tag {{If\"{tag}\"... is missing its closing '}}'")]
    UnterminatedConditional { tag: String },
}

/// Render one page in one language.
pub fn render(
    base: &str,
    content: &str,
    page_name: &str,
    dictionary: &Dictionary,
) -> Result<String, RenderError> {
    let page = inject_content(base, content)?;
    let page = substitute_name(&page, page_name);
    let page = substitute_keys(&page, dictionary);
    check_complete(&page)?;
    let page = resolve_conditionals(&page, page_name);
    check_conditionals_closed(&page)?;
    Ok(page)
}

/// Replace the first `{Content}` in `base` with `content`.
pub fn inject_content(base: &str, content: &str) -> Result<String, RenderError> {
    if !base.contains(CONTENT_MARKER) {
        return Err(RenderError::MissingContentMarker);
    }
    Ok(base.replacen(CONTENT_MARKER, content, 1))
}

/// Replace every `{.name}` with the page name.
pub fn substitute_name(text: &str, page_name: &str) -> String {
    text.replace(NAME_PLACEHOLDER, page_name)
}

/// Replace every `{key}` that has a dictionary entry, leaving the rest.
///
/// Inserted values are not rescanned.
pub fn substitute_keys(text: &str, dictionary: &Dictionary) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| match dictionary.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Fail on the first `{key}` placeholder still present in `text`.
pub fn check_complete(text: &str) -> Result<(), RenderError> {
    match PLACEHOLDER.captures(text) {
        Some(caps) => Err(RenderError::UnresolvedPlaceholder {
            key: caps[1].to_string(),
        }),
        None => Ok(()),
    }
}

/// Keep the bodies of conditionals tagged `page_name`, drop all others.
pub fn resolve_conditionals(text: &str, page_name: &str) -> String {
    let kept = keep_conditionals(text, page_name);
    CONDITIONAL.replace_all(&kept, "").into_owned()
}

/// Unwrap every `{If"page_name"BODY}` into `BODY`.
fn keep_conditionals(text: &str, page_name: &str) -> String {
    let opener = format!("{CONDITIONAL_OPEN}{page_name}\"");
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(&opener) {
        let body_start = start + opener.len();
        let Some(body_len) = rest[body_start..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        out.push_str(&rest[body_start..body_start + body_len]);
        rest = &rest[body_start + body_len + 1..];
    }

    out.push_str(rest);
    out
}

/// Fail if a `{If"` opener survived resolution.
fn check_conditionals_closed(text: &str) -> Result<(), RenderError> {
    let Some(start) = text.find(CONDITIONAL_OPEN) else {
        return Ok(());
    };
    let after = &text[start + CONDITIONAL_OPEN.len()..];
    let tag = after.split('"').next().unwrap_or(after);
    Err(RenderError::UnterminatedConditional {
        tag: tag.to_string(),
    })
}
