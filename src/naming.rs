//! Character-set rules for page names and dictionary keys.
//!
//! Page names and dictionary keys share one alphabet: ASCII letters, digits,
//! `-` and `.`. This is the same alphabet the renderer's completeness check
//! scans for, so anything that passes here can be addressed as a `{key}`
//! placeholder and anything that fails can never collide with one.
//!
//! ## Page Names
//!
//! A page name is the fragment's filename with the template extension
//! stripped:
//! - `index.html` → `"index"`
//! - `about-us.html` → `"about-us"`
//! - `v2.1.html` → `"v2.1"`
//! - `base.HTML` → `"base"` (extension match is case-insensitive)

/// Reserved dictionary key that is always substituted with the page name.
pub const NAME_KEY: &str = ".name";

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '.'
}

/// Whether `key` can appear inside a `{key}` placeholder.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(is_key_char)
}

/// Whether `name` is usable as a page name.
///
/// Same alphabet as keys, but `.` and `..` are rejected since the name
/// becomes an output filename.
pub fn is_valid_page_name(name: &str) -> bool {
    is_valid_key(name) && name != "." && name != ".."
}

/// Derive a page name from a fragment filename.
///
/// Returns `None` when `filename` does not end in `.{extension}` or when
/// nothing is left after stripping it.
pub fn page_name_from_filename(filename: &str, extension: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || !ext.eq_ignore_ascii_case(extension) {
        return None;
    }
    Some(stem.to_string())
}
