//! Shared types passed from the scan stage to the build driver.

use crate::dictionary::Dictionary;

/// A page fragment discovered in the templates directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Page name: the fragment filename without its extension.
    pub name: String,
    /// Fragment filename, for display.
    pub source: String,
    /// Fragment HTML, injected at the base template's `{Content}` marker.
    pub content: String,
}

/// A supported language with its loaded dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    /// Language code, also the output subdirectory name.
    pub code: String,
    /// Pages in the default language are also written to the output root.
    pub is_default: bool,
    /// Dictionary filename, for display.
    pub source: String,
    pub dictionary: Dictionary,
}
