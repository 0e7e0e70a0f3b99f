//! Structural match of legacy docs URLs.
//!
//! Accepted shape: `http(s)://<w...>.postgresql.org/docs/<d>.<d>/<rest>` where
//! the host label is one or more `w` characters and `<rest>` is non-empty.

use std::sync::LazyLock;

use regex::Regex;

/// Group 1 is the trailing path. `\d` is ASCII-only.
pub static LEGACY_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://w+\.postgresql\.org/docs/(?-u:\d)\.(?-u:\d)/(.+)$").unwrap()
});

/// A URL known to match the legacy docs pattern.
///
/// Only constructible through [`LegacyUrl::parse`], so holding one means the
/// trailing path has already been extracted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LegacyUrl {
    raw: String,
    tail_start: usize,
}

impl LegacyUrl {
    /// Decompose `url`; `None` when it does not have the legacy docs shape.
    pub fn parse(url: &str) -> Option<Self> {
        let tail = LEGACY_URL_REGEX.captures(url)?.get(1)?;
        Some(Self {
            raw: url.to_string(),
            tail_start: tail.start(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Everything after the version segment, byte-for-byte (query and fragment included).
    pub fn trailing_path(&self) -> &str {
        &self.raw[self.tail_start..]
    }
}
