//! Legacy docs URL -> current-version candidate URL.
//!
//! Two stages: [`LegacyUrl::parse`] decides whether the URL has the legacy
//! shape and extracts the trailing path, then the [`OverrideTable`] is
//! consulted before falling back to the general rewrite (swap the version
//! segment for `current`, keep the trailing path as-is).

mod overrides;
mod pattern;

use std::fmt;

use crate::config::DocshiftConfig;

pub use overrides::{OverrideTable, BUILTIN_OVERRIDES};
pub use pattern::LegacyUrl;

/// Root every candidate URL is built under.
pub const CURRENT_ROOT: &str = "https://postgresql.org/docs/current/";

/// A rewritten URL that has not been verified yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateUrl(String);

impl CandidateUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CandidateUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pure rewriter: current root plus the override table.
#[derive(Debug, Clone)]
pub struct Rewriter {
    current_root: String,
    overrides: OverrideTable,
}

impl Rewriter {
    /// `current_root` gets a trailing `/` if it lacks one.
    pub fn new(current_root: impl Into<String>, overrides: OverrideTable) -> Self {
        let mut current_root = current_root.into();
        if !current_root.ends_with('/') {
            current_root.push('/');
        }
        Self {
            current_root,
            overrides,
        }
    }

    /// Real root with built-in overrides plus any from config.
    pub fn from_config(cfg: &DocshiftConfig) -> Self {
        let overrides = OverrideTable::builtin().with_extra(
            cfg.overrides
                .iter()
                .map(|(from, to)| (from.clone(), to.clone())),
        );
        Self::new(CURRENT_ROOT, overrides)
    }

    pub fn current_root(&self) -> &str {
        &self.current_root
    }

    /// `None` when `url` is not a legacy docs URL; callers must not proceed.
    pub fn rewrite(&self, url: &str) -> Option<CandidateUrl> {
        LegacyUrl::parse(url).map(|legacy| self.rewrite_legacy(&legacy))
    }

    pub fn rewrite_legacy(&self, legacy: &LegacyUrl) -> CandidateUrl {
        let tail = legacy.trailing_path();
        let target = self.overrides.lookup(tail).unwrap_or(tail);
        CandidateUrl(format!("{}{}", self.current_root, target))
    }
}

impl Default for Rewriter {
    fn default() -> Self {
        Self::new(CURRENT_ROOT, OverrideTable::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_rule_keeps_trailing_path() {
        let r = Rewriter::default();
        let cases = [
            (
                "http://www.postgresql.org/docs/9.6/tutorial/index.html",
                "https://postgresql.org/docs/current/tutorial/index.html",
            ),
            (
                "https://www.postgresql.org/docs/8.4/library/os.path.html#os.path.join",
                "https://postgresql.org/docs/current/library/os.path.html#os.path.join",
            ),
            (
                "https://www.postgresql.org/docs/9.1/search.html?q=select",
                "https://postgresql.org/docs/current/search.html?q=select",
            ),
        ];
        for (legacy, expected) in cases {
            assert_eq!(r.rewrite(legacy).unwrap().as_str(), expected, "{legacy}");
        }
    }

    #[test]
    fn overrides_replace_trailing_path() {
        let r = Rewriter::default();
        assert_eq!(
            r.rewrite("http://www.postgresql.org/docs/9.6/library/sets.html")
                .unwrap()
                .as_str(),
            "https://postgresql.org/docs/current/library/stdtypes.html#set"
        );
        assert_eq!(
            r.rewrite("https://www.postgresql.org/docs/9.5/library/stringio.html")
                .unwrap()
                .as_str(),
            "https://postgresql.org/docs/current/library/io.html#io.StringIO"
        );
    }

    #[test]
    fn override_needs_exact_tail() {
        let r = Rewriter::default();
        assert_eq!(
            r.rewrite("http://www.postgresql.org/docs/9.6/library/sets.html#x")
                .unwrap()
                .as_str(),
            "https://postgresql.org/docs/current/library/sets.html#x"
        );
    }

    #[test]
    fn not_applicable_outside_pattern() {
        let r = Rewriter::default();
        assert!(r.rewrite("https://postgresql.org/docs/current/index.html").is_none());
        assert!(r.rewrite("https://example.com/docs/9.6/index.html").is_none());
    }

    #[test]
    fn custom_root_gets_trailing_slash() {
        let r = Rewriter::new("http://127.0.0.1:8080", OverrideTable::empty());
        assert_eq!(r.current_root(), "http://127.0.0.1:8080/");
        assert_eq!(
            r.rewrite("http://www.postgresql.org/docs/9.6/library/sets.html")
                .unwrap()
                .as_str(),
            "http://127.0.0.1:8080/library/sets.html"
        );
    }

    #[test]
    fn config_overrides_are_merged() {
        let mut cfg = DocshiftConfig::default();
        cfg.overrides
            .insert("library/md5.html".into(), "library/hashlib.html".into());
        let r = Rewriter::from_config(&cfg);
        assert_eq!(
            r.rewrite("http://www.postgresql.org/docs/9.6/library/md5.html")
                .unwrap()
                .as_str(),
            "https://postgresql.org/docs/current/library/hashlib.html"
        );
        assert_eq!(
            r.rewrite("http://www.postgresql.org/docs/9.6/library/sets.html")
                .unwrap()
                .as_str(),
            "https://postgresql.org/docs/current/library/stdtypes.html#set"
        );
    }
}
