//! Pages whose current location does not follow the general rewrite.

use std::collections::BTreeMap;

/// Built-in overrides: legacy trailing path -> trailing path under the current root.
pub const BUILTIN_OVERRIDES: &[(&str, &str)] = &[
    ("library/sets.html", "library/stdtypes.html#set"),
    ("library/stringio.html", "library/io.html#io.StringIO"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideTable {
    entries: BTreeMap<String, String>,
}

impl OverrideTable {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn builtin() -> Self {
        Self::empty().with_extra(
            BUILTIN_OVERRIDES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string())),
        )
    }

    /// Merge `extra` over the current entries; later keys win.
    pub fn with_extra<I>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.entries.extend(extra);
        self
    }

    /// Exact-match lookup on the trailing path.
    pub fn lookup(&self, trailing_path: &str) -> Option<&str> {
        self.entries.get(trailing_path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for OverrideTable {
    fn default() -> Self {
        Self::builtin()
    }
}
