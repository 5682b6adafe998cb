//! Free-text query matching for palette elements
//!
//! One `QueryFilter` is built per query and shared by the filtered view, the
//! per-category counts and the fast list, so all three agree on what matches.
//! Two modes are available: case-insensitive substring (the default) and
//! fuzzy matching through nucleo.

use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Matcher, Utf32Str};
use serde::{Deserialize, Serialize};

use crate::catalog::SelectableElement;

/// How the query text is matched against element text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    #[default]
    Substring,
    Fuzzy,
}

/// Check if haystack contains needle using ASCII case-insensitive matching.
/// `needle_lower` must already be lowercase.
#[inline]
pub(crate) fn contains_ignore_ascii_case(haystack: &str, needle_lower: &str) -> bool {
    let h = haystack.as_bytes();
    let n = needle_lower.as_bytes();
    if n.is_empty() {
        return true;
    }
    if n.len() > h.len() {
        return false;
    }
    'outer: for i in 0..=(h.len() - n.len()) {
        for j in 0..n.len() {
            if h[i + j].to_ascii_lowercase() != n[j] {
                continue 'outer;
            }
        }
        return true;
    }
    false
}

/// Case-insensitive containment; allocation-free for ASCII text.
fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    if haystack.is_ascii() && needle_lower.is_ascii() {
        contains_ignore_ascii_case(haystack, needle_lower)
    } else {
        haystack.to_lowercase().contains(needle_lower)
    }
}

enum Strategy {
    MatchAll,
    Substring(String),
    Fuzzy {
        pattern: Pattern,
        matcher: Matcher,
        buf: Vec<char>,
    },
}

/// Compiled query, reused across every element of one render
pub struct QueryFilter {
    strategy: Strategy,
}

impl QueryFilter {
    /// A blank (or whitespace-only) query matches everything.
    pub fn new(query: &str, mode: MatchMode) -> Self {
        let trimmed = query.trim();
        let strategy = if trimmed.is_empty() {
            Strategy::MatchAll
        } else {
            match mode {
                MatchMode::Substring => Strategy::Substring(trimmed.to_lowercase()),
                MatchMode::Fuzzy => Strategy::Fuzzy {
                    pattern: Pattern::parse(trimmed, CaseMatching::Ignore, Normalization::Smart),
                    matcher: Matcher::new(nucleo_matcher::Config::DEFAULT),
                    buf: Vec::with_capacity(64),
                },
            }
        };
        QueryFilter { strategy }
    }

    /// Match against title, name, description and labels.
    pub fn matches(&mut self, element: &SelectableElement) -> bool {
        let fields = [
            element.title.as_str(),
            element.name.as_str(),
            element.description.as_str(),
            element.labels.as_str(),
        ];
        match &mut self.strategy {
            Strategy::MatchAll => true,
            Strategy::Substring(needle) => fields.iter().any(|f| contains_ignore_case(f, needle)),
            Strategy::Fuzzy {
                pattern,
                matcher,
                buf,
            } => fields.iter().any(|f| {
                buf.clear();
                pattern.score(Utf32Str::new(f, buf), matcher).is_some()
            }),
        }
    }
}
