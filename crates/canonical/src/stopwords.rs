//! Stopword list and removal.

use std::fs;
use std::path::Path;

use fxhash::FxHashSet;

use crate::error::CanonicalError;
use crate::unicode::normalize_diacritics;

/// Immutable set of stopwords.
///
/// Membership is exact string comparison; tokens are never normalized at
/// lookup time. Entries may be diacritic-folded once, when the set is built
/// (see [`StopwordSet::from_lines`]).
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: FxHashSet<String>,
}

impl StopwordSet {
    /// Builds a set from newline-separated entries.
    ///
    /// Line endings and surrounding whitespace are trimmed and blank lines
    /// skipped; entries are otherwise stored verbatim. With
    /// `normalize_entries` each entry is diacritic-folded first.
    pub fn from_lines<I, S>(lines: I, normalize_entries: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = FxHashSet::default();
        for line in lines {
            let trimmed = line.as_ref().trim();
            if trimmed.is_empty() {
                continue;
            }
            let entry = if normalize_entries {
                normalize_diacritics(trimmed).into_owned()
            } else {
                trimmed.to_string()
            };
            words.insert(entry);
        }
        Self { words }
    }

    /// Loads a stopword file with one entry per line.
    pub fn from_path(
        path: impl AsRef<Path>,
        normalize_entries: bool,
    ) -> Result<Self, CanonicalError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|err| CanonicalError::StopwordLoad {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        let set = Self::from_lines(content.lines(), normalize_entries);
        tracing::debug!(path = %path.display(), entries = set.len(), "loaded stopwords");
        Ok(set)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Drops every whitespace-separated token that is in the set and
    /// rejoins the rest with single spaces.
    ///
    /// ```rust
    /// use canonical::StopwordSet;
    ///
    /// let stopwords = StopwordSet::from_lines(["và", "của"], false);
    /// assert_eq!(stopwords.remove("áo và quần của nam"), "áo quần nam");
    /// ```
    pub fn remove(&self, text: &str) -> String {
        text.split_whitespace()
            .filter(|token| !self.contains(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
