//! Word segmentation (stage three).
//!
//! Vietnamese writes every syllable as its own space-separated unit, so a
//! word like "thời trang" spans two tokens. A [`WordSegmenter`] marks such
//! words by joining their syllables with `_`. The pipeline treats the
//! segmenter as a black box: any implementation that takes a sentence and
//! returns the same sentence with boundaries marked can be plugged in.
//!
//! Two implementations ship with the crate:
//!
//! - [`WhitespaceSegmenter`] leaves text unchanged (no compounds).
//! - [`DictionarySegmenter`] does forward longest-match against a lexicon of
//!   multi-syllable words.

use std::fs;
use std::path::Path;

use fxhash::FxHashSet;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{CanonicalError, SegmentError};
use crate::unicode::normalize_diacritics;
use crate::whitespace::collapse_whitespace;

/// Joins syllables of one compound word.
pub const COMPOUND_JOINER: &str = "_";

/// Capability interface for Vietnamese word segmentation.
pub trait WordSegmenter: Send + Sync {
    /// Returns `sentence` with multi-syllable words joined by `_`.
    fn segment(&self, sentence: &str) -> Result<String, SegmentError>;

    /// Short label used in logs.
    fn name(&self) -> &str {
        "custom"
    }
}

/// Identity segmenter. Produces no compounds and never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceSegmenter;

impl WordSegmenter for WhitespaceSegmenter {
    fn segment(&self, sentence: &str) -> Result<String, SegmentError> {
        Ok(sentence.to_string())
    }

    fn name(&self) -> &str {
        "whitespace"
    }
}

/// Forward longest-match segmenter over a compound-word lexicon.
///
/// Lexicon entries hold two or more syllables, separated by spaces or
/// underscores. Entries are lower-cased and diacritic-folded on load so they
/// line up with the output of the earlier stages.
#[derive(Debug, Clone, Default)]
pub struct DictionarySegmenter {
    compounds: FxHashSet<String>,
    max_syllables: usize,
}

impl DictionarySegmenter {
    /// Builds a segmenter from an iterator of lexicon entries.
    /// Single-syllable and blank entries are ignored.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compounds = FxHashSet::default();
        let mut max_syllables = 0;
        for entry in entries {
            let folded = normalize_diacritics(entry.as_ref()).to_lowercase();
            let syllables: Vec<&str> = folded
                .split(|c: char| c.is_whitespace() || c == '_')
                .filter(|s| !s.is_empty())
                .collect();
            if syllables.len() < 2 {
                continue;
            }
            max_syllables = max_syllables.max(syllables.len());
            compounds.insert(syllables.join(" "));
        }
        Self {
            compounds,
            max_syllables,
        }
    }

    /// Loads a lexicon file with one compound word per line.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CanonicalError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|err| CanonicalError::LexiconLoad {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Ok(Self::from_entries(content.lines()))
    }

    /// Number of compound words in the lexicon.
    pub fn len(&self) -> usize {
        self.compounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compounds.is_empty()
    }
}

impl WordSegmenter for DictionarySegmenter {
    fn segment(&self, sentence: &str) -> Result<String, SegmentError> {
        let tokens: Vec<&str> = sentence.split_whitespace().collect();
        let mut out: Vec<String> = Vec::with_capacity(tokens.len());
        let mut i = 0;

        while i < tokens.len() {
            let longest = self.max_syllables.min(tokens.len() - i);
            let mut matched = 1;
            for len in (2..=longest).rev() {
                let candidate = tokens[i..i + len].join(" ");
                if self.compounds.contains(&candidate) {
                    matched = len;
                    break;
                }
            }
            out.push(tokens[i..i + matched].join(COMPOUND_JOINER));
            i += matched;
        }

        Ok(out.join(" "))
    }

    fn name(&self) -> &str {
        "dictionary"
    }
}

/// Output of [`segment_sentences`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentedText {
    /// Segmented text, sentences rejoined with single spaces.
    pub text: String,
    /// Sentences the segmenter failed on and that were kept as-is.
    pub fallbacks: usize,
}

/// Splits `text` into sentences, strips periods and segments each sentence.
///
/// A segmenter failure is logged and the affected sentence passes through
/// unsegmented; it never aborts the pipeline.
pub fn segment_sentences(text: &str, segmenter: &dyn WordSegmenter) -> SegmentedText {
    let mut pieces: Vec<String> = Vec::new();
    let mut fallbacks = 0;

    for sentence in text.split_sentence_bounds() {
        let stripped = sentence.replace('.', "");
        if stripped.trim().is_empty() {
            continue;
        }
        match segmenter.segment(&stripped) {
            Ok(segmented) => pieces.push(segmented),
            Err(err) => {
                fallbacks += 1;
                tracing::warn!(
                    segmenter = segmenter.name(),
                    error = %err,
                    sentence = %stripped.trim(),
                    "word segmentation failed; keeping sentence unsegmented"
                );
                pieces.push(stripped);
            }
        }
    }

    SegmentedText {
        text: collapse_whitespace(&pieces.join(" ")),
        fallbacks,
    }
}
