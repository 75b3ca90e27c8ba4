//! Output type of the preprocessing pipeline.

use serde::{Deserialize, Serialize};

/// A product description after all preprocessing stages.
///
/// `text` is the whitespace-joined token sequence that feeds the term
/// dictionary; `tokens` is the same sequence split for callers that need it.
/// For a fixed config version, stopword list and segmenter, the value is a
/// deterministic function of the raw description.
///
/// ```rust
/// use canonical::{Preprocessor, StopwordSet};
///
/// let pre = Preprocessor::with_stopwords(StopwordSet::from_lines(["và"], false));
/// let doc = pre.preprocess("Áo thun và quần short");
///
/// assert_eq!(doc.text, "áo thun quần short");
/// assert_eq!(doc.tokens, vec!["áo", "thun", "quần", "short"]);
/// assert_eq!(doc.version, 1);
/// assert_eq!(doc.segmenter_fallbacks, 0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessedDescription {
    /// Final processed text, tokens separated by single spaces.
    pub text: String,
    /// `text` split on whitespace.
    pub tokens: Vec<String>,
    /// Config version the description was processed under.
    pub version: u32,
    /// Sentences kept unsegmented because the segmenter failed.
    pub segmenter_fallbacks: usize,
}

impl ProcessedDescription {
    pub(crate) fn new(text: String, version: u32, segmenter_fallbacks: usize) -> Self {
        let tokens = text.split_whitespace().map(str::to_string).collect();
        Self {
            text,
            tokens,
            version,
            segmenter_fallbacks,
        }
    }

    /// True when no token survived preprocessing.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True when at least one sentence fell back to unsegmented text.
    pub fn used_fallback(&self) -> bool {
        self.segmenter_fallbacks > 0
    }
}
