//! Stage one: lexical cleanup of raw product descriptions.
//!
//! Lower-cases the text, splits it into sentences and keeps only the runs of
//! Vietnamese-alphabet characters inside each sentence. Digits, symbols and
//! measurement units are dropped. Sentences that end up empty are skipped, so
//! a description made only of numbers cleans to the empty string.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::config::PreprocessConfig;
use crate::whitespace::collapse_whitespace;

/// Separator placed between cleaned sentences.
pub const SENTENCE_SEPARATOR: &str = ". ";

static VIETNAMESE_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b[a-záàảãạăắằẳẵặâấầẩẫậéèẻẽẹêếềểễệóòỏõọôốồổỗộơớờởỡợíìỉĩịúùủũụưứừửữựýỳỷỹỵđ]+\b",
    )
    .expect("word pattern is a valid literal")
});

static DIGIT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("digit pattern is a valid literal"));

// `_` is a regex word character, so compounds must be split before word
// extraction or the whole compound is lost.
fn is_inline_punctuation(ch: char) -> bool {
    matches!(ch, ',' | '.' | '\'' | '_')
}

fn is_symbol(ch: char) -> bool {
    matches!(
        ch,
        ',' | '.' | ';' | ':' | '?' | '%' | '_' | ')' | '(' | '+' | '/' | '-'
    )
}

/// Runs lexical cleanup over `text`.
///
/// The output is lowercase, holds only Vietnamese-alphabet words, and joins
/// non-empty sentences with `". "`. Whole-word unit tokens listed in
/// `cfg.unit_tokens` are removed.
///
/// ```rust
/// use canonical::{clean_lexical, PreprocessConfig};
///
/// let cfg = PreprocessConfig::default();
/// assert_eq!(clean_lexical("Áo thun, 100% cotton!", &cfg), "áo thun cotton");
/// assert_eq!(clean_lexical("2023 123", &cfg), "");
/// ```
pub fn clean_lexical(text: &str, cfg: &PreprocessConfig) -> String {
    let lowered: String = text
        .to_lowercase()
        .chars()
        .map(|ch| if is_inline_punctuation(ch) { ' ' } else { ch })
        .collect();

    let mut sentences: Vec<String> = Vec::new();
    for sentence in lowered.split_sentence_bounds() {
        let cleaned = clean_sentence(sentence, &cfg.unit_tokens);
        if !cleaned.is_empty() {
            sentences.push(cleaned);
        }
    }

    collapse_whitespace(&sentences.join(SENTENCE_SEPARATOR))
}

fn clean_sentence(sentence: &str, unit_tokens: &[String]) -> String {
    let words: Vec<&str> = VIETNAMESE_WORD
        .find_iter(sentence)
        .map(|m| m.as_str())
        .collect();
    let joined = words.join(" ");

    let without_digits = DIGIT_RUN.replace_all(&joined, "");
    let spaced: String = without_digits
        .chars()
        .map(|ch| if is_symbol(ch) { ' ' } else { ch })
        .collect();

    let kept: Vec<&str> = spaced
        .split_whitespace()
        .filter(|token| !unit_tokens.iter().any(|unit| unit == token))
        .collect();
    kept.join(" ")
}
