//! Legacy diacritic folding.
//!
//! Older Vietnamese input methods emit a vowel followed by a combining tone
//! mark (and sometimes a combining circumflex, breve or horn) instead of the
//! precomposed code point. The catalog text mixes both encodings, so the same
//! word can appear as two different byte strings. [`normalize_diacritics`]
//! folds every known decomposed pair into its precomposed form.
//!
//! The fold is table driven rather than a full NFC pass: only Vietnamese
//! vowel sequences are touched, everything else passes through verbatim.

use std::borrow::Cow;

use fxhash::FxHashMap;
use once_cell::sync::Lazy;

/// `(base, combining mark, precomposed)` for every Vietnamese vowel/tone pair
/// in both cases, followed by the vowel-modifier pairs so a fully decomposed
/// sequence such as `a` + U+0302 + U+0301 folds in two steps. The last rows
/// cover canonical (NFD) ordering, where the dot below precedes the modifier.
pub(crate) const LEGACY_DIACRITICS: [(char, char, char); 140] = [
    ('a', '\u{0300}', 'à'), ('a', '\u{0301}', 'á'), ('a', '\u{0309}', 'ả'),
    ('a', '\u{0303}', 'ã'), ('a', '\u{0323}', 'ạ'),
    ('â', '\u{0300}', 'ầ'), ('â', '\u{0301}', 'ấ'), ('â', '\u{0309}', 'ẩ'),
    ('â', '\u{0303}', 'ẫ'), ('â', '\u{0323}', 'ậ'),
    ('ă', '\u{0300}', 'ằ'), ('ă', '\u{0301}', 'ắ'), ('ă', '\u{0309}', 'ẳ'),
    ('ă', '\u{0303}', 'ẵ'), ('ă', '\u{0323}', 'ặ'),
    ('e', '\u{0300}', 'è'), ('e', '\u{0301}', 'é'), ('e', '\u{0309}', 'ẻ'),
    ('e', '\u{0303}', 'ẽ'), ('e', '\u{0323}', 'ẹ'),
    ('ê', '\u{0300}', 'ề'), ('ê', '\u{0301}', 'ế'), ('ê', '\u{0309}', 'ể'),
    ('ê', '\u{0303}', 'ễ'), ('ê', '\u{0323}', 'ệ'),
    ('i', '\u{0300}', 'ì'), ('i', '\u{0301}', 'í'), ('i', '\u{0309}', 'ỉ'),
    ('i', '\u{0303}', 'ĩ'), ('i', '\u{0323}', 'ị'),
    ('o', '\u{0300}', 'ò'), ('o', '\u{0301}', 'ó'), ('o', '\u{0309}', 'ỏ'),
    ('o', '\u{0303}', 'õ'), ('o', '\u{0323}', 'ọ'),
    ('ô', '\u{0300}', 'ồ'), ('ô', '\u{0301}', 'ố'), ('ô', '\u{0309}', 'ổ'),
    ('ô', '\u{0303}', 'ỗ'), ('ô', '\u{0323}', 'ộ'),
    ('ơ', '\u{0300}', 'ờ'), ('ơ', '\u{0301}', 'ớ'), ('ơ', '\u{0309}', 'ở'),
    ('ơ', '\u{0303}', 'ỡ'), ('ơ', '\u{0323}', 'ợ'),
    ('u', '\u{0300}', 'ù'), ('u', '\u{0301}', 'ú'), ('u', '\u{0309}', 'ủ'),
    ('u', '\u{0303}', 'ũ'), ('u', '\u{0323}', 'ụ'),
    ('ư', '\u{0300}', 'ừ'), ('ư', '\u{0301}', 'ứ'), ('ư', '\u{0309}', 'ử'),
    ('ư', '\u{0303}', 'ữ'), ('ư', '\u{0323}', 'ự'),
    ('y', '\u{0300}', 'ỳ'), ('y', '\u{0301}', 'ý'), ('y', '\u{0309}', 'ỷ'),
    ('y', '\u{0303}', 'ỹ'), ('y', '\u{0323}', 'ỵ'),
    ('A', '\u{0300}', 'À'), ('A', '\u{0301}', 'Á'), ('A', '\u{0309}', 'Ả'),
    ('A', '\u{0303}', 'Ã'), ('A', '\u{0323}', 'Ạ'),
    ('Â', '\u{0300}', 'Ầ'), ('Â', '\u{0301}', 'Ấ'), ('Â', '\u{0309}', 'Ẩ'),
    ('Â', '\u{0303}', 'Ẫ'), ('Â', '\u{0323}', 'Ậ'),
    ('Ă', '\u{0300}', 'Ằ'), ('Ă', '\u{0301}', 'Ắ'), ('Ă', '\u{0309}', 'Ẳ'),
    ('Ă', '\u{0303}', 'Ẵ'), ('Ă', '\u{0323}', 'Ặ'),
    ('E', '\u{0300}', 'È'), ('E', '\u{0301}', 'É'), ('E', '\u{0309}', 'Ẻ'),
    ('E', '\u{0303}', 'Ẽ'), ('E', '\u{0323}', 'Ẹ'),
    ('Ê', '\u{0300}', 'Ề'), ('Ê', '\u{0301}', 'Ế'), ('Ê', '\u{0309}', 'Ể'),
    ('Ê', '\u{0303}', 'Ễ'), ('Ê', '\u{0323}', 'Ệ'),
    ('I', '\u{0300}', 'Ì'), ('I', '\u{0301}', 'Í'), ('I', '\u{0309}', 'Ỉ'),
    ('I', '\u{0303}', 'Ĩ'), ('I', '\u{0323}', 'Ị'),
    ('O', '\u{0300}', 'Ò'), ('O', '\u{0301}', 'Ó'), ('O', '\u{0309}', 'Ỏ'),
    ('O', '\u{0303}', 'Õ'), ('O', '\u{0323}', 'Ọ'),
    ('Ô', '\u{0300}', 'Ồ'), ('Ô', '\u{0301}', 'Ố'), ('Ô', '\u{0309}', 'Ổ'),
    ('Ô', '\u{0303}', 'Ỗ'), ('Ô', '\u{0323}', 'Ộ'),
    ('Ơ', '\u{0300}', 'Ờ'), ('Ơ', '\u{0301}', 'Ớ'), ('Ơ', '\u{0309}', 'Ở'),
    ('Ơ', '\u{0303}', 'Ỡ'), ('Ơ', '\u{0323}', 'Ợ'),
    ('U', '\u{0300}', 'Ù'), ('U', '\u{0301}', 'Ú'), ('U', '\u{0309}', 'Ủ'),
    ('U', '\u{0303}', 'Ũ'), ('U', '\u{0323}', 'Ụ'),
    ('Ư', '\u{0300}', 'Ừ'), ('Ư', '\u{0301}', 'Ứ'), ('Ư', '\u{0309}', 'Ử'),
    ('Ư', '\u{0303}', 'Ữ'), ('Ư', '\u{0323}', 'Ự'),
    ('Y', '\u{0300}', 'Ỳ'), ('Y', '\u{0301}', 'Ý'), ('Y', '\u{0309}', 'Ỷ'),
    ('Y', '\u{0303}', 'Ỹ'), ('Y', '\u{0323}', 'Ỵ'),
    ('a', '\u{0302}', 'â'), ('a', '\u{0306}', 'ă'), ('e', '\u{0302}', 'ê'),
    ('o', '\u{0302}', 'ô'), ('o', '\u{031B}', 'ơ'), ('u', '\u{031B}', 'ư'),
    ('A', '\u{0302}', 'Â'), ('A', '\u{0306}', 'Ă'), ('E', '\u{0302}', 'Ê'),
    ('O', '\u{0302}', 'Ô'), ('O', '\u{031B}', 'Ơ'), ('U', '\u{031B}', 'Ư'),
    ('ạ', '\u{0302}', 'ậ'), ('ạ', '\u{0306}', 'ặ'), ('ẹ', '\u{0302}', 'ệ'),
    ('ọ', '\u{0302}', 'ộ'), ('Ạ', '\u{0302}', 'Ậ'), ('Ạ', '\u{0306}', 'Ặ'),
    ('Ẹ', '\u{0302}', 'Ệ'), ('Ọ', '\u{0302}', 'Ộ'),
];

static FOLD_TABLE: Lazy<FxHashMap<(char, char), char>> = Lazy::new(|| {
    LEGACY_DIACRITICS
        .iter()
        .map(|&(base, mark, composed)| ((base, mark), composed))
        .collect()
});

fn is_foldable_mark(ch: char) -> bool {
    matches!(
        ch,
        '\u{0300}' | '\u{0301}' | '\u{0302}' | '\u{0303}' | '\u{0306}' | '\u{0309}' | '\u{031B}'
            | '\u{0323}'
    )
}

/// Folds legacy decomposed Vietnamese vowels into precomposed code points.
///
/// Pure and idempotent: a string without foldable sequences is returned
/// borrowed, and a folded string never contains a pair the table knows.
///
/// ```rust
/// use canonical::normalize_diacritics;
///
/// assert_eq!(normalize_diacritics("a\u{0300}o"), "ào");
/// assert_eq!(normalize_diacritics("a\u{0302}\u{0301}"), "ấ");
/// assert_eq!(normalize_diacritics("áo thun"), "áo thun");
/// ```
pub fn normalize_diacritics(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_foldable_mark) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut pending: Option<char> = None;

    for ch in text.chars() {
        if let Some(base) = pending {
            if let Some(&composed) = FOLD_TABLE.get(&(base, ch)) {
                // Keep the composed char pending: a tone mark may follow a modifier.
                pending = Some(composed);
                continue;
            }
            out.push(base);
        }
        pending = Some(ch);
    }
    if let Some(last) = pending {
        out.push(last);
    }

    Cow::Owned(out)
}
