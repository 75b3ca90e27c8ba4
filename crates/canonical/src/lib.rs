//! Vietnamese product-description preprocessing.
//!
//! This crate turns raw, noisy product descriptions into the token sequence
//! the term dictionary was built from. Queries and catalog descriptions must
//! go through the same stages, in the same order, or their vectors will not
//! line up.
//!
//! ## Stages
//!
//! 1. Lexical cleanup ([`clean_lexical`]): lower-casing, sentence splitting,
//!    Vietnamese-alphabet word extraction, digit/symbol/unit removal.
//! 2. Legacy diacritic folding ([`normalize_diacritics`]): decomposed
//!    vowel + combining mark sequences become precomposed code points.
//! 3. Word segmentation ([`WordSegmenter`], [`segment_sentences`]):
//!    multi-syllable words are joined with `_`. A failing segmenter is
//!    logged and the sentence is kept unsegmented.
//! 4. Negation compounding ([`compound_negations`]) and stopword removal
//!    ([`StopwordSet::remove`]).
//!
//! [`Preprocessor`] bundles the config, stopword list and segmenter and runs
//! all stages.
//!
//! ## Determinism
//!
//! No clock, locale or network access. Output depends only on the input text,
//! the config, the stopword list and the segmenter.

mod config;
mod document;
mod error;
mod lexical;
mod negation;
mod pipeline;
mod segment;
mod stopwords;
mod unicode;
mod whitespace;

pub use crate::config::PreprocessConfig;
pub use crate::document::ProcessedDescription;
pub use crate::error::{CanonicalError, SegmentError};
pub use crate::lexical::{clean_lexical, SENTENCE_SEPARATOR};
pub use crate::negation::compound_negations;
pub use crate::pipeline::Preprocessor;
pub use crate::segment::{
    segment_sentences, DictionarySegmenter, SegmentedText, WhitespaceSegmenter, WordSegmenter,
    COMPOUND_JOINER,
};
pub use crate::stopwords::StopwordSet;
pub use crate::unicode::normalize_diacritics;
pub use crate::whitespace::collapse_whitespace;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn sample_preprocessor() -> Preprocessor {
        let stopwords = StopwordSet::from_lines(["và", "cho", "của", "rất", "nhé"], false);
        let segmenter = DictionarySegmenter::from_entries(["áo sơ mi", "thời trang", "công sở"]);
        Preprocessor::new(PreprocessConfig::default(), stopwords, Arc::new(segmenter))
            .expect("valid config")
    }

    #[test]
    fn catalog_description_end_to_end() {
        let pre = sample_preprocessor();
        let doc = pre.preprocess(
            "ÁO SƠ MI NAM công sở - Thời trang 2023, size M/L/XL. Chất vải rất mát, không nhăn nhé!!",
        );
        // the unit "m" goes, "l" and "xl" stay
        assert_eq!(
            doc.text,
            "áo_sơ_mi nam công_sở thời_trang size l xl chất vải mát không_nhăn"
        );
    }

    #[test]
    fn stage_functions_compose_like_the_preprocessor() {
        let pre = sample_preprocessor();
        let raw = "Áo sơ mi công sở, không nhăn và thoáng";
        let cfg = pre.config();

        let cleaned = clean_lexical(raw, cfg);
        let folded = normalize_diacritics(&cleaned);
        let segmented = segment_sentences(
            &folded,
            &DictionarySegmenter::from_entries(["áo sơ mi", "thời trang", "công sở"]),
        );
        let compounded = compound_negations(&segmented.text, &cfg.negation_particles);
        let manual = collapse_whitespace(&pre.stopwords().remove(&compounded));

        assert_eq!(manual, pre.preprocess(raw).text);
        assert_eq!(manual, "áo_sơ_mi công_sở không_nhăn thoáng");
    }

    #[test]
    fn legacy_encoded_description_matches_after_folding() {
        let cfg = PreprocessConfig {
            normalize_first: true,
            ..Default::default()
        };
        let pre = Preprocessor::new(
            cfg,
            StopwordSet::default(),
            Arc::new(WhitespaceSegmenter),
        )
        .expect("valid config");
        let composed = pre.preprocess("Quần short thể thao");
        let legacy = pre.preprocess("Qua\u{0302}\u{0300}n short the\u{0302}\u{0309} thao");
        assert_eq!(composed.text, legacy.text);
    }
}
