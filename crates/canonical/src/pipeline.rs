use std::fmt;
use std::sync::Arc;

use crate::config::PreprocessConfig;
use crate::document::ProcessedDescription;
use crate::error::CanonicalError;
use crate::lexical::clean_lexical;
use crate::negation::compound_negations;
use crate::segment::{segment_sentences, WhitespaceSegmenter, WordSegmenter};
use crate::stopwords::StopwordSet;
use crate::unicode::normalize_diacritics;
use crate::whitespace::collapse_whitespace;

/// Preprocessing context: config, stopword list and word segmenter.
///
/// Built once at startup and shared read-only (it is `Send + Sync`), so every
/// request runs the same stages against the same tables.
#[derive(Clone)]
pub struct Preprocessor {
    config: PreprocessConfig,
    stopwords: StopwordSet,
    segmenter: Arc<dyn WordSegmenter>,
}

impl fmt::Debug for Preprocessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preprocessor")
            .field("config", &self.config)
            .field("stopwords", &self.stopwords.len())
            .field("segmenter", &self.segmenter.name())
            .finish()
    }
}

impl Preprocessor {
    /// Construct a preprocessor from explicit parts.
    pub fn new(
        config: PreprocessConfig,
        stopwords: StopwordSet,
        segmenter: Arc<dyn WordSegmenter>,
    ) -> Result<Self, CanonicalError> {
        config.validate()?;
        Ok(Self {
            config,
            stopwords,
            segmenter,
        })
    }

    /// Default config and the identity segmenter.
    pub fn with_stopwords(stopwords: StopwordSet) -> Self {
        Self {
            config: PreprocessConfig::default(),
            stopwords,
            segmenter: Arc::new(WhitespaceSegmenter),
        }
    }

    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    pub fn segmenter_name(&self) -> &str {
        self.segmenter.name()
    }

    /// Runs every stage over a raw description.
    ///
    /// Stages, each consuming the previous output in full:
    /// 1. lexical cleanup
    /// 2. legacy diacritic folding (swapped with 1 under `normalize_first`)
    /// 3. word segmentation, falling back per sentence on failure
    /// 4. negation compounding
    /// 5. stopword removal
    pub fn preprocess(&self, raw: &str) -> ProcessedDescription {
        let normalized: String = if self.config.normalize_first {
            let folded = normalize_diacritics(raw);
            clean_lexical(&folded, &self.config)
        } else {
            let cleaned = clean_lexical(raw, &self.config);
            normalize_diacritics(&cleaned).into_owned()
        };

        let segmented = segment_sentences(&normalized, self.segmenter.as_ref());
        let compounded = compound_negations(&segmented.text, &self.config.negation_particles);
        let text = collapse_whitespace(&self.stopwords.remove(&compounded));

        tracing::trace!(
            raw_len = raw.len(),
            tokens = text.split_whitespace().count(),
            fallbacks = segmented.fallbacks,
            "preprocessed description"
        );

        ProcessedDescription::new(text, self.config.version, segmented.fallbacks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SegmentError;
    use crate::segment::DictionarySegmenter;

    struct BrokenSegmenter;

    impl WordSegmenter for BrokenSegmenter {
        fn segment(&self, _sentence: &str) -> Result<String, SegmentError> {
            Err(SegmentError::Rejected("boom".into()))
        }
    }

    fn stopwords() -> StopwordSet {
        StopwordSet::from_lines(["và", "của", "rất", "cho"], false)
    }

    fn preprocessor(segmenter: Arc<dyn WordSegmenter>) -> Preprocessor {
        Preprocessor::new(PreprocessConfig::default(), stopwords(), segmenter)
            .expect("valid config")
    }

    #[test]
    fn full_pipeline_with_dictionary_segmenter() {
        let seg = DictionarySegmenter::from_entries(["áo thun", "thoáng mát"]);
        let pre = preprocessor(Arc::new(seg));
        let doc = pre.preprocess("Áo thun nam 100% cotton, rất thoáng mát và không nhăn!");
        assert_eq!(doc.text, "áo_thun nam cotton thoáng_mát không_nhăn");
        assert!(!doc.used_fallback());
    }

    #[test]
    fn processed_output_reprocesses_to_itself() {
        let seg = DictionarySegmenter::from_entries(["áo thun", "thoáng mát"]);
        let pre = preprocessor(Arc::new(seg));
        let once = pre.preprocess("Áo thun nam, rất thoáng mát và không nhăn!");
        assert_eq!(once.text, "áo_thun nam thoáng_mát không_nhăn");
        assert_eq!(pre.preprocess(&once.text), once);
    }

    #[test]
    fn negated_word_survives_stopword_removal() {
        let stopwords = StopwordSet::from_lines(["không", "thích"], false);
        let pre = Preprocessor::with_stopwords(stopwords);
        assert_eq!(pre.preprocess("không thích").text, "không_thích");
        assert_eq!(pre.preprocess("thích").text, "");
    }

    #[test]
    fn segmenter_failure_degrades_to_unsegmented_text() {
        let pre = preprocessor(Arc::new(BrokenSegmenter));
        let doc = pre.preprocess("Áo thun đẹp. Giao hàng nhanh!");
        assert_eq!(doc.text, "áo thun đẹp giao hàng nhanh");
        assert!(doc.used_fallback());
    }

    #[test]
    fn digits_only_yield_empty_description() {
        let pre = preprocessor(Arc::new(WhitespaceSegmenter));
        let doc = pre.preprocess("123 456");
        assert!(doc.is_empty());
        assert_eq!(doc.text, "");
    }

    #[test]
    fn default_order_drops_decomposed_words() {
        let pre = preprocessor(Arc::new(WhitespaceSegmenter));
        // combining marks are word characters outside the letter class
        assert_eq!(pre.preprocess("a\u{0301}o thun").text, "thun");
    }

    #[test]
    fn normalize_first_keeps_decomposed_words() {
        let cfg = PreprocessConfig {
            normalize_first: true,
            ..Default::default()
        };
        let pre = Preprocessor::new(cfg, stopwords(), Arc::new(WhitespaceSegmenter))
            .expect("valid config");
        assert_eq!(pre.preprocess("a\u{0301}o thun").text, "áo thun");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = PreprocessConfig {
            version: 0,
            ..Default::default()
        };
        let err = Preprocessor::new(cfg, stopwords(), Arc::new(WhitespaceSegmenter))
            .expect_err("version 0 rejected");
        assert!(matches!(err, CanonicalError::InvalidConfig(_)));
    }

    #[test]
    fn preprocessing_is_deterministic() {
        let pre = preprocessor(Arc::new(WhitespaceSegmenter));
        let input = "Quần jean nam ống đứng, co giãn tốt và bền màu";
        assert_eq!(pre.preprocess(input), pre.preprocess(input));
    }
}
