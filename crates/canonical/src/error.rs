use thiserror::Error;

/// Errors that can occur while configuring the preprocessing pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to load stopwords from {path}: {message}")]
    StopwordLoad { path: String, message: String },
    #[error("failed to load segmenter lexicon from {path}: {message}")]
    LexiconLoad { path: String, message: String },
}

/// Failure reported by a [`WordSegmenter`](crate::WordSegmenter).
///
/// The pipeline never propagates this; it logs it and keeps the sentence
/// unsegmented.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SegmentError {
    #[error("segmenter unavailable: {0}")]
    Unavailable(String),
    #[error("segmenter rejected input: {0}")]
    Rejected(String),
}
