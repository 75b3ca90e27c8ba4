//! # ShopRec Index
//!
//! Content-similarity machinery for the recommendation engine: a term
//! dictionary, a TF-IDF model and a sparse similarity index over the catalog,
//! plus the codec that stores them as versioned artifact files.
//!
//! ## Lookup path
//!
//! A query (already preprocessed into tokens) flows through three stages:
//!
//! 1. [`Dictionary::doc2bow`] maps tokens to `(term id, count)` pairs,
//!    ignoring tokens the dictionary has never seen.
//! 2. [`TfidfModel::transform`] weighs each count by `log2(N / df)` and
//!    L2-normalizes the result.
//! 3. [`SimilarityIndex::scores`] returns the cosine similarity of the query
//!    against every indexed document, in document order.
//!
//! [`top_similar`] then ranks the scores. [`ContentArtifacts`] bundles the
//! three pieces and runs the whole path in [`ContentArtifacts::similar`].
//!
//! ## Artifacts
//!
//! Each piece is written to its own file: a small header (schema version and
//! artifact kind) followed by the bincode payload, optionally compressed with
//! Zstd as configured by [`CompressionConfig`]. Readers reject files whose
//! schema version differs from [`ARTIFACT_SCHEMA_VERSION`].
//!
//! ## Example
//!
//! ```
//! use index::ContentArtifacts;
//!
//! let artifacts = ContentArtifacts::from_corpus([
//!     "áo thun nam",
//!     "quần jean nam",
//!     "váy hoa nữ",
//! ]);
//!
//! let hits = artifacts.similar(&["áo", "thun"], 0.4, 5);
//! assert_eq!(hits[0].doc, 0);
//! ```

mod artifact;
mod dictionary;
mod query;
mod similarity;
mod tfidf;

pub use artifact::{
    decode_artifact, encode_artifact, read_artifact, write_artifact, Artifact, ArtifactKind,
    ArtifactPaths, ContentArtifacts, ARTIFACT_SCHEMA_VERSION,
};
pub use dictionary::{BagOfWords, Dictionary};
pub use query::{top_similar, SimilarityHit};
pub use similarity::SimilarityIndex;
pub use tfidf::{l2_normalize, sparse_dot, SparseVector, TfidfModel};

use bincode::error::{DecodeError, EncodeError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zstd::{decode_all, encode_all};

/// Compression codec options for artifact files.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionCodec {
    /// No compression (useful for debugging or when storage is not a concern).
    None,
    /// Zstd compression (default, good balance of speed and ratio).
    #[default]
    Zstd,
}

/// Compression behavior configuration.
///
/// Readers must use the codec the writer used; the codec is not recorded in
/// the file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// The compression codec to use (None or Zstd).
    pub codec: CompressionCodec,
    /// Compression level (1-22 for Zstd, where higher = better compression but slower).
    pub level: i32,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            codec: CompressionCodec::default(),
            level: 3,
        }
    }
}

impl CompressionConfig {
    pub fn new(codec: CompressionCodec, level: i32) -> Self {
        Self { codec, level }
    }

    pub fn with_codec(mut self, codec: CompressionCodec) -> Self {
        self.codec = codec;
        self
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, IndexError> {
        match self.codec {
            CompressionCodec::None => Ok(data.to_vec()),
            CompressionCodec::Zstd => Ok(encode_all(data, self.level)?),
        }
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, IndexError> {
        match self.codec {
            CompressionCodec::None => Ok(data.to_vec()),
            CompressionCodec::Zstd => Ok(decode_all(data)?),
        }
    }
}

/// Errors raised while building, reading or writing index artifacts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("Serialization encode error: {0}")]
    Encode(String),
    #[error("Serialization decode error: {0}")]
    Decode(String),
    #[error("Compression error: {0}")]
    Compression(String),
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },
    #[error("artifact schema version {found} is not supported (expected {expected})")]
    SchemaMismatch { expected: u16, found: u16 },
    #[error("expected a {expected} artifact, found {found}")]
    WrongArtifact {
        expected: ArtifactKind,
        found: ArtifactKind,
    },
    #[error("inconsistent artifacts: {0}")]
    Inconsistent(String),
}

impl From<EncodeError> for IndexError {
    fn from(e: EncodeError) -> Self {
        IndexError::Encode(e.to_string())
    }
}

impl From<DecodeError> for IndexError {
    fn from(e: DecodeError) -> Self {
        IndexError::Decode(e.to_string())
    }
}

impl From<std::io::Error> for IndexError {
    fn from(e: std::io::Error) -> Self {
        IndexError::Compression(e.to_string())
    }
}

impl IndexError {
    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compression_roundtrip_for_each_codec() {
        let data = "áo thun nam ".repeat(64).into_bytes();
        for codec in [CompressionCodec::None, CompressionCodec::Zstd] {
            let cfg = CompressionConfig::default().with_codec(codec);
            let packed = cfg.compress(&data).expect("compress");
            assert_eq!(cfg.decompress(&packed).expect("decompress"), data);
        }
    }

    #[test]
    fn zstd_rejects_garbage() {
        let cfg = CompressionConfig::default();
        let err = cfg.decompress(b"not zstd").unwrap_err();
        assert!(matches!(err, IndexError::Compression(_)));
    }
}
