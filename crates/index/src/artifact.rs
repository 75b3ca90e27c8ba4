//! Artifact files and the bundle used at query time.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::dictionary::Dictionary;
use crate::query::{top_similar, SimilarityHit};
use crate::similarity::SimilarityIndex;
use crate::tfidf::{SparseVector, TfidfModel};
use crate::{CompressionConfig, IndexError};

/// Bump this value whenever the on-disk layout of any artifact changes.
pub const ARTIFACT_SCHEMA_VERSION: u16 = 1;

/// What an artifact file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtifactKind {
    Dictionary,
    Tfidf,
    Similarity,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactKind::Dictionary => "dictionary",
            ArtifactKind::Tfidf => "tfidf",
            ArtifactKind::Similarity => "similarity",
        };
        f.write_str(name)
    }
}

/// A value that can be stored as an artifact file.
pub trait Artifact: Serialize + DeserializeOwned {
    const KIND: ArtifactKind;
}

impl Artifact for Dictionary {
    const KIND: ArtifactKind = ArtifactKind::Dictionary;
}

impl Artifact for TfidfModel {
    const KIND: ArtifactKind = ArtifactKind::Tfidf;
}

impl Artifact for SimilarityIndex {
    const KIND: ArtifactKind = ArtifactKind::Similarity;
}

#[derive(Debug, Serialize, Deserialize)]
struct ArtifactHeader {
    schema_version: u16,
    kind: ArtifactKind,
}

/// Encodes header + payload, then compresses the whole buffer.
pub fn encode_artifact<T: Artifact>(
    value: &T,
    compression: &CompressionConfig,
) -> Result<Vec<u8>, IndexError> {
    let header = ArtifactHeader {
        schema_version: ARTIFACT_SCHEMA_VERSION,
        kind: T::KIND,
    };
    let mut buf = encode_to_vec(&header, standard())?;
    buf.extend(encode_to_vec(value, standard())?);
    compression.compress(&buf)
}

/// Decompresses and decodes an artifact, checking the header first.
pub fn decode_artifact<T: Artifact>(
    bytes: &[u8],
    compression: &CompressionConfig,
) -> Result<T, IndexError> {
    let data = compression.decompress(bytes)?;
    let (header, read): (ArtifactHeader, usize) = decode_from_slice(&data, standard())?;
    if header.schema_version != ARTIFACT_SCHEMA_VERSION {
        return Err(IndexError::SchemaMismatch {
            expected: ARTIFACT_SCHEMA_VERSION,
            found: header.schema_version,
        });
    }
    if header.kind != T::KIND {
        return Err(IndexError::WrongArtifact {
            expected: T::KIND,
            found: header.kind,
        });
    }
    let (value, _) = decode_from_slice(&data[read..], standard())?;
    Ok(value)
}

pub fn write_artifact<T: Artifact>(
    path: &Path,
    value: &T,
    compression: &CompressionConfig,
) -> Result<(), IndexError> {
    let bytes = encode_artifact(value, compression)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| IndexError::io(parent, err))?;
    }
    fs::write(path, bytes).map_err(|err| IndexError::io(path, err))
}

pub fn read_artifact<T: Artifact>(
    path: &Path,
    compression: &CompressionConfig,
) -> Result<T, IndexError> {
    let bytes = fs::read(path).map_err(|err| IndexError::io(path, err))?;
    let value = decode_artifact(&bytes, compression)?;
    log::debug!("read {} artifact from {}", T::KIND, path.display());
    Ok(value)
}

/// Locations of the three content-similarity artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    pub dictionary: PathBuf,
    pub tfidf: PathBuf,
    pub index: PathBuf,
}

impl ArtifactPaths {
    /// Conventional file names inside one directory.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            dictionary: dir.join("dictionary.bin"),
            tfidf: dir.join("tfidf.bin"),
            index: dir.join("similarity.bin"),
        }
    }
}

/// Dictionary, TF-IDF model and similarity index for one catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentArtifacts {
    dictionary: Dictionary,
    tfidf: TfidfModel,
    index: SimilarityIndex,
}

impl ContentArtifacts {
    /// Bundles pre-built parts after checking they agree on the term space.
    pub fn new(
        dictionary: Dictionary,
        tfidf: TfidfModel,
        index: SimilarityIndex,
    ) -> Result<Self, IndexError> {
        let features = index.num_features() as usize;
        if tfidf.num_features() > features {
            return Err(IndexError::Inconsistent(format!(
                "tfidf model has {} terms but the index only {features}",
                tfidf.num_features()
            )));
        }
        if dictionary.len() > features {
            return Err(IndexError::Inconsistent(format!(
                "dictionary has {} terms but the index only {features}",
                dictionary.len()
            )));
        }
        Ok(Self {
            dictionary,
            tfidf,
            index,
        })
    }

    /// Builds all three parts from processed descriptions, one document per
    /// item, tokens separated by whitespace. Document `i` of the index is
    /// item `i` of `texts`.
    pub fn from_corpus<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let documents: Vec<Vec<String>> = texts
            .into_iter()
            .map(|text| text.as_ref().split_whitespace().map(str::to_string).collect())
            .collect();

        let mut dictionary = Dictionary::new();
        for doc in &documents {
            dictionary.add_document(doc.as_slice());
        }
        let tfidf = TfidfModel::from_dictionary(&dictionary);
        let vectors: Vec<SparseVector> = documents
            .iter()
            .map(|doc| tfidf.transform(&dictionary.doc2bow(doc.as_slice())))
            .collect();
        let index = SimilarityIndex::from_vectors(dictionary.len() as u32, vectors);

        log::info!(
            "built content artifacts: {} documents, {} terms",
            index.len(),
            dictionary.len()
        );

        Self {
            dictionary,
            tfidf,
            index,
        }
    }

    pub fn load(
        paths: &ArtifactPaths,
        compression: &CompressionConfig,
    ) -> Result<Self, IndexError> {
        let dictionary: Dictionary = read_artifact(&paths.dictionary, compression)?;
        let tfidf: TfidfModel = read_artifact(&paths.tfidf, compression)?;
        let index: SimilarityIndex = read_artifact(&paths.index, compression)?;
        let artifacts = Self::new(dictionary, tfidf, index)?;
        log::info!(
            "loaded content artifacts: {} documents, {} terms",
            artifacts.num_documents(),
            artifacts.dictionary.len()
        );
        Ok(artifacts)
    }

    pub fn save(
        &self,
        paths: &ArtifactPaths,
        compression: &CompressionConfig,
    ) -> Result<(), IndexError> {
        write_artifact(&paths.dictionary, &self.dictionary, compression)?;
        write_artifact(&paths.tfidf, &self.tfidf, compression)?;
        write_artifact(&paths.index, &self.index, compression)?;
        Ok(())
    }

    /// TF-IDF vector of a tokenized query.
    pub fn query_vector<S: AsRef<str>>(&self, tokens: &[S]) -> SparseVector {
        self.tfidf.transform(&self.dictionary.doc2bow(tokens))
    }

    /// Ranks indexed documents against a tokenized query.
    ///
    /// A query with no known token, or whose known tokens all carry zero
    /// weight, matches nothing regardless of the threshold.
    pub fn similar<S: AsRef<str>>(
        &self,
        tokens: &[S],
        threshold: f32,
        count: usize,
    ) -> Vec<SimilarityHit> {
        let bow = self.dictionary.doc2bow(tokens);
        if bow.is_empty() {
            log::debug!("query has no known terms");
            return Vec::new();
        }
        let vector = self.tfidf.transform(&bow);
        if vector.is_empty() {
            log::debug!("query vector is empty after weighting");
            return Vec::new();
        }
        top_similar(&self.index.scores(&vector), threshold, count)
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn tfidf(&self) -> &TfidfModel {
        &self.tfidf
    }

    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    /// Number of indexed documents.
    pub fn num_documents(&self) -> usize {
        self.index.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CompressionCodec;

    fn corpus() -> ContentArtifacts {
        ContentArtifacts::from_corpus([
            "áo_thun nam cotton thoáng_mát",
            "quần jean nam co_giãn",
            "áo sơ_mi nữ công_sở",
            "váy hoa nữ dự_tiệc",
            "",
        ])
    }

    #[test]
    fn identical_document_ranks_first() {
        let artifacts = corpus();
        let hits = artifacts.similar(&["quần", "jean", "nam", "co_giãn"], 0.4, 5);
        assert_eq!(hits[0].doc, 1);
        assert!((hits[0].score - 1.0).abs() < 1e-5);
        assert!(hits.iter().all(|h| h.score >= 0.4));
    }

    #[test]
    fn unknown_terms_match_nothing() {
        let artifacts = corpus();
        assert!(artifacts.similar(&["giày", "da"], 0.0, 5).is_empty());
        assert!(artifacts.similar::<&str>(&[], 0.0, 5).is_empty());
    }

    #[test]
    fn empty_documents_keep_their_row() {
        let artifacts = corpus();
        assert_eq!(artifacts.num_documents(), 5);
        assert_eq!(artifacts.index().row(4), Some(&[][..]));
    }

    #[test]
    fn save_and_load_preserve_lookups() {
        let dir = tempfile::tempdir().expect("temp dir");
        let paths = ArtifactPaths::in_dir(dir.path().join("artifacts"));
        let artifacts = corpus();

        for codec in [CompressionCodec::Zstd, CompressionCodec::None] {
            let compression = CompressionConfig::default().with_codec(codec);
            artifacts.save(&paths, &compression).expect("save");
            let loaded = ContentArtifacts::load(&paths, &compression).expect("load");
            assert_eq!(loaded, artifacts);
            assert_eq!(
                loaded.similar(&["áo", "nữ"], 0.1, 3),
                artifacts.similar(&["áo", "nữ"], 0.1, 3)
            );
        }
    }

    #[test]
    fn reading_the_wrong_kind_fails() {
        let compression = CompressionConfig::default();
        let bytes = encode_artifact(corpus().dictionary(), &compression).expect("encode");
        let err = decode_artifact::<TfidfModel>(&bytes, &compression).unwrap_err();
        assert_eq!(
            err,
            IndexError::WrongArtifact {
                expected: ArtifactKind::Tfidf,
                found: ArtifactKind::Dictionary,
            }
        );
    }

    #[test]
    fn future_schema_version_is_rejected() {
        let compression = CompressionConfig::default().with_codec(CompressionCodec::None);
        let header = ArtifactHeader {
            schema_version: ARTIFACT_SCHEMA_VERSION + 1,
            kind: ArtifactKind::Tfidf,
        };
        let mut bytes = encode_to_vec(&header, standard()).expect("encode header");
        bytes.extend(encode_to_vec(corpus().tfidf(), standard()).expect("encode payload"));

        let err = decode_artifact::<TfidfModel>(&bytes, &compression).unwrap_err();
        assert!(matches!(
            err,
            IndexError::SchemaMismatch { found, .. } if found == ARTIFACT_SCHEMA_VERSION + 1
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let paths = ArtifactPaths::in_dir("/nonexistent/artifacts");
        let err = ContentArtifacts::load(&paths, &CompressionConfig::default()).unwrap_err();
        match err {
            IndexError::Io { path, .. } => assert!(path.ends_with("dictionary.bin")),
            other => panic!("expected I/O error, got {other:?}"),
        }
    }

    #[test]
    fn oversized_dictionary_is_inconsistent() {
        let artifacts = corpus();
        let small = SimilarityIndex::from_vectors(1, Vec::new());
        let err = ContentArtifacts::new(
            artifacts.dictionary().clone(),
            TfidfModel::default(),
            small,
        )
        .unwrap_err();
        assert!(matches!(err, IndexError::Inconsistent(_)));
    }
}
