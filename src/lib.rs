//! Workspace umbrella crate for the ShopRec fashion catalog recommender.
//!
//! This crate stitches preprocessing (`canonical`), the similarity artifacts
//! (`index`), the lookup tables (`ingest`) and the lookup layer (`matcher`)
//! together behind a YAML [`AppConfig`], so binaries can go from a config
//! file to a ready [`Recommender`] with one call.
//!
//! ```no_run
//! use shoprec::{load_recommender, AppConfig};
//!
//! let config = AppConfig::from_file("shoprec.yaml")?;
//! let recommender = load_recommender(&config)?;
//! let result = recommender.recommend_products("101", 5, 0.4)?;
//! for hit in &result.matches {
//!     println!("{} {:.3}", hit.product_id, hit.score);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;

pub use canonical::{
    CanonicalError, DictionarySegmenter, PreprocessConfig, Preprocessor, ProcessedDescription,
    StopwordSet, WhitespaceSegmenter, WordSegmenter,
};
pub use config::{AppConfig, ArtifactsYamlConfig, ConfigLoadError, SegmenterYamlConfig};
pub use index::{ContentArtifacts, IndexError};
pub use ingest::{Catalog, IngestError, Tables};
pub use matcher::{MatchConfig, MatchError, Recommender};

use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Errors that can occur while assembling the recommender at startup.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    Canonical(CanonicalError),
    Index(IndexError),
    Ingest(IngestError),
    Match(MatchError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Canonical(err) => write!(f, "preprocessing setup failed: {err}"),
            PipelineError::Index(err) => write!(f, "similarity artifacts unusable: {err}"),
            PipelineError::Ingest(err) => write!(f, "table load failed: {err}"),
            PipelineError::Match(err) => write!(f, "recommender setup failed: {err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Canonical(err) => Some(err),
            PipelineError::Index(err) => Some(err),
            PipelineError::Ingest(err) => Some(err),
            PipelineError::Match(err) => Some(err),
        }
    }
}

impl From<CanonicalError> for PipelineError {
    fn from(value: CanonicalError) -> Self {
        PipelineError::Canonical(value)
    }
}

impl From<IndexError> for PipelineError {
    fn from(value: IndexError) -> Self {
        PipelineError::Index(value)
    }
}

impl From<IngestError> for PipelineError {
    fn from(value: IngestError) -> Self {
        PipelineError::Ingest(value)
    }
}

impl From<MatchError> for PipelineError {
    fn from(value: MatchError) -> Self {
        PipelineError::Match(value)
    }
}

/// Build the preprocessing context: stopword list plus the dictionary
/// segmenter when a lexicon is configured, the identity segmenter otherwise.
pub fn build_preprocessor(config: &AppConfig) -> Result<Preprocessor, PipelineError> {
    let normalize = config.preprocess.normalize_stopword_entries;
    let stopwords = match &config.segmenter.stopwords {
        Some(path) => StopwordSet::from_path(path, normalize)?,
        None => StopwordSet::default(),
    };
    let segmenter: Arc<dyn WordSegmenter> = match &config.segmenter.lexicon {
        Some(path) => Arc::new(DictionarySegmenter::from_path(path)?),
        None => Arc::new(WhitespaceSegmenter),
    };
    Ok(Preprocessor::new(
        config.preprocess.clone(),
        stopwords,
        segmenter,
    )?)
}

/// Load every artifact and table named by `config` into a [`Recommender`].
///
/// Fails if any file is missing or malformed, if the artifacts were written
/// under another schema version, or if the similarity index and the catalog
/// disagree on the number of products.
pub fn load_recommender(config: &AppConfig) -> Result<Recommender, PipelineError> {
    let start = Instant::now();
    let preprocessor = build_preprocessor(config)?;
    let artifacts =
        ContentArtifacts::load(&config.artifacts.paths(), &config.artifacts.compression)?;
    let tables = Tables::load(&config.tables)?;
    let recommender = Recommender::new(preprocessor, artifacts, tables, config.defaults.clone())?;

    tracing::info!(
        products = recommender.tables().catalog.len(),
        terms = recommender.artifacts().dictionary().len(),
        segmenter = recommender.preprocessor().segmenter_name(),
        elapsed_micros = start.elapsed().as_micros(),
        "recommender_loaded"
    );
    Ok(recommender)
}

/// Build the similarity artifacts offline from the catalog's processed
/// descriptions and write them where `config` expects them.
///
/// Document `i` of the index is row `i` of the catalog, which is the
/// alignment [`load_recommender`] checks.
pub fn build_artifacts(config: &AppConfig) -> Result<ContentArtifacts, PipelineError> {
    let start = Instant::now();
    let catalog = Catalog::from_path(&config.tables.catalog, config.tables.delimiter_byte()?)?;
    let artifacts = ContentArtifacts::from_corpus(catalog.processed_descriptions());
    artifacts.save(&config.artifacts.paths(), &config.artifacts.compression)?;

    tracing::info!(
        documents = artifacts.num_documents(),
        terms = artifacts.dictionary().len(),
        elapsed_micros = start.elapsed().as_micros(),
        "artifacts_built"
    );
    Ok(artifacts)
}
