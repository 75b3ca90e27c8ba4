//! YAML configuration for the ShopRec recommender.
//!
//! One file describes everything [`crate::load_recommender`] needs: the
//! preprocessing tables, where the similarity artifacts and lookup tables
//! live, and the default lookup limits. Relative paths in a file loaded with
//! [`AppConfig::from_file`] resolve against the file's directory.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! # ShopRec configuration
//! version: "1.0"
//!
//! preprocess:
//!   version: 1
//!   negation_particles: ["không", "chẳng", "chả"]
//!   unit_tokens: ["g", "kg", "ml", "cm", "dm", "m"]
//!   normalize_first: false
//!   normalize_stopword_entries: false
//!
//! segmenter:
//!   stopwords: "data/vietnamese-stopwords.txt"
//!   lexicon: "data/compounds.txt"
//!
//! artifacts:
//!   dictionary: "artifacts/dictionary.bin"
//!   tfidf: "artifacts/tfidf.bin"
//!   index: "artifacts/similarity.bin"
//!   compression:
//!     codec: "zstd"
//!     level: 3
//!
//! tables:
//!   catalog: "data/catalog.csv"
//!   user_recommendations: "data/user_recs.csv"
//!   item_recommendations: "data/item_recs.csv"
//!   rating_history: "data/ratings.tsv"
//!
//! defaults:
//!   similarity_threshold: 0.4
//!   content_results: 5
//!   rating_threshold: 3.0
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use canonical::PreprocessConfig;
use index::{ArtifactPaths, CompressionConfig};
use ingest::TableConfig;
use matcher::MatchConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration for the recommender
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Preprocessing pipeline settings
    #[serde(default)]
    pub preprocess: PreprocessConfig,

    /// Stopword list and compound-word lexicon
    #[serde(default)]
    pub segmenter: SegmenterYamlConfig,

    /// Similarity artifact files
    #[serde(default)]
    pub artifacts: ArtifactsYamlConfig,

    /// Catalog and rating tables
    #[serde(default = "default_tables")]
    pub tables: TableConfig,

    /// Default lookup limits and thresholds
    #[serde(default)]
    pub defaults: MatchConfig,
}

impl AppConfig {
    /// Load a YAML configuration file, resolving relative paths against the
    /// file's directory
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.with_base_dir(base))
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: AppConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve every relative path against `base`
    pub fn with_base_dir(mut self, base: &Path) -> Self {
        self.segmenter.stopwords = self.segmenter.stopwords.map(|p| resolve(base, p));
        self.segmenter.lexicon = self.segmenter.lexicon.map(|p| resolve(base, p));
        self.artifacts.dictionary = resolve(base, self.artifacts.dictionary);
        self.artifacts.tfidf = resolve(base, self.artifacts.tfidf);
        self.artifacts.index = resolve(base, self.artifacts.index);
        self.tables = self.tables.with_base_dir(base);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.preprocess
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("preprocess: {e}")))?;
        self.artifacts.validate()?;
        self.tables
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("tables: {e}")))?;
        self.defaults
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("defaults: {e}")))?;

        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            preprocess: PreprocessConfig::default(),
            segmenter: SegmenterYamlConfig::default(),
            artifacts: ArtifactsYamlConfig::default(),
            tables: default_tables(),
            defaults: MatchConfig::default(),
        }
    }
}

/// Stopword list and word segmenter sources
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SegmenterYamlConfig {
    /// One stopword per line; no stopwords are removed when absent
    #[serde(default)]
    pub stopwords: Option<PathBuf>,

    /// Compound-word lexicon for dictionary segmentation; without one,
    /// syllables stay separate tokens
    #[serde(default)]
    pub lexicon: Option<PathBuf>,
}

/// Similarity artifact YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtifactsYamlConfig {
    #[serde(default = "default_dictionary_path")]
    pub dictionary: PathBuf,

    #[serde(default = "default_tfidf_path")]
    pub tfidf: PathBuf,

    #[serde(default = "default_index_path")]
    pub index: PathBuf,

    /// Must match the compression the artifacts were written with
    #[serde(default)]
    pub compression: CompressionConfig,
}

impl ArtifactsYamlConfig {
    pub fn paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            dictionary: self.dictionary.clone(),
            tfidf: self.tfidf.clone(),
            index: self.index.clone(),
        }
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        if !(1..=22).contains(&self.compression.level) {
            return Err(ConfigLoadError::Validation(
                "artifacts.compression.level must be between 1 and 22".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ArtifactsYamlConfig {
    fn default() -> Self {
        let paths = ArtifactPaths::in_dir("artifacts");
        Self {
            dictionary: paths.dictionary,
            tfidf: paths.tfidf,
            index: paths.index,
            compression: CompressionConfig::default(),
        }
    }
}

fn resolve(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

fn default_tables() -> TableConfig {
    TableConfig::in_dir("data")
}

fn default_dictionary_path() -> PathBuf {
    ArtifactsYamlConfig::default().dictionary
}

fn default_tfidf_path() -> PathBuf {
    ArtifactsYamlConfig::default().tfidf
}

fn default_index_path() -> PathBuf {
    ArtifactsYamlConfig::default().index
}

#[cfg(test)]
mod tests {
    use super::*;
    use index::CompressionCodec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_yaml() {
        let yaml = r#"
version: "1.0"
name: "test config"
preprocess:
  version: 2
  negation_particles: ["không"]
artifacts:
  compression:
    codec: "none"
defaults:
  similarity_threshold: 0.25
"#;

        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.name.as_deref(), Some("test config"));
        assert_eq!(config.preprocess.version, 2);
        assert_eq!(config.preprocess.negation_particles, vec!["không"]);
        assert_eq!(config.artifacts.compression.codec, CompressionCodec::None);
        assert_eq!(config.defaults.similarity_threshold, 0.25);
        assert_eq!(config.defaults.rating_threshold, 3.0);
    }

    #[test]
    fn test_load_from_file_resolves_paths() {
        let yaml = r#"
version: "1.0"
segmenter:
  stopwords: "stopwords.txt"
  lexicon: "/opt/shoprec/compounds.txt"
tables:
  catalog: "data/catalog.csv"
  user_recommendations: "data/user_recs.csv"
  item_recommendations: "data/item_recs.csv"
  rating_history: "data/ratings.tsv"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();
        let base = temp_file.path().parent().unwrap().to_path_buf();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(
            config.segmenter.stopwords,
            Some(base.join("stopwords.txt"))
        );
        assert_eq!(
            config.segmenter.lexicon,
            Some(PathBuf::from("/opt/shoprec/compounds.txt"))
        );
        assert_eq!(config.tables.catalog, base.join("data/catalog.csv"));
        assert_eq!(
            config.artifacts.index,
            base.join("artifacts").join("similarity.bin")
        );
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.version, "1.0");
        assert!(config.name.is_none());
        assert!(config.validate().is_ok());
        assert_eq!(config.tables.catalog, PathBuf::from("data/catalog.csv"));
    }

    #[test]
    fn test_unsupported_version() {
        let result = AppConfig::from_yaml("version: \"2.0\"\n");
        assert!(matches!(
            result,
            Err(ConfigLoadError::UnsupportedVersion(v)) if v == "2.0"
        ));
    }

    #[test]
    fn test_defaults_validation() {
        let yaml = r#"
version: "1.0"
defaults:
  content_results: 20
"#;

        let result = AppConfig::from_yaml(yaml);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("max_content_results"));
    }

    #[test]
    fn test_delimiter_validation() {
        let yaml = r#"
version: "1.0"
tables:
  catalog: "c.csv"
  user_recommendations: "u.csv"
  item_recommendations: "i.csv"
  rating_history: "r.tsv"
  delimiter: "a"
"#;

        let result = AppConfig::from_yaml(yaml);
        assert!(result.unwrap_err().to_string().starts_with("validation error: tables"));
    }

    #[test]
    fn test_compression_level_validation() {
        let yaml = r#"
version: "1.0"
artifacts:
  compression:
    level: 0
"#;

        let result = AppConfig::from_yaml(yaml);
        assert!(result.unwrap_err().to_string().contains("level"));
    }
}
