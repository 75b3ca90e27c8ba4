//! Configuration types for the preprocessing pipeline.
//!
//! [`PreprocessConfig`] carries the static tables the pipeline needs besides
//! the stopword list: the negation particles, the unit tokens stripped during
//! lexical cleanup, and two switches that resolve encoding questions.
//!
//! # Versioning
//!
//! `version` identifies the processed-description format. Artifacts built
//! from descriptions processed under one version should be queried with the
//! same version; bump it whenever a change alters the output text.
//!
//! # Examples
//!
//! ```rust
//! use canonical::PreprocessConfig;
//!
//! let config = PreprocessConfig::default();
//! assert_eq!(config.version, 1);
//! assert_eq!(config.negation_particles, vec!["không", "chẳng", "chả"]);
//! assert!(!config.normalize_first);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Configuration for [`Preprocessor`](crate::Preprocessor).
///
/// Serializes to YAML/JSON with every field optional:
///
/// ```json
/// {
///   "version": 1,
///   "negation_particles": ["không", "chẳng", "chả"],
///   "unit_tokens": ["g", "kg", "ml", "cm", "dm", "m"],
///   "normalize_first": false,
///   "normalize_stopword_entries": false
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Processed-description format version. Must be >= 1.
    pub version: u32,

    /// Particles merged with the following token (`không thích` becomes
    /// `không_thích`).
    pub negation_particles: Vec<String>,

    /// Whole-word tokens removed during lexical cleanup.
    pub unit_tokens: Vec<String>,

    /// Fold legacy diacritics before lexical cleanup instead of after it.
    ///
    /// With the default order a word typed with combining marks never matches
    /// the alphabetic word pattern (the marks are word characters outside the
    /// Vietnamese letter class), so the whole word is dropped. Enabling this
    /// keeps such words, at the cost of diverging from descriptions that were
    /// processed with the default order.
    pub normalize_first: bool,

    /// Fold legacy diacritics in stopword entries when they are loaded.
    ///
    /// Comparison is always exact; this only changes what is stored.
    pub normalize_stopword_entries: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            version: 1,
            negation_particles: default_negation_particles(),
            unit_tokens: default_unit_tokens(),
            normalize_first: false,
            normalize_stopword_entries: false,
        }
    }
}

impl PreprocessConfig {
    /// Checks the invariants the pipeline relies on.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        if let Some(bad) = self
            .negation_particles
            .iter()
            .find(|p| p.is_empty() || p.contains(char::is_whitespace))
        {
            return Err(CanonicalError::InvalidConfig(format!(
                "negation particle {bad:?} must be a single non-empty token"
            )));
        }
        if let Some(bad) = self
            .unit_tokens
            .iter()
            .find(|u| u.is_empty() || u.contains(char::is_whitespace))
        {
            return Err(CanonicalError::InvalidConfig(format!(
                "unit token {bad:?} must be a single non-empty token"
            )));
        }
        Ok(())
    }
}

fn default_negation_particles() -> Vec<String> {
    ["không", "chẳng", "chả"].map(String::from).to_vec()
}

fn default_unit_tokens() -> Vec<String> {
    ["g", "kg", "ml", "cm", "dm", "m"].map(String::from).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = PreprocessConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.unit_tokens.len(), 6);
    }

    #[test]
    fn version_zero_rejected() {
        let cfg = PreprocessConfig {
            version: 0,
            ..Default::default()
        };
        match cfg.validate() {
            Err(CanonicalError::InvalidConfig(msg)) => assert!(msg.contains("version")),
            other => panic!("expected invalid config, got {other:?}"),
        }
    }

    #[test]
    fn multi_word_particle_rejected() {
        let cfg = PreprocessConfig {
            negation_particles: vec!["không phải".into()],
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(CanonicalError::InvalidConfig(_))
        ));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: PreprocessConfig =
            serde_json::from_str(r#"{"normalize_first": true}"#).expect("parse config");
        assert!(cfg.normalize_first);
        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.negation_particles.len(), 3);
    }
}
