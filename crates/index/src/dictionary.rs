use std::collections::{BTreeMap, BTreeSet};

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::IndexError;

/// Sparse term counts: `(term id, count)` pairs sorted by term id.
pub type BagOfWords = Vec<(u32, u32)>;

/// Mapping between tokens and integer term ids, with document frequencies.
///
/// Ids are dense (`0..len()`). When a document introduces several new
/// tokens at once they receive consecutive ids in lexicographic order, so
/// building from the same corpus always yields the same ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DictionaryParts", into = "DictionaryParts")]
pub struct Dictionary {
    token2id: FxHashMap<String, u32>,
    id2token: Vec<String>,
    dfs: Vec<u32>,
    num_docs: u32,
}

/// Serialized layout: tokens in id order, so the map is rebuilt on load.
#[derive(Serialize, Deserialize)]
struct DictionaryParts {
    tokens: Vec<String>,
    dfs: Vec<u32>,
    num_docs: u32,
}

impl TryFrom<DictionaryParts> for Dictionary {
    type Error = IndexError;

    fn try_from(parts: DictionaryParts) -> Result<Self, Self::Error> {
        if parts.tokens.len() != parts.dfs.len() {
            return Err(IndexError::Inconsistent(format!(
                "dictionary has {} tokens but {} document frequencies",
                parts.tokens.len(),
                parts.dfs.len()
            )));
        }
        let mut token2id = FxHashMap::default();
        for (id, token) in parts.tokens.iter().enumerate() {
            if token2id.insert(token.clone(), id as u32).is_some() {
                return Err(IndexError::Inconsistent(format!(
                    "dictionary token {token:?} appears twice"
                )));
            }
        }
        Ok(Self {
            token2id,
            id2token: parts.tokens,
            dfs: parts.dfs,
            num_docs: parts.num_docs,
        })
    }
}

impl From<Dictionary> for DictionaryParts {
    fn from(dict: Dictionary) -> Self {
        Self {
            tokens: dict.id2token,
            dfs: dict.dfs,
            num_docs: dict.num_docs,
        }
    }
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dictionary from tokenized documents.
    pub fn from_documents<I, D, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut dict = Self::new();
        for doc in documents {
            dict.add_document(doc.as_ref());
        }
        dict
    }

    /// Registers one document: assigns ids to unseen tokens and bumps the
    /// document frequency of every distinct token in it.
    pub fn add_document<S: AsRef<str>>(&mut self, tokens: &[S]) {
        // sorted iteration, so new tokens get ids in lexicographic order
        let distinct: BTreeSet<&str> = tokens.iter().map(|t| t.as_ref()).collect();

        for token in distinct {
            let id = match self.token2id.get(token) {
                Some(&id) => id,
                None => {
                    let id = self.id2token.len() as u32;
                    self.token2id.insert(token.to_string(), id);
                    self.id2token.push(token.to_string());
                    self.dfs.push(0);
                    id
                }
            };
            self.dfs[id as usize] += 1;
        }
        self.num_docs += 1;
    }

    /// Counts known tokens. Unknown tokens are ignored; the result is sorted
    /// by term id and holds no duplicate ids.
    ///
    /// ```
    /// use index::Dictionary;
    ///
    /// let dict = Dictionary::from_documents([vec!["áo", "thun"]]);
    /// assert_eq!(dict.doc2bow(&["thun", "áo", "thun", "len"]), vec![(0, 2), (1, 1)]);
    /// ```
    pub fn doc2bow<S: AsRef<str>>(&self, tokens: &[S]) -> BagOfWords {
        let mut counts: BTreeMap<u32, u32> = BTreeMap::new();
        for token in tokens {
            if let Some(&id) = self.token2id.get(token.as_ref()) {
                *counts.entry(id).or_insert(0) += 1;
            }
        }
        counts.into_iter().collect()
    }

    pub fn token_id(&self, token: &str) -> Option<u32> {
        self.token2id.get(token).copied()
    }

    pub fn token(&self, id: u32) -> Option<&str> {
        self.id2token.get(id as usize).map(String::as_str)
    }

    /// Number of documents containing the term.
    pub fn doc_freq(&self, id: u32) -> Option<u32> {
        self.dfs.get(id as usize).copied()
    }

    pub fn doc_freqs(&self) -> &[u32] {
        &self.dfs
    }

    /// Number of documents the dictionary was built from.
    pub fn num_docs(&self) -> u32 {
        self.num_docs
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.id2token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id2token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dictionary {
        Dictionary::from_documents([vec!["thun", "áo", "thun"], vec!["quần", "áo"]])
    }

    #[test]
    fn new_tokens_get_sorted_consecutive_ids() {
        let dict = sample();
        // "thun" sorts before "áo" by code point
        assert_eq!(dict.token_id("thun"), Some(0));
        assert_eq!(dict.token_id("áo"), Some(1));
        assert_eq!(dict.token_id("quần"), Some(2));
        assert_eq!(dict.token(2), Some("quần"));
        assert_eq!(dict.len(), 3);
    }

    #[test]
    fn document_frequency_counts_documents_not_occurrences() {
        let dict = sample();
        assert_eq!(dict.doc_freq(0), Some(1));
        assert_eq!(dict.doc_freq(1), Some(2));
        assert_eq!(dict.num_docs(), 2);
    }

    #[test]
    fn doc2bow_ignores_unknown_tokens() {
        let dict = sample();
        assert_eq!(dict.doc2bow(&["áo", "len", "thun", "thun"]), vec![(0, 2), (1, 1)]);
        assert!(dict.doc2bow(&["len", "dạ"]).is_empty());
        assert!(dict.doc2bow::<&str>(&[]).is_empty());
    }

    #[test]
    fn corrupt_layout_is_rejected() {
        let parts = DictionaryParts {
            tokens: vec!["áo".into(), "áo".into()],
            dfs: vec![1, 1],
            num_docs: 1,
        };
        assert!(matches!(
            Dictionary::try_from(parts),
            Err(IndexError::Inconsistent(_))
        ));

        let parts = DictionaryParts {
            tokens: vec!["áo".into()],
            dfs: vec![],
            num_docs: 1,
        };
        assert!(Dictionary::try_from(parts).is_err());
    }
}
