use serde::{Deserialize, Serialize};

use crate::tfidf::{l2_normalize, sparse_dot, SparseVector};

/// Cosine-similarity index over a fixed set of sparse document vectors.
///
/// Rows are stored L2-normalized in document order, so document `i` of the
/// index is row `i` of the corpus it was built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarityIndex {
    num_features: u32,
    rows: Vec<SparseVector>,
}

impl SimilarityIndex {
    /// Builds an index from document vectors. Each vector is sorted by term
    /// id and normalized; ids at or beyond `num_features` are dropped.
    pub fn from_vectors<I>(num_features: u32, vectors: I) -> Self
    where
        I: IntoIterator<Item = SparseVector>,
    {
        let rows = vectors
            .into_iter()
            .map(|mut row| {
                row.retain(|&(id, _)| id < num_features);
                row.sort_by_key(|&(id, _)| id);
                l2_normalize(&mut row);
                row
            })
            .collect();
        Self { num_features, rows }
    }

    /// Cosine similarity of `query` against every document, in document
    /// order. The query is normalized first, so any positive scaling of it
    /// yields the same scores.
    pub fn scores(&self, query: &[(u32, f32)]) -> Vec<f32> {
        let mut query = query.to_vec();
        query.sort_by_key(|&(id, _)| id);
        l2_normalize(&mut query);
        self.rows.iter().map(|row| sparse_dot(row, &query)).collect()
    }

    /// Normalized vector of one document.
    pub fn row(&self, doc: usize) -> Option<&[(u32, f32)]> {
        self.rows.get(doc).map(Vec::as_slice)
    }

    pub fn num_features(&self) -> u32 {
        self.num_features
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
