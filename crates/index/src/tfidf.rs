use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::dictionary::Dictionary;

/// Sparse vector: `(term id, weight)` pairs sorted by term id, no duplicates.
pub type SparseVector = Vec<(u32, f32)>;

/// Weights at or below this magnitude are dropped after normalization.
const WEIGHT_EPSILON: f64 = 1e-12;

/// Scales `vector` to unit L2 norm in place. A zero vector is left as is.
pub fn l2_normalize(vector: &mut [(u32, f32)]) {
    let norm = vector.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
    if norm > 0.0 {
        for (_, w) in vector.iter_mut() {
            *w /= norm;
        }
    }
}

/// Dot product of two id-sorted sparse vectors.
pub fn sparse_dot(a: &[(u32, f32)], b: &[(u32, f32)]) -> f32 {
    let mut sum = 0.0f32;
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
        }
    }
    sum
}

/// TF-IDF weighting with raw term frequency and `log2(N / df)` inverse
/// document frequency. Output vectors are L2-normalized.
///
/// A term that occurs in every document has idf 0 and never contributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TfidfModel {
    idfs: Vec<f64>,
    num_docs: u32,
}

impl TfidfModel {
    /// Derives idf weights from the dictionary's document frequencies.
    pub fn from_dictionary(dictionary: &Dictionary) -> Self {
        let num_docs = dictionary.num_docs();
        let idfs = dictionary
            .doc_freqs()
            .iter()
            .map(|&df| idf(num_docs, df))
            .collect();
        Self { idfs, num_docs }
    }

    /// Weighs a bag of words. Terms without a known, non-zero idf are
    /// dropped, so the result may be empty even for a non-empty input.
    pub fn transform(&self, bow: &[(u32, u32)]) -> SparseVector {
        let weighted: Vec<(u32, f64)> = bow
            .iter()
            .filter_map(|&(id, tf)| {
                let idf = self.idf(id)?;
                (idf != 0.0).then(|| (id, f64::from(tf) * idf))
            })
            .collect();

        let norm = weighted.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        weighted
            .into_iter()
            .map(|(id, w)| if norm > 0.0 { (id, w / norm) } else { (id, w) })
            .filter(|(_, w)| w.abs() > WEIGHT_EPSILON)
            .map(|(id, w)| (id, w as f32))
            .collect()
    }

    pub fn idf(&self, id: u32) -> Option<f64> {
        self.idfs.get(id as usize).copied()
    }

    /// Number of terms the model has weights for.
    pub fn num_features(&self) -> usize {
        self.idfs.len()
    }

    pub fn num_docs(&self) -> u32 {
        self.num_docs
    }
}

fn idf(num_docs: u32, df: u32) -> f64 {
    if df == 0 || num_docs == 0 {
        return 0.0;
    }
    (f64::from(num_docs) / f64::from(df)).log2()
}
