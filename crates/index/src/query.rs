use std::cmp::Ordering;

/// One ranked document from a similarity lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityHit {
    /// Position of the document in the index (catalog row order).
    pub doc: usize,
    /// Cosine similarity, higher is more similar.
    pub score: f32,
}

/// Ranks per-document scores.
///
/// Keeps documents with `score >= threshold`, orders them by score
/// descending and returns at most `count`. The sort is stable, so equal
/// scores keep document order. NaN scores never pass the threshold.
///
/// ```
/// use index::top_similar;
///
/// let hits = top_similar(&[0.2, 0.9, 0.5, 0.9], 0.4, 2);
/// assert_eq!(hits.iter().map(|h| h.doc).collect::<Vec<_>>(), vec![1, 3]);
/// ```
pub fn top_similar(scores: &[f32], threshold: f32, count: usize) -> Vec<SimilarityHit> {
    if count == 0 {
        return Vec::new();
    }

    let mut hits: Vec<SimilarityHit> = scores
        .iter()
        .enumerate()
        .filter(|(_, score)| **score >= threshold)
        .map(|(doc, &score)| SimilarityHit { doc, score })
        .collect();

    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    hits.truncate(count);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_descending_with_document_order_ties() {
        let hits = top_similar(&[0.5, 0.9, 0.7, 0.9, 0.1], 0.0, 10);
        let docs: Vec<usize> = hits.iter().map(|h| h.doc).collect();
        assert_eq!(docs, vec![1, 3, 2, 0, 4]);
    }

    #[test]
    fn never_below_threshold_nor_above_count() {
        let scores = [0.41, 0.39, 0.4, 0.95, 0.6, 0.0, 0.8];
        for count in 0..6 {
            let hits = top_similar(&scores, 0.4, count);
            assert!(hits.len() <= count);
            assert!(hits.iter().all(|h| h.score >= 0.4));
            assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
        }
        let all = top_similar(&scores, 0.4, 100);
        assert_eq!(all.len(), 5);
        assert_eq!(all.last().map(|h| h.doc), Some(2));
    }

    #[test]
    fn nan_scores_are_excluded() {
        let hits = top_similar(&[f32::NAN, 0.5], 0.0, 5);
        assert_eq!(hits, vec![SimilarityHit { doc: 1, score: 0.5 }]);
    }

    #[test]
    fn empty_scores_yield_nothing() {
        assert!(top_similar(&[], 0.0, 5).is_empty());
    }
}
