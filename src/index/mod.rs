//! In-memory vector index with exact cosine-similarity ranking.
//!
//! Ranking is a full linear scan over every stored vector. The corpus is
//! small and exactness matters more than speed, so there is no approximate
//! structure.

use crate::error::{Result, SvarError};

/// Holds the embedding matrix for all corpus entries.
///
/// Row i of the matrix corresponds to corpus entry i; the index never
/// reorders its vectors.
#[derive(Debug)]
pub struct VectorIndex {
    vectors: Vec<Vec<f32>>,
}

impl VectorIndex {
    /// Build an index from an embedding matrix.
    ///
    /// Every vector must have the same dimensionality. An empty matrix is
    /// allowed and yields an index that matches nothing.
    pub fn new(vectors: Vec<Vec<f32>>) -> Result<Self> {
        if let Some(first) = vectors.first() {
            let dims = first.len();
            if let Some(pos) = vectors.iter().position(|v| v.len() != dims) {
                return Err(SvarError::InvalidInput(format!(
                    "Embedding at row {} has {} dimensions, expected {}",
                    pos,
                    vectors[pos].len(),
                    dims
                )));
            }
        }
        Ok(Self { vectors })
    }

    /// Number of stored vectors.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Score every stored vector against the query, sorted by descending
    /// similarity.
    ///
    /// The sort is stable, so entries with equal scores keep their original
    /// corpus order.
    pub fn score(&self, query: &[f32]) -> Vec<(usize, f32)> {
        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, cosine_similarity(query, v)))
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored
    }

    /// The k highest-similarity `(index, score)` pairs.
    ///
    /// Asking for more than is stored returns everything.
    pub fn top_k(&self, query: &[f32], k: usize) -> Vec<(usize, f32)> {
        let mut scored = self.score(query);
        scored.truncate(k);
        scored
    }
}

/// Compute cosine similarity between two vectors.
///
/// A zero-norm or length-mismatched input yields 0.0 rather than NaN, so
/// degenerate vectors rank below any real match.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 0.001);

        let c = vec![0.0, 1.0, 0.0];
        assert!((cosine_similarity(&a, &c)).abs() < 0.001);

        let d = vec![-1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &d) + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_zero_norm_vector_scores_zero() {
        let a = vec![0.0, 0.0, 0.0];
        let b = vec![1.0, 2.0, 3.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
        assert_eq!(cosine_similarity(&b, &a), 0.0);
    }

    #[test]
    fn test_mismatched_lengths_score_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_rejects_mixed_dimensionality() {
        let err = VectorIndex::new(vec![vec![1.0, 0.0], vec![1.0, 0.0, 0.0]]).unwrap_err();
        assert!(matches!(err, SvarError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_index() {
        let index = VectorIndex::new(Vec::new()).unwrap();
        assert!(index.is_empty());
        assert!(index.top_k(&[1.0, 0.0], 3).is_empty());
    }

    #[test]
    fn test_score_ranks_by_descending_similarity() {
        let index = VectorIndex::new(vec![
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
        ])
        .unwrap();

        let ranked = index.score(&[1.0, 0.0]);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].0, 1);
        assert_eq!(ranked[1].0, 2);
        assert_eq!(ranked[2].0, 0);
    }

    #[test]
    fn test_scaling_a_stored_vector_does_not_change_ranking() {
        let base = vec![
            vec![0.9, 0.1, 0.0],
            vec![0.1, 0.9, 0.0],
            vec![0.5, 0.5, 0.1],
        ];
        let mut scaled = base.clone();
        for value in &mut scaled[1] {
            *value *= 2.0;
        }

        let query = [0.2, 0.8, 0.0];
        let order = |vectors: Vec<Vec<f32>>| -> Vec<usize> {
            VectorIndex::new(vectors)
                .unwrap()
                .score(&query)
                .into_iter()
                .map(|(i, _)| i)
                .collect()
        };

        assert_eq!(order(base), order(scaled));
    }

    #[test]
    fn test_equal_scores_keep_corpus_order() {
        // Identical vectors tie exactly; the stable sort must keep them
        // in their original positions.
        let index = VectorIndex::new(vec![
            vec![1.0, 1.0],
            vec![1.0, 1.0],
            vec![1.0, 1.0],
        ])
        .unwrap();

        let ranked = index.score(&[1.0, 1.0]);
        let order: Vec<usize> = ranked.into_iter().map(|(i, _)| i).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_top_k_clamps_to_index_length() {
        let index = VectorIndex::new(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        assert_eq!(index.top_k(&[1.0, 0.0], 10).len(), 2);
        assert_eq!(index.top_k(&[1.0, 0.0], 1).len(), 1);
        assert!(index.top_k(&[1.0, 0.0], 0).is_empty());
    }
}
