//! Exact (brute-force) L2 index.

use super::{l2_distance_squared, Neighbor};
use crate::error::{Result, VidnotesError};

/// Flat index that scans every vector on search.
///
/// Immutable after construction.
#[derive(Debug, Clone)]
pub struct FlatL2Index {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
    chunks: Vec<String>,
}

impl FlatL2Index {
    /// Build an index from embeddings and their chunk texts.
    ///
    /// Fails if the counts differ or the vectors do not share one dimension.
    pub fn build(vectors: Vec<Vec<f32>>, chunks: Vec<String>) -> Result<Self> {
        if vectors.len() != chunks.len() {
            return Err(VidnotesError::VectorIndex(format!(
                "{} vectors for {} chunks",
                vectors.len(),
                chunks.len()
            )));
        }

        let dimension = vectors.first().map(Vec::len).unwrap_or(0);
        if let Some(pos) = vectors.iter().position(|v| v.len() != dimension) {
            return Err(VidnotesError::VectorIndex(format!(
                "vector {} has dimension {}, expected {}",
                pos,
                vectors[pos].len(),
                dimension
            )));
        }

        Ok(Self {
            dimension,
            vectors,
            chunks,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Chunk text at `position`.
    pub fn chunk(&self, position: usize) -> Option<&str> {
        self.chunks.get(position).map(String::as_str)
    }

    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    /// Return the `k` nearest vectors to `query`, closest first.
    ///
    /// `k` is clamped to the number of stored vectors. Equal distances keep
    /// insertion order.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        if self.is_empty() {
            return Ok(Vec::new());
        }
        if query.len() != self.dimension {
            return Err(VidnotesError::VectorIndex(format!(
                "query has dimension {}, index has {}",
                query.len(),
                self.dimension
            )));
        }

        let mut neighbors: Vec<Neighbor> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, v)| Neighbor {
                position,
                distance: l2_distance_squared(query, v),
            })
            .collect();

        // Stable sort keeps lower positions first on ties
        neighbors.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        neighbors.truncate(k.min(self.len()));

        Ok(neighbors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> FlatL2Index {
        FlatL2Index::build(
            vec![vec![0.0, 0.0], vec![10.0, 0.0], vec![1.0, 1.0], vec![5.0, 5.0]],
            vec!["origin".into(), "far".into(), "near".into(), "middle".into()],
        )
        .unwrap()
    }

    #[test]
    fn test_search_orders_by_distance() {
        let index = sample_index();
        let hits = index.search(&[0.2, 0.1], 3).unwrap();

        let positions: Vec<usize> = hits.iter().map(|n| n.position).collect();
        assert_eq!(positions, vec![0, 2, 3]);
        assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
        assert_eq!(index.chunk(hits[0].position), Some("origin"));
    }

    #[test]
    fn test_k_is_clamped() {
        let index = sample_index();
        assert_eq!(index.search(&[0.0, 0.0], 10).unwrap().len(), 4);
        assert!(index.search(&[0.0, 0.0], 0).unwrap().is_empty());
    }

    #[test]
    fn test_ties_keep_position_order() {
        let index = FlatL2Index::build(
            vec![vec![1.0], vec![-1.0], vec![1.0]],
            vec!["a".into(), "b".into(), "c".into()],
        )
        .unwrap();
        let positions: Vec<usize> = index
            .search(&[0.0], 3)
            .unwrap()
            .into_iter()
            .map(|n| n.position)
            .collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_count_mismatch_rejected() {
        let err = FlatL2Index::build(vec![vec![1.0]], vec!["a".into(), "b".into()]).unwrap_err();
        assert!(matches!(err, VidnotesError::VectorIndex(_)));
    }

    #[test]
    fn test_mixed_dimensions_rejected() {
        let err = FlatL2Index::build(
            vec![vec![1.0, 2.0], vec![1.0]],
            vec!["a".into(), "b".into()],
        )
        .unwrap_err();
        assert!(err.to_string().contains("dimension"));
    }

    #[test]
    fn test_query_dimension_mismatch() {
        let index = sample_index();
        assert!(index.search(&[1.0, 2.0, 3.0], 1).is_err());
    }

    #[test]
    fn test_empty_index() {
        let index = FlatL2Index::build(Vec::new(), Vec::new()).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.dimension(), 0);
        assert!(index.search(&[1.0], 3).unwrap().is_empty());
    }
}
