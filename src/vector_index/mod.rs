//! Nearest-neighbor index over chunk embeddings.
//!
//! Each session owns one index. Vectors and their chunk texts are stored in
//! parallel; a vector's position is the only key linking it to its chunk.

mod flat;

pub use flat::FlatL2Index;

/// One search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    /// Position of the matching vector (and chunk) in the index.
    pub position: usize,
    /// Squared Euclidean distance to the query (lower is closer).
    pub distance: f32,
}

/// Squared Euclidean distance between two vectors of equal length.
///
/// The square root is skipped; it does not change the ordering.
pub fn l2_distance_squared(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
