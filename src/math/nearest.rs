use kiddo::{ImmutableKdTree, SquaredEuclidean};

use super::Point3;
use crate::error::FieldError;

/// Nearest-neighbor index over a fixed reference point set.
///
/// Wraps an immutable k-d tree; the tree is built once and queried any
/// number of times. Queries are `&self` so the index can be shared across
/// rayon workers.
pub struct NearestNeighborIndex {
    tree: ImmutableKdTree<f64, 3>,
    len: usize,
}

/// Result of a nearest-neighbor query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    /// Index of the nearest reference point.
    pub index: usize,
    /// Euclidean distance to it.
    pub distance: f64,
}

impl NearestNeighborIndex {
    /// Builds the index over `points`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::EmptyReference`] if `points` is empty.
    pub fn build(points: &[Point3]) -> Result<Self, FieldError> {
        if points.is_empty() {
            return Err(FieldError::EmptyReference);
        }
        let entries: Vec<[f64; 3]> = points.iter().map(|p| [p.x, p.y, p.z]).collect();
        Ok(Self {
            tree: ImmutableKdTree::new_from_slice(&entries),
            len: points.len(),
        })
    }

    /// Number of reference points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: an index cannot be built over an empty set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Finds the reference point nearest to `query`.
    ///
    /// Ties resolve to whichever candidate the tree visits first.
    #[must_use]
    pub fn nearest(&self, query: &Point3) -> Nearest {
        let found = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[query.x, query.y, query.z]);
        #[allow(clippy::cast_possible_truncation)]
        let index = found.item as usize;
        Nearest {
            index,
            distance: found.distance.sqrt(),
        }
    }

    /// Euclidean distance from `query` to the nearest reference point.
    #[must_use]
    pub fn nearest_distance(&self, query: &Point3) -> f64 {
        self.nearest(query).distance
    }
}

impl std::fmt::Debug for NearestNeighborIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NearestNeighborIndex")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}
