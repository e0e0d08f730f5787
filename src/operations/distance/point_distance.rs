use rayon::prelude::*;

use crate::error::Result;
use crate::field::DistanceField;
use crate::math::nearest::NearestNeighborIndex;
use crate::math::Point3;

/// Computes, for each query point, the distance to the nearest reference point.
pub struct PointDistanceField<'a> {
    query: &'a [Point3],
    reference: &'a [Point3],
}

impl<'a> PointDistanceField<'a> {
    /// Creates a new `PointDistanceField` computation.
    #[must_use]
    pub fn new(query: &'a [Point3], reference: &'a [Point3]) -> Self {
        Self { query, reference }
    }

    /// Executes the nearest-neighbor queries.
    ///
    /// The reference set is indexed once in a k-d tree; queries run in
    /// parallel and the result keeps query order.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference set is empty, or if a query point
    /// has a non-finite coordinate.
    pub fn execute(&self) -> Result<DistanceField> {
        let index = NearestNeighborIndex::build(self.reference)?;
        let distances: Vec<f64> = self
            .query
            .par_iter()
            .map(|p| index.nearest_distance(p))
            .collect();
        Ok(DistanceField::from_distances(distances)?)
    }
}
