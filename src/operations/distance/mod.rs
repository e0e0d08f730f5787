mod grid_distance;
mod point_distance;

pub use grid_distance::GridDistanceField;
pub use point_distance::PointDistanceField;
