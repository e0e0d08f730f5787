pub mod coloring;
pub mod distance;
pub mod mapping;

pub use coloring::{ColorByDistance, ColoringReport, WindowFraction, DEFAULT_WINDOWS};
pub use distance::{GridDistanceField, PointDistanceField};
pub use mapping::{DistanceColorMapper, Normalization, NormalizationWindow};
