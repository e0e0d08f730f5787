//! Distance-to-color mapping for scientific visualization.
//!
//! Computes distance fields (nearest-neighbor distances between meshes, or
//! exact Euclidean distance transforms of segmentation masks) and maps them
//! through piecewise-linear color ramps.

pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod io;
pub mod math;
pub mod operations;
pub mod pipeline;
pub mod scene;

pub use color::{ChannelOrder, ColorSpec, ColorStop, Rgba};
pub use error::{DistColorError, Result};
pub use field::{BinaryMask, ColorField, DistanceField, FieldShape, PixelSize};
pub use operations::{DistanceColorMapper, Normalization, NormalizationWindow};
