pub mod mask;

pub use mask::{BinaryMask, PixelSize};

use crate::color::{ChannelOrder, Rgba};
use crate::error::FieldError;

/// Layout of the samples of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    /// One sample per point of a point set (e.g. mesh vertices).
    Points { len: usize },
    /// One sample per pixel, row-major.
    Grid { width: usize, height: usize },
}

impl FieldShape {
    /// Total number of samples.
    #[must_use]
    pub const fn len(&self) -> usize {
        match *self {
            Self::Points { len } => len,
            Self::Grid { width, height } => width * height,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row-major sample index of pixel `(x, y)`, or `None` for point sets
    /// and out-of-range coordinates.
    #[must_use]
    pub const fn grid_index(&self, x: usize, y: usize) -> Option<usize> {
        match *self {
            Self::Grid { width, height } if x < width && y < height => Some(y * width + x),
            _ => None,
        }
    }
}

/// A scalar distance per sample; `None` marks a sample excluded from coloring.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceField {
    shape: FieldShape,
    values: Vec<Option<f64>>,
}

impl DistanceField {
    /// Creates a distance field.
    ///
    /// # Errors
    ///
    /// Returns an error if `values` does not match `shape`, or if any defined
    /// value is negative or not finite.
    pub fn new(shape: FieldShape, values: Vec<Option<f64>>) -> Result<Self, FieldError> {
        if values.len() != shape.len() {
            return Err(FieldError::ShapeMismatch {
                expected: shape.len(),
                actual: values.len(),
            });
        }
        for (index, value) in values.iter().enumerate() {
            if let Some(v) = *value {
                if !v.is_finite() || v < 0.0 {
                    return Err(FieldError::InvalidDistance { index, value: v });
                }
            }
        }
        Ok(Self { shape, values })
    }

    pub(crate) fn from_parts(shape: FieldShape, values: Vec<Option<f64>>) -> Self {
        debug_assert_eq!(shape.len(), values.len());
        Self { shape, values }
    }

    /// Creates a point-set field where every sample is defined.
    ///
    /// # Errors
    ///
    /// Returns an error if any value is negative or not finite.
    pub fn from_distances(distances: Vec<f64>) -> Result<Self, FieldError> {
        let shape = FieldShape::Points {
            len: distances.len(),
        };
        Self::new(shape, distances.into_iter().map(Some).collect())
    }

    #[must_use]
    pub fn shape(&self) -> FieldShape {
        self.shape
    }

    /// The samples in shape order.
    #[must_use]
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample at index `i`; `None` if out of range or undefined.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<f64> {
        self.values.get(i).copied().flatten()
    }

    /// Sample at pixel `(x, y)` of a grid field.
    #[must_use]
    pub fn get_xy(&self, x: usize, y: usize) -> Option<f64> {
        self.shape.grid_index(x, y).and_then(|i| self.get(i))
    }

    /// Number of defined samples.
    #[must_use]
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Smallest and largest defined distance, or `None` if nothing is defined.
    #[must_use]
    pub fn range(&self) -> Option<(f64, f64)> {
        self.values.iter().flatten().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// A color per sample, shaped like the [`DistanceField`] it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorField {
    shape: FieldShape,
    colors: Vec<Rgba>,
}

impl ColorField {
    pub(crate) fn from_parts(shape: FieldShape, colors: Vec<Rgba>) -> Self {
        debug_assert_eq!(shape.len(), colors.len());
        Self { shape, colors }
    }

    #[must_use]
    pub fn shape(&self) -> FieldShape {
        self.shape
    }

    #[must_use]
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Consumes the field, returning the per-sample colors.
    #[must_use]
    pub fn into_colors(self) -> Vec<Rgba> {
        self.colors
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at pixel `(x, y)` of a grid field.
    #[must_use]
    pub fn get_xy(&self, x: usize, y: usize) -> Option<Rgba> {
        self.shape
            .grid_index(x, y)
            .and_then(|i| self.colors.get(i).copied())
    }

    /// Quantized 8-bit pixels, four bytes per sample laid out in `order`.
    #[must_use]
    pub fn to_rgba8(&self, order: ChannelOrder) -> Vec<u8> {
        self.colors
            .iter()
            .flat_map(|c| c.to_u8_ordered(order))
            .collect()
    }
}
