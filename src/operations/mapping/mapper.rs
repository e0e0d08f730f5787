use rayon::prelude::*;

use super::Normalization;
use crate::color::{ColorSpec, Rgba};
use crate::field::{ColorField, DistanceField};

/// Maps distances to colors through a [`ColorSpec`].
///
/// Stateless: the same field can be mapped repeatedly with mappers using
/// different normalization windows.
#[derive(Debug, Clone, Copy)]
pub struct DistanceColorMapper<'a> {
    spec: &'a ColorSpec,
    normalization: Normalization,
}

impl<'a> DistanceColorMapper<'a> {
    /// Creates a mapper normalizing against the ramp's own stop range.
    #[must_use]
    pub fn new(spec: &'a ColorSpec) -> Self {
        Self {
            spec,
            normalization: Normalization::ColorSpecRange,
        }
    }

    /// Returns a mapper using `normalization` instead.
    #[must_use]
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    #[must_use]
    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// Maps a single distance to a color.
    ///
    /// An undefined distance is fully transparent. Defined distances are
    /// normalized, clamped to `[0, 1]` and interpolated between the two
    /// bracketing stops.
    #[must_use]
    pub fn map_to_color(&self, distance: Option<f64>) -> Rgba {
        let Some(d) = distance else {
            return Rgba::TRANSPARENT;
        };
        let x = match self.normalization {
            Normalization::ColorSpecRange => self.spec.normalize(d),
            Normalization::Window(window) => window.normalize(d),
        };
        self.spec.sample(x)
    }

    /// Maps every sample of `field`, in parallel, keeping the field's shape.
    #[must_use]
    pub fn map_field(&self, field: &DistanceField) -> ColorField {
        let colors = field
            .values()
            .par_iter()
            .map(|&d| self.map_to_color(d))
            .collect();
        ColorField::from_parts(field.shape(), colors)
    }
}
