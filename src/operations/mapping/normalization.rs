use crate::error::ColorError;
use crate::math::TOLERANCE;

/// A closed distance interval mapped onto `[0, 1]` before color lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationWindow {
    min: f64,
    max: f64,
}

impl NormalizationWindow {
    /// Creates a window `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns an error unless both bounds are finite and `max` exceeds
    /// `min` by more than [`TOLERANCE`].
    pub fn new(min: f64, max: f64) -> Result<Self, ColorError> {
        if !(min.is_finite() && max.is_finite() && max - min > TOLERANCE) {
            return Err(ColorError::InvalidWindow { min, max });
        }
        Ok(Self { min, max })
    }

    /// Creates the window `[lower * scale, upper * scale]`.
    ///
    /// Used to derive thresholds from an observed maximum distance.
    ///
    /// # Errors
    ///
    /// Returns an error if the fractions are not finite with
    /// `0 <= lower < upper`, or if the scaled window is degenerate (for
    /// example when `scale` is zero).
    pub fn from_fractions(lower: f64, upper: f64, scale: f64) -> Result<Self, ColorError> {
        if !(lower.is_finite() && upper.is_finite() && lower >= 0.0 && lower < upper) {
            return Err(ColorError::InvalidFraction { lower, upper });
        }
        Self::new(lower * scale, upper * scale)
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Position of `distance` in the window, unclamped.
    #[must_use]
    pub fn normalize(&self, distance: f64) -> f64 {
        (distance - self.min) / (self.max - self.min)
    }
}

/// How distances are brought onto the `[0, 1]` ramp domain.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Normalization {
    /// Use the color spec's own first and last stop distances.
    #[default]
    ColorSpecRange,
    /// Use an external window; the stops keep their relative positions.
    Window(NormalizationWindow),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn window_validation() {
        assert!(NormalizationWindow::new(0.0, 1.0).is_ok());
        assert!(NormalizationWindow::new(1.0, 1.0).is_err());
        assert!(NormalizationWindow::new(1.0, 1.0 + 1e-12).is_err());
        assert!(NormalizationWindow::new(2.0, 1.0).is_err());
        assert!(NormalizationWindow::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn fractions_scale_by_maximum() {
        let w = NormalizationWindow::from_fractions(0.25, 0.5, 8.0).unwrap();
        assert!((w.min() - 2.0).abs() < f64::EPSILON);
        assert!((w.max() - 4.0).abs() < f64::EPSILON);
        assert!((w.normalize(3.0) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn fractions_reject_bad_input() {
        assert!(matches!(
            NormalizationWindow::from_fractions(0.5, 0.2, 1.0),
            Err(ColorError::InvalidFraction { .. })
        ));
        assert!(NormalizationWindow::from_fractions(-0.1, 0.2, 1.0).is_err());
        assert!(matches!(
            NormalizationWindow::from_fractions(0.0, 0.3, 0.0),
            Err(ColorError::InvalidWindow { .. })
        ));
    }
}
