use super::Rgba;
use crate::error::ColorError;

/// A breakpoint of a color ramp: a distance and the color at that distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub distance: f64,
    pub color: Rgba,
}

impl ColorStop {
    #[must_use]
    pub const fn new(distance: f64, color: Rgba) -> Self {
        Self { distance, color }
    }
}

/// A piecewise-linear color ramp over distance.
///
/// Holds at least two stops with strictly increasing, finite distances.
/// Both requirements are checked once in [`ColorSpec::new`]; a spec that
/// exists is always well-formed.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSpec {
    stops: Vec<ColorStop>,
}

impl ColorSpec {
    /// Creates a color ramp from stops sorted by ascending distance.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than two stops, if any distance
    /// is not finite, or if distances are not strictly increasing.
    pub fn new(stops: Vec<ColorStop>) -> Result<Self, ColorError> {
        if stops.len() < 2 {
            return Err(ColorError::TooFewStops { count: stops.len() });
        }
        for (index, stop) in stops.iter().enumerate() {
            if !stop.distance.is_finite() {
                return Err(ColorError::NonFiniteStop {
                    index,
                    distance: stop.distance,
                });
            }
        }
        for (index, pair) in stops.windows(2).enumerate() {
            if pair[1].distance <= pair[0].distance {
                return Err(ColorError::NonIncreasingStops {
                    index: index + 1,
                    previous: pair[0].distance,
                    current: pair[1].distance,
                });
            }
        }
        Ok(Self { stops })
    }

    /// A two-stop ramp from `start` at distance 0 to `end` at distance 1.
    ///
    /// Meant for use with an external normalization window, where only the
    /// relative stop positions matter.
    #[must_use]
    pub fn two_color(start: Rgba, end: Rgba) -> Self {
        Self {
            stops: vec![ColorStop::new(0.0, start), ColorStop::new(1.0, end)],
        }
    }

    /// The stops, in ascending distance order.
    #[must_use]
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Distance of the first stop.
    #[must_use]
    pub fn min_distance(&self) -> f64 {
        self.stops[0].distance
    }

    /// Distance of the last stop.
    #[must_use]
    pub fn max_distance(&self) -> f64 {
        self.stops[self.stops.len() - 1].distance
    }

    /// Color of the first stop.
    #[must_use]
    pub fn first_color(&self) -> Rgba {
        self.stops[0].color
    }

    /// Color of the last stop.
    #[must_use]
    pub fn last_color(&self) -> Rgba {
        self.stops[self.stops.len() - 1].color
    }

    /// Position of a distance on the ramp's own range, unclamped.
    #[must_use]
    pub fn normalize(&self, distance: f64) -> f64 {
        let min = self.min_distance();
        (distance - min) / (self.max_distance() - min)
    }

    /// Color at normalized position `x` on the ramp.
    ///
    /// `x` is clamped to `[0, 1]`; 0 is the first stop and 1 the last, and
    /// every stop sits at `normalize(stop.distance)`. A value landing exactly
    /// on a stop returns that stop's color unchanged.
    #[must_use]
    pub fn sample(&self, x: f64) -> Rgba {
        if x.is_nan() || x <= 0.0 {
            return self.first_color();
        }
        if x >= 1.0 {
            return self.last_color();
        }

        // Last stop at or before x; stops[0] sits at 0 < x so one exists.
        let upper = self
            .stops
            .partition_point(|stop| self.normalize(stop.distance) <= x);
        let lower = upper.saturating_sub(1);
        let start = &self.stops[lower];
        let Some(end) = self.stops.get(upper) else {
            return self.last_color();
        };

        let s0 = self.normalize(start.distance);
        let s1 = self.normalize(end.distance);
        let t = (x - s0) / (s1 - s0);
        start.color.lerp(&end.color, t)
    }

    /// Color at a distance measured on the ramp's own stop range.
    #[must_use]
    pub fn color_at(&self, distance: f64) -> Rgba {
        self.sample(self.normalize(distance))
    }
}
