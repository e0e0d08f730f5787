//! Exact Euclidean distance transform.
//!
//! Separable lower-envelope-of-parabolas algorithm (Felzenszwalb and
//! Huttenlocher): a 1D squared transform along every row, then along every
//! column of the row result. Linear in the number of pixels and exact up to
//! floating point rounding. Sample positions are scaled by the physical
//! spacing of each axis, so anisotropic pixels are handled exactly.

/// Reusable scratch space for the 1D transform.
#[derive(Debug, Default)]
struct Envelope {
    /// Indices of the parabolas forming the lower envelope.
    vertices: Vec<usize>,
    /// Left boundary of each envelope parabola's range.
    boundaries: Vec<f64>,
}

impl Envelope {
    /// Computes `out[q] = min_p ((q - p) * spacing)^2 + f[p]` over finite `f[p]`.
    ///
    /// If `f` has no finite entry, `out` is filled with infinity.
    fn transform(&mut self, f: &[f64], spacing: f64, out: &mut [f64]) {
        self.vertices.clear();
        self.boundaries.clear();

        for (q, &fq) in f.iter().enumerate() {
            if !fq.is_finite() {
                continue;
            }
            let xq = position(q, spacing);
            loop {
                let (Some(&p), Some(&zp)) = (self.vertices.last(), self.boundaries.last()) else {
                    self.vertices.push(q);
                    self.boundaries.push(f64::NEG_INFINITY);
                    break;
                };
                let xp = position(p, spacing);
                let s = ((fq + xq * xq) - (f[p] + xp * xp)) / (2.0 * (xq - xp));
                if s <= zp {
                    self.vertices.pop();
                    self.boundaries.pop();
                } else {
                    self.vertices.push(q);
                    self.boundaries.push(s);
                    break;
                }
            }
        }

        if self.vertices.is_empty() {
            out.fill(f64::INFINITY);
            return;
        }

        let mut k = 0;
        for (q, slot) in out.iter_mut().enumerate() {
            let xq = position(q, spacing);
            while k + 1 < self.vertices.len() && self.boundaries[k + 1] < xq {
                k += 1;
            }
            let p = self.vertices[k];
            let d = xq - position(p, spacing);
            *slot = d * d + f[p];
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn position(index: usize, spacing: f64) -> f64 {
    index as f64 * spacing
}

/// Squared Euclidean distance from every pixel to the nearest `true` pixel.
///
/// `mask` is row-major with `width * height` entries. Distances are measured
/// in physical units: one step along x is `spacing_x`, along y `spacing_y`.
/// Pixels where `mask` is `true` get 0. If `mask` has no `true` pixel every
/// entry is infinite.
#[must_use]
pub fn squared_distance_transform(
    mask: &[bool],
    width: usize,
    height: usize,
    spacing_x: f64,
    spacing_y: f64,
) -> Vec<f64> {
    debug_assert_eq!(mask.len(), width * height);

    let mut grid: Vec<f64> = mask
        .iter()
        .map(|&inside| if inside { 0.0 } else { f64::INFINITY })
        .collect();
    let mut envelope = Envelope::default();

    let mut row_out = vec![0.0; width];
    for row in grid.chunks_exact_mut(width.max(1)).take(height) {
        envelope.transform(row, spacing_x, &mut row_out);
        row.copy_from_slice(&row_out);
    }

    let mut column = vec![0.0; height];
    let mut column_out = vec![0.0; height];
    for x in 0..width {
        for (y, slot) in column.iter_mut().enumerate() {
            *slot = grid[y * width + x];
        }
        envelope.transform(&column, spacing_y, &mut column_out);
        for (y, &value) in column_out.iter().enumerate() {
            grid[y * width + x] = value;
        }
    }

    grid
}

/// Euclidean distance from every pixel to the nearest `true` pixel.
///
/// See [`squared_distance_transform`].
#[must_use]
pub fn distance_transform(
    mask: &[bool],
    width: usize,
    height: usize,
    spacing_x: f64,
    spacing_y: f64,
) -> Vec<f64> {
    let mut grid = squared_distance_transform(mask, width, height, spacing_x, spacing_y);
    for value in &mut grid {
        *value = value.sqrt();
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn brute_force(mask: &[bool], width: usize, sx: f64, sy: f64) -> Vec<f64> {
        let members: Vec<(f64, f64)> = mask
            .iter()
            .enumerate()
            .filter(|&(_, &m)| m)
            .map(|(i, _)| ((i % width) as f64 * sx, (i / width) as f64 * sy))
            .collect();
        (0..mask.len())
            .map(|i| {
                let x = (i % width) as f64 * sx;
                let y = (i / width) as f64 * sy;
                members
                    .iter()
                    .map(|(mx, my)| ((x - mx).powi(2) + (y - my).powi(2)).sqrt())
                    .fold(f64::INFINITY, f64::min)
            })
            .collect()
    }

    /// Deterministic sparse mask from a linear congruential sequence.
    fn scattered_mask(width: usize, height: usize, seed: u64) -> Vec<bool> {
        let mut state = seed;
        (0..width * height)
            .map(|_| {
                state = state
                    .wrapping_mul(6_364_136_223_846_793_005)
                    .wrapping_add(1_442_695_040_888_963_407);
                (state >> 33) % 17 == 0
            })
            .collect()
    }

    #[test]
    fn single_pixel_distances_along_axes() {
        let (w, h) = (7, 5);
        let mut mask = vec![false; w * h];
        mask[0] = true;
        let d = distance_transform(&mask, w, h, 0.5, 0.5);
        assert!(d[0].abs() < TOL);
        for k in 1..w {
            assert!((d[k] - k as f64 * 0.5).abs() < TOL, "x={k}, d={}", d[k]);
        }
        for k in 1..h {
            assert!((d[k * w] - k as f64 * 0.5).abs() < TOL, "y={k}");
        }
    }

    #[test]
    fn diagonal_distance() {
        let (w, h) = (5, 5);
        let mut mask = vec![false; w * h];
        mask[0] = true;
        let d = distance_transform(&mask, w, h, 1.0, 1.0);
        // (3, 4) -> 5
        assert!((d[4 * w + 3] - 5.0).abs() < TOL);
    }

    #[test]
    fn matches_brute_force() {
        let (w, h) = (23, 17);
        for seed in [1, 7, 42] {
            let mask = scattered_mask(w, h, seed);
            let fast = distance_transform(&mask, w, h, 1.0, 1.0);
            let slow = brute_force(&mask, w, 1.0, 1.0);
            for (i, (a, b)) in fast.iter().zip(&slow).enumerate() {
                assert!(
                    (a - b).abs() < 1e-9 || (a.is_infinite() && b.is_infinite()),
                    "pixel {i}: {a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn anisotropic_spacing_matches_brute_force() {
        let (w, h) = (19, 11);
        let mask = scattered_mask(w, h, 3);
        let fast = distance_transform(&mask, w, h, 0.2, 0.7);
        let slow = brute_force(&mask, w, 0.2, 0.7);
        for (a, b) in fast.iter().zip(&slow) {
            assert!(
                (a - b).abs() < 1e-9 || (a.is_infinite() && b.is_infinite()),
                "{a} vs {b}"
            );
        }
    }

    #[test]
    fn empty_mask_is_infinite() {
        let d = distance_transform(&[false; 12], 4, 3, 1.0, 1.0);
        assert!(d.iter().all(|v| v.is_infinite()));
    }

    #[test]
    fn full_mask_is_zero() {
        let d = distance_transform(&[true; 6], 3, 2, 1.0, 1.0);
        assert!(d.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn single_row_and_column_grids() {
        let d = distance_transform(&[false, false, true, false], 4, 1, 2.0, 1.0);
        assert_eq!(d, vec![4.0, 2.0, 0.0, 2.0]);
        let d = distance_transform(&[true, false, false], 1, 3, 1.0, 3.0);
        assert_eq!(d, vec![0.0, 3.0, 6.0]);
    }
}
