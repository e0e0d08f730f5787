use crate::field::{BinaryMask, DistanceField, FieldShape, PixelSize};
use crate::math::edt;

/// Computes the distance from every pixel outside a region to the region.
///
/// Distances are exact Euclidean distances in physical units (pixel offsets
/// scaled by the pixel size along each axis). Pixels inside the region are
/// undefined, as is every pixel when the region is empty.
pub struct GridDistanceField<'a> {
    mask: &'a BinaryMask,
    pixel_size: PixelSize,
}

impl<'a> GridDistanceField<'a> {
    /// Creates a new `GridDistanceField` computation.
    #[must_use]
    pub fn new(mask: &'a BinaryMask, pixel_size: PixelSize) -> Self {
        Self { mask, pixel_size }
    }

    /// Executes the distance transform.
    #[must_use]
    pub fn execute(&self) -> DistanceField {
        let (width, height) = (self.mask.width(), self.mask.height());
        let distances = edt::distance_transform(
            self.mask.bits(),
            width,
            height,
            self.pixel_size.x(),
            self.pixel_size.y(),
        );

        let values = distances
            .into_iter()
            .zip(self.mask.bits())
            .map(|(d, &inside)| (!inside && d.is_finite()).then_some(d))
            .collect();

        DistanceField::from_parts(FieldShape::Grid { width, height }, values)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn single_pixel_region_scales_with_pixel_size() {
        let p = 0.2;
        let mut mask = BinaryMask::empty(60, 3);
        mask.insert(0, 0);
        let field = GridDistanceField::new(&mask, PixelSize::isotropic(p).unwrap()).execute();

        assert_eq!(field.get_xy(0, 0), None);
        for k in 1..60 {
            let d = field.get_xy(k, 0).unwrap();
            assert!((d - k as f64 * p).abs() < TOL, "k={k}, d={d}");
        }
        let d = field.get_xy(0, 2).unwrap();
        assert!((d - 2.0 * p).abs() < TOL);
    }

    #[test]
    fn region_pixels_are_undefined() {
        let mut mask = BinaryMask::empty(4, 4);
        mask.insert(1, 1);
        mask.insert(2, 1);
        let field = GridDistanceField::new(&mask, PixelSize::isotropic(1.0).unwrap()).execute();
        assert_eq!(field.defined_count(), 14);
        assert_eq!(field.get_xy(1, 1), None);
        assert_eq!(field.get_xy(2, 1), None);
        assert!((field.get_xy(3, 1).unwrap() - 1.0).abs() < TOL);
        assert!((field.get_xy(3, 3).unwrap() - 5.0_f64.sqrt()).abs() < TOL);
    }

    #[test]
    fn anisotropic_pixels() {
        let mut mask = BinaryMask::empty(5, 5);
        mask.insert(0, 0);
        let size = PixelSize::new(0.5, 2.0).unwrap();
        let field = GridDistanceField::new(&mask, size).execute();
        assert!((field.get_xy(4, 0).unwrap() - 2.0).abs() < TOL);
        assert!((field.get_xy(0, 3).unwrap() - 6.0).abs() < TOL);
    }

    #[test]
    fn empty_region_is_all_undefined() {
        let mask = BinaryMask::empty(3, 3);
        let field = GridDistanceField::new(&mask, PixelSize::isotropic(1.0).unwrap()).execute();
        assert_eq!(field.defined_count(), 0);
        assert_eq!(field.shape(), FieldShape::Grid { width: 3, height: 3 });
    }
}
