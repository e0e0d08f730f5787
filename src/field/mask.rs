use image::GrayImage;

use crate::error::FieldError;

/// Membership of each pixel of a grid in a reference region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl BinaryMask {
    /// Creates a mask from row-major membership flags.
    ///
    /// # Errors
    ///
    /// Returns an error if `bits.len() != width * height`.
    pub fn new(width: usize, height: usize, bits: Vec<bool>) -> Result<Self, FieldError> {
        if bits.len() != width * height {
            return Err(FieldError::ShapeMismatch {
                expected: width * height,
                actual: bits.len(),
            });
        }
        Ok(Self {
            width,
            height,
            bits,
        })
    }

    /// An empty (all-outside) mask.
    #[must_use]
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width * height],
        }
    }

    /// Marks every pixel whose gray value equals `segmentation_value`.
    #[must_use]
    pub fn from_gray(image: &GrayImage, segmentation_value: u8) -> Self {
        let bits = image
            .as_raw()
            .iter()
            .map(|&v| v == segmentation_value)
            .collect();
        Self {
            width: image.width() as usize,
            height: image.height() as usize,
            bits,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major membership flags.
    #[must_use]
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Whether pixel `(x, y)` is in the region; out-of-range is `false`.
    #[must_use]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.bits[y * self.width + x]
    }

    /// Adds pixel `(x, y)` to the region; out-of-range coordinates are ignored.
    pub fn insert(&mut self, x: usize, y: usize) {
        if x < self.width && y < self.height {
            self.bits[y * self.width + x] = true;
        }
    }

    /// Number of pixels in the region.
    #[must_use]
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

/// Physical size of one pixel along each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSize {
    x: f64,
    y: f64,
}

impl PixelSize {
    /// Creates a possibly anisotropic pixel size.
    ///
    /// # Errors
    ///
    /// Returns an error unless both sizes are finite and positive.
    pub fn new(x: f64, y: f64) -> Result<Self, FieldError> {
        if !(x.is_finite() && y.is_finite() && x > 0.0 && y > 0.0) {
            return Err(FieldError::InvalidPixelSize { x, y });
        }
        Ok(Self { x, y })
    }

    /// Creates a square pixel size.
    ///
    /// # Errors
    ///
    /// Returns an error unless `size` is finite and positive.
    pub fn isotropic(size: f64) -> Result<Self, FieldError> {
        Self::new(size, size)
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn from_gray_matches_exact_value() {
        let mut img = GrayImage::new(3, 2);
        img.put_pixel(1, 0, Luma([191]));
        img.put_pixel(2, 1, Luma([191]));
        img.put_pixel(0, 1, Luma([190]));
        let mask = BinaryMask::from_gray(&img, 191);
        assert_eq!(mask.count(), 2);
        assert!(mask.contains(1, 0));
        assert!(mask.contains(2, 1));
        assert!(!mask.contains(0, 1));
        assert!(!mask.contains(5, 5));
    }

    #[test]
    fn new_checks_length() {
        assert!(BinaryMask::new(2, 2, vec![false; 3]).is_err());
        assert!(BinaryMask::new(2, 2, vec![false; 4]).is_ok());
    }

    #[test]
    fn pixel_size_validation() {
        assert!(PixelSize::isotropic(0.2).is_ok());
        assert!(PixelSize::isotropic(0.0).is_err());
        assert!(PixelSize::new(1.0, -1.0).is_err());
        assert!(PixelSize::new(f64::NAN, 1.0).is_err());
    }
}
