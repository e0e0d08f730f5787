use std::path::Path;

use image::{DynamicImage, GrayImage, ImageFormat, RgbImage, RgbaImage};

use super::write_atomic;
use crate::color::ChannelOrder;
use crate::error::IoError;
use crate::field::{ColorField, FieldShape};

/// Reads an image as 8-bit single-channel gray.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded.
pub fn read_gray(path: &Path) -> Result<GrayImage, IoError> {
    let image = image::open(path).map_err(|e| IoError::image(path, e))?;
    Ok(image.to_luma8())
}

/// Reads a four-channel image whose stored channels follow `order`,
/// returning it in canonical RGBA.
///
/// Images without alpha are read as opaque.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded.
pub fn read_rgba(path: &Path, order: ChannelOrder) -> Result<RgbaImage, IoError> {
    let mut image = image::open(path)
        .map_err(|e| IoError::image(path, e))?
        .to_rgba8();
    if order != ChannelOrder::Rgba {
        for pixel in image.pixels_mut() {
            pixel.0 = order.decode(pixel.0);
        }
    }
    Ok(image)
}

/// Writes four bytes per pixel laid out in `order`; the format follows the
/// file extension.
///
/// # Errors
///
/// Returns an error if `data` is not `width * height * 4` bytes long or the
/// file cannot be written.
pub fn write_rgba(
    path: &Path,
    width: u32,
    height: u32,
    data: &[u8],
    order: ChannelOrder,
) -> Result<(), IoError> {
    let size_error = || IoError::BufferSize {
        width,
        height,
        actual: data.len(),
    };
    let expected = usize::try_from(u64::from(width) * u64::from(height) * 4)
        .map_err(|_| size_error())?;
    if data.len() != expected {
        return Err(size_error());
    }
    let canonical = data
        .chunks_exact(4)
        .flat_map(|px| order.decode([px[0], px[1], px[2], px[3]]))
        .collect();
    let image = RgbaImage::from_raw(width, height, canonical).ok_or_else(size_error)?;
    save(path, &DynamicImage::ImageRgba8(image))
}

/// Writes a color field as an RGBA image whose stored channels follow
/// `order`, so [`read_rgba`] with the same order returns the field's colors.
///
/// Grid fields keep their layout; point fields are written as a single row.
///
/// # Errors
///
/// Returns an error if the field is too large for an image or the file
/// cannot be written.
pub fn write_color_field(
    path: &Path,
    field: &ColorField,
    order: ChannelOrder,
) -> Result<(), IoError> {
    let (width, height) = match field.shape() {
        FieldShape::Grid { width, height } => (width, height),
        FieldShape::Points { len } => (len, 1),
    };
    let to_u32 = |v: usize| {
        u32::try_from(v).map_err(|_| IoError::BufferSize {
            width: u32::MAX,
            height: u32::MAX,
            actual: field.len() * 4,
        })
    };
    write_rgba(
        path,
        to_u32(width)?,
        to_u32(height)?,
        &field.to_rgba8(order),
        ChannelOrder::Rgba,
    )
}

/// Writes an RGB image whose stored channels follow `order`; the format
/// follows the file extension.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_rgb(path: &Path, image: &RgbImage, order: ChannelOrder) -> Result<(), IoError> {
    let mut stored = image.clone();
    if order != ChannelOrder::Rgba {
        for pixel in stored.pixels_mut() {
            let [r, g, b] = pixel.0;
            let [r, g, b, _] = order.encode([r, g, b, u8::MAX]);
            pixel.0 = [r, g, b];
        }
    }
    save(path, &DynamicImage::ImageRgb8(stored))
}

fn save(path: &Path, image: &DynamicImage) -> Result<(), IoError> {
    let format = ImageFormat::from_path(path).map_err(|e| IoError::image(path, e))?;
    write_atomic(path, |w| {
        image
            .write_to(w, format)
            .map_err(|e| IoError::image(path, e))
    })
}
