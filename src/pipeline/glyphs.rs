//! A 3x5 bitmap font covering tick labels (digits, sign, decimal point and
//! the lowercase letters of common length units).

use image::{Rgba, RgbaImage};

pub(crate) const GLYPH_WIDTH: u32 = 3;
pub(crate) const GLYPH_HEIGHT: u32 = 5;
const SPACING: u32 = 1;

/// Rows top to bottom; bit 2 is the leftmost column.
fn glyph(c: char) -> Option<[u8; 5]> {
    let rows = match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ' ' => [0; 5],
        'c' => [0b000, 0b111, 0b100, 0b100, 0b111],
        'm' => [0b000, 0b110, 0b111, 0b101, 0b101],
        'n' => [0b000, 0b110, 0b101, 0b101, 0b101],
        'u' => [0b000, 0b101, 0b101, 0b101, 0b111],
        _ => return None,
    };
    Some(rows)
}

/// Width in pixels of `text` drawn at `scale`.
pub(crate) fn text_width(text: &str, scale: u32) -> u32 {
    let n = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
    if n == 0 {
        return 0;
    }
    (n * (GLYPH_WIDTH + SPACING) - SPACING).saturating_mul(scale)
}

/// Draws `text` with its top-left corner at `(x, y)`; pixels falling outside
/// the image are clipped and unknown characters are left blank.
pub(crate) fn draw_text(
    image: &mut RgbaImage,
    text: &str,
    x: i64,
    y: i64,
    scale: u32,
    color: Rgba<u8>,
) {
    let step = i64::from((GLYPH_WIDTH + SPACING) * scale);
    let scale = i64::from(scale);
    let mut left = x;
    for c in text.chars() {
        if let Some(rows) = glyph(c) {
            for (row, bits) in (0_i64..).zip(rows) {
                for col in 0..i64::from(GLYPH_WIDTH) {
                    if bits & (0b100 >> col) == 0 {
                        continue;
                    }
                    fill_block(
                        image,
                        left + col * scale,
                        y + row * scale,
                        scale,
                        color,
                    );
                }
            }
        }
        left += step;
    }
}

fn fill_block(image: &mut RgbaImage, x: i64, y: i64, size: i64, color: Rgba<u8>) {
    for py in y..y + size {
        for px in x..x + size {
            if let (Ok(px), Ok(py)) = (u32::try_from(px), u32::try_from(py)) {
                if px < image.width() && py < image.height() {
                    image.put_pixel(px, py, color);
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn inked(image: &RgbaImage) -> Vec<(u32, u32)> {
        image
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == INK)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn digit_one_at_unit_scale() {
        let mut image = RgbaImage::new(3, 5);
        draw_text(&mut image, "1", 0, 0, 1, INK);
        assert_eq!(
            inked(&image),
            vec![(1, 0), (0, 1), (1, 1), (1, 2), (1, 3), (0, 4), (1, 4), (2, 4)]
        );
    }

    #[test]
    fn scale_enlarges_blocks() {
        let mut image = RgbaImage::new(6, 10);
        draw_text(&mut image, ".", 0, 0, 2, INK);
        assert_eq!(inked(&image), vec![(2, 8), (3, 8), (2, 9), (3, 9)]);
    }

    #[test]
    fn clipping_and_unknown_characters() {
        let mut image = RgbaImage::new(4, 4);
        draw_text(&mut image, "8", -2, -2, 1, INK);
        assert!(!inked(&image).is_empty());

        let mut blank = RgbaImage::new(8, 5);
        draw_text(&mut blank, "?!", 0, 0, 1, INK);
        assert!(inked(&blank).is_empty());
    }

    #[test]
    fn width_counts_spacing_between_glyphs() {
        assert_eq!(text_width("", 2), 0);
        assert_eq!(text_width("1", 1), 3);
        assert_eq!(text_width("10 um", 2), 2 * (5 * 4 - 1));
    }
}
