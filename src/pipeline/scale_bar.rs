use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use tracing::info;

use super::glyphs::{draw_text, text_width, GLYPH_HEIGHT};
use crate::color::{ChannelOrder, ColorSpec};
use crate::error::Result;
use crate::io;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const LABEL_SCALE: u32 = 2;
const LABEL_GAP: u32 = 4;

/// File name of the rendered legend.
pub const SCALE_BAR_FILE: &str = "scale_bar.png";

/// Legend image for a [`ColorSpec`]: a horizontal gradient with a labelled
/// tick at every stop.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct ScaleBar {
    pub bar_height: u32,
    pub image_width: u32,
    /// Margin left and right of the gradient, and below it for the labels.
    pub padding: u32,
    pub tick_length: u32,
    pub unit: String,
}

impl Default for ScaleBar {
    fn default() -> Self {
        Self {
            bar_height: 50,
            image_width: 600,
            padding: 50,
            tick_length: 10,
            unit: "um".to_owned(),
        }
    }
}

impl ScaleBar {
    /// Width of the gradient band.
    #[must_use]
    pub fn usable_width(&self) -> u32 {
        self.image_width
            .saturating_sub(self.padding.saturating_mul(2))
    }

    /// Column of the tick for a stop at `distance`.
    #[must_use]
    pub fn tick_position(&self, spec: &ColorSpec, distance: f64) -> u32 {
        let range = spec.max_distance() - spec.min_distance();
        let offset = (distance - spec.min_distance()) / range * f64::from(self.usable_width());
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let offset = offset.floor().clamp(0.0, f64::from(u32::MAX)) as u32;
        self.padding
            .saturating_add(offset)
            .min(self.image_width.saturating_sub(1))
    }

    /// Renders the legend on an opaque white canvas of
    /// `image_width x (bar_height + padding)` pixels.
    ///
    /// Ticks and labels live in the bottom `padding` rows and are cut off
    /// where they do not fit; with `padding == 0` only the gradient is drawn.
    #[must_use]
    pub fn render(&self, spec: &ColorSpec) -> RgbaImage {
        let width = self.image_width;
        let height = self.bar_height.saturating_add(self.padding);
        let mut image = RgbaImage::from_pixel(width, height, WHITE);

        let usable = self.usable_width();
        for k in 0..usable {
            let t = if usable > 1 {
                f64::from(k) / f64::from(usable - 1)
            } else {
                0.0
            };
            let pixel = Rgba(spec.sample(t).to_u8());
            for y in 0..self.bar_height {
                image.put_pixel(self.padding + k, y, pixel);
            }
        }

        if width == 0 {
            return image;
        }
        let tick_end = self.bar_height.saturating_add(self.tick_length).min(height);
        let label_top = i64::from(tick_end) + i64::from(LABEL_GAP);
        for stop in spec.stops() {
            let x = self.tick_position(spec, stop.distance);
            for y in self.bar_height..tick_end {
                image.put_pixel(x, y, BLACK);
            }

            // Adding 0.0 turns -0 into 0.
            let label = format!("{:.0} {}", stop.distance.trunc() + 0.0, self.unit);
            let left = i64::from(x) - i64::from(text_width(&label, LABEL_SCALE) / 2);
            draw_text(&mut image, &label, left, label_top, LABEL_SCALE, BLACK);
        }
        image
    }

    /// Renders and writes `scale_bar.png` into `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the folder cannot be created or the file written.
    pub fn write(&self, spec: &ColorSpec, output_dir: &Path) -> Result<PathBuf> {
        io::ensure_dir(output_dir)?;
        let image = self.render(spec);
        let path = output_dir.join(SCALE_BAR_FILE);
        io::write_rgba(
            &path,
            image.width(),
            image.height(),
            image.as_raw(),
            ChannelOrder::Rgba,
        )?;
        info!(path = %path.display(), "scale bar written");
        Ok(path)
    }

    /// Height of the tick labels in pixels.
    #[must_use]
    pub const fn label_height() -> u32 {
        GLYPH_HEIGHT * LABEL_SCALE
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::color::{ColorStop, Rgba as Color};

    fn spec() -> ColorSpec {
        ColorSpec::new(vec![
            ColorStop::new(0.0, Color::from_hex("#009600", 0.2).unwrap()),
            ColorStop::new(10.0, Color::from_hex("#4C4CB5", 0.2).unwrap()),
            ColorStop::new(20.0, Color::from_hex("#960000", 0.2).unwrap()),
        ])
        .unwrap()
    }

    #[test]
    fn canvas_and_gradient_geometry() {
        let s = spec();
        let image = ScaleBar::default().render(&s);
        assert_eq!(image.dimensions(), (600, 100));

        assert_eq!(image.get_pixel(49, 10).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(50, 10).0, s.first_color().to_u8());
        assert_eq!(image.get_pixel(549, 49).0, s.last_color().to_u8());
        assert_eq!(image.get_pixel(550, 10).0, [255, 255, 255, 255]);
        // Background below the band is opaque white.
        assert_eq!(image.get_pixel(10, 90).0, [255, 255, 255, 255]);
    }

    #[test]
    fn ticks_sit_below_each_stop() {
        let s = spec();
        let bar = ScaleBar::default();
        assert_eq!(bar.tick_position(&s, 0.0), 50);
        assert_eq!(bar.tick_position(&s, 10.0), 300);
        assert_eq!(bar.tick_position(&s, 20.0), 550);

        let image = bar.render(&s);
        for x in [50, 300, 550] {
            assert_eq!(image.get_pixel(x, 50).0, BLACK.0);
            assert_eq!(image.get_pixel(x, 59).0, BLACK.0);
            assert_eq!(image.get_pixel(x, 61).0, WHITE.0);
        }
    }

    #[test]
    fn labels_are_drawn_under_ticks() {
        let image = ScaleBar::default().render(&spec());
        let top = 64;
        let ink = (top..top + ScaleBar::label_height())
            .flat_map(|y| (280..320).map(move |x| (x, y)))
            .filter(|&(x, y)| image.get_pixel(x, y).0 == BLACK.0)
            .count();
        assert!(ink > 0);
    }

    #[test]
    fn ticks_are_cut_at_the_bottom_edge() {
        let bar = ScaleBar {
            padding: 5,
            ..ScaleBar::default()
        };
        assert_eq!(bar.tick_position(&spec(), 20.0), 595);
        let image = bar.render(&spec());
        assert_eq!(image.dimensions(), (600, 55));
        // The tick is cut at the bottom edge.
        assert_eq!(image.get_pixel(595, 50).0, BLACK.0);
        assert_eq!(image.get_pixel(595, 54).0, BLACK.0);
    }

    #[test]
    fn zero_padding_clamps_tick_and_draws_only_the_gradient() {
        let s = spec();
        let bar = ScaleBar {
            padding: 0,
            ..ScaleBar::default()
        };
        assert_eq!(bar.tick_position(&s, 20.0), 599);
        let image = bar.render(&s);
        assert_eq!(image.dimensions(), (600, 50));
        assert_eq!(image.get_pixel(599, 49).0, s.last_color().to_u8());
        assert!(image.pixels().all(|px| px.0 != BLACK.0));
    }

    #[test]
    fn degenerate_widths_do_not_panic() {
        let s = spec();
        for image_width in [0, 1, 100, 101] {
            let bar = ScaleBar {
                image_width,
                ..ScaleBar::default()
            };
            let image = bar.render(&s);
            assert_eq!(image.width(), image_width);
        }
    }

    #[test]
    fn writes_png_into_folder() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("legend");
        let path = ScaleBar::default().write(&spec(), &out).unwrap();
        assert_eq!(path, out.join("scale_bar.png"));
        let image = io::read_rgba(&path, ChannelOrder::Rgba).unwrap();
        assert_eq!(image.dimensions(), (600, 100));
    }
}
