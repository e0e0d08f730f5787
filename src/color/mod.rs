pub mod color_spec;
pub mod naming;

pub use color_spec::{ColorSpec, ColorStop};
pub use naming::ramp_name;

use crate::error::ColorError;

/// An RGBA color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Creates a color without range checks.
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color, checking every channel lies in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error if any channel is outside `[0, 1]` or NaN.
    pub fn try_new(r: f64, g: f64, b: f64, a: f64) -> Result<Self, ColorError> {
        for (channel, value) in [("r", r), ("g", g), ("b", b), ("a", a)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ColorError::ChannelOutOfRange { channel, value });
            }
        }
        Ok(Self::new(r, g, b, a))
    }

    /// Parses `#RRGGBB` (leading `#` optional) with the given alpha.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not six hex digits, or if `alpha`
    /// is outside `[0, 1]`.
    pub fn from_hex(hex: &str, alpha: f64) -> Result<Self, ColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(hex.to_owned()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map(|v| f64::from(v) / 255.0)
                .map_err(|_| ColorError::InvalidHex(hex.to_owned()))
        };
        Self::try_new(channel(0)?, channel(2)?, channel(4)?, alpha)
    }

    /// Formats the color channels as `RRGGBB` (alpha omitted).
    #[must_use]
    pub fn to_hex(&self) -> String {
        let [r, g, b, _] = self.to_u8();
        format!("{r:02X}{g:02X}{b:02X}")
    }

    /// Channels as an array in RGBA order.
    #[must_use]
    pub const fn to_array(&self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Linear interpolation of every channel: `(1 - t) * self + t * other`.
    ///
    /// `t = 0` returns `self` and `t = 1` returns `other` bit-exactly.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        let mix = |a: f64, b: f64| (1.0 - t) * a + t * b;
        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    /// Quantizes to 8 bits per channel in RGBA order.
    ///
    /// Channels are clamped to `[0, 1]` and rounded to the nearest level.
    #[must_use]
    pub fn to_u8(&self) -> [u8; 4] {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Quantizes to 8 bits per channel, laid out in `order`.
    #[must_use]
    pub fn to_u8_ordered(&self, order: ChannelOrder) -> [u8; 4] {
        order.encode(self.to_u8())
    }
}

/// In-memory layout of the color channels of a four-channel pixel.
///
/// Every image boundary in this crate takes the order explicitly, so a
/// buffer coming from (or going to) a BGR-convention library is never
/// silently swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    /// Red, green, blue, alpha.
    #[default]
    Rgba,
    /// Blue, green, red, alpha.
    Bgra,
}

impl ChannelOrder {
    /// Reorders an RGBA pixel into this layout.
    #[must_use]
    pub const fn encode(self, [r, g, b, a]: [u8; 4]) -> [u8; 4] {
        match self {
            Self::Rgba => [r, g, b, a],
            Self::Bgra => [b, g, r, a],
        }
    }

    /// Reorders a pixel in this layout into RGBA.
    #[must_use]
    pub const fn decode(self, pixel: [u8; 4]) -> [u8; 4] {
        // Swapping red and blue is its own inverse.
        self.encode(pixel)
    }
}
