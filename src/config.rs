//! TOML configuration for the command-line workflows.
//!
//! ```toml
//! [[stops]]
//! distance = 0.0
//! color = "#009600"
//! alpha = 0.2
//!
//! [distance_map]
//! input_dir = "seg"
//! output_dir = "seg/colormap"
//! pixel_size = 0.2
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::color::{ChannelOrder, ColorSpec, ColorStop, Rgba};
use crate::error::{ConfigError, Result};
use crate::field::PixelSize;
use crate::io::IndexPattern;
use crate::operations::{WindowFraction, DEFAULT_WINDOWS};
use crate::pipeline::{ColorMeshJob, DistanceMapBatch, OverlayBatch, ScaleBar};

/// Root configuration record.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Color ramp for distance maps and the scale bar.
    #[serde(default = "default_stops")]
    pub stops: Vec<ColorStopConfig>,
    pub distance_map: Option<DistanceMapConfig>,
    pub scale_bar: Option<ScaleBarConfig>,
    pub overlay: Option<OverlayConfig>,
    pub color_mesh: Option<ColorMeshConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColorStopConfig {
    pub distance: f64,
    /// `#RRGGBB`.
    pub color: String,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

fn default_alpha() -> f64 {
    1.0
}

/// Green at 0, blue-purple at 10 and dark red at 20 (microns), 20% opaque.
fn default_stops() -> Vec<ColorStopConfig> {
    [(0.0, "#009600"), (10.0, "#4C4CB5"), (20.0, "#960000")]
        .into_iter()
        .map(|(distance, color)| ColorStopConfig {
            distance,
            color: color.to_owned(),
            alpha: 0.2,
        })
        .collect()
}

/// Physical pixel size: one number for square pixels or `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PixelSizeConfig {
    Uniform(f64),
    PerAxis([f64; 2]),
}

impl PixelSizeConfig {
    /// # Errors
    ///
    /// Returns an error unless both sizes are finite and positive.
    pub fn to_pixel_size(self) -> Result<PixelSize> {
        let size = match self {
            Self::Uniform(s) => PixelSize::isotropic(s)?,
            Self::PerAxis([x, y]) => PixelSize::new(x, y)?,
        };
        Ok(size)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DistanceMapConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub pixel_size: PixelSizeConfig,
    #[serde(default = "default_segmentation_value")]
    pub segmentation_value: u8,
    #[serde(default = "default_mask_pattern")]
    pub output_pattern: IndexPattern,
    /// Channel layout of the written maps.
    #[serde(default)]
    pub channel_order: ChannelOrder,
}

fn default_segmentation_value() -> u8 {
    191
}

fn default_mask_pattern() -> IndexPattern {
    IndexPattern::new("CbD_mask_", 4, ".png")
}

impl DistanceMapConfig {
    /// # Errors
    ///
    /// Returns an error if the pixel size is invalid.
    pub fn to_batch(&self, spec: ColorSpec) -> Result<DistanceMapBatch> {
        Ok(DistanceMapBatch::new(
            &self.input_dir,
            &self.output_dir,
            spec,
            self.pixel_size.to_pixel_size()?,
        )
        .with_segmentation_value(self.segmentation_value)
        .with_output_pattern(self.output_pattern.clone())
        .with_channel_order(self.channel_order))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScaleBarConfig {
    pub output_dir: PathBuf,
    #[serde(flatten)]
    pub bar: ScaleBar,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverlayConfig {
    pub base_dir: PathBuf,
    pub mask_dir: PathBuf,
    pub output_dir: PathBuf,
    #[serde(default = "default_base_pattern")]
    pub base_pattern: IndexPattern,
    #[serde(default = "default_mask_pattern")]
    pub mask_pattern: IndexPattern,
    #[serde(default = "default_overlay_pattern")]
    pub output_pattern: IndexPattern,
    /// Channel layout the masks were stored with.
    #[serde(default)]
    pub channel_order: ChannelOrder,
    #[serde(default)]
    pub output_channel_order: ChannelOrder,
}

fn default_base_pattern() -> IndexPattern {
    IndexPattern::new("mip2_", 4, ".tif")
}

fn default_overlay_pattern() -> IndexPattern {
    IndexPattern::new("CbD_EM_", 4, ".png")
}

impl OverlayConfig {
    #[must_use]
    pub fn to_batch(&self) -> OverlayBatch {
        OverlayBatch::new(&self.base_dir, &self.mask_dir, &self.output_dir)
            .with_patterns(
                self.base_pattern.clone(),
                self.mask_pattern.clone(),
                self.output_pattern.clone(),
            )
            .with_channel_order(self.channel_order)
            .with_output_channel_order(self.output_channel_order)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColorMeshConfig {
    pub target: PathBuf,
    pub reference: PathBuf,
    pub output_dir: PathBuf,
    #[serde(default = "default_start_color")]
    pub start_color: String,
    #[serde(default = "default_end_color")]
    pub end_color: String,
    /// `[lower, upper]` fractions of the largest distance.
    #[serde(default = "default_windows")]
    pub windows: Vec<[f64; 2]>,
    #[serde(default = "default_mesh_unit")]
    pub unit: String,
}

fn default_start_color() -> String {
    "#FFA500".to_owned()
}

fn default_end_color() -> String {
    "#800080".to_owned()
}

fn default_windows() -> Vec<[f64; 2]> {
    DEFAULT_WINDOWS.iter().map(|w| [w.lower, w.upper]).collect()
}

fn default_mesh_unit() -> String {
    "m".to_owned()
}

impl ColorMeshConfig {
    /// # Errors
    ///
    /// Returns an error if either color is not valid hex.
    pub fn to_job(&self) -> Result<ColorMeshJob> {
        let spec = ColorSpec::two_color(
            Rgba::from_hex(&self.start_color, 1.0)?,
            Rgba::from_hex(&self.end_color, 1.0)?,
        );
        let windows = self
            .windows
            .iter()
            .map(|&[lower, upper]| WindowFraction::new(lower, upper))
            .collect();
        Ok(ColorMeshJob::new(&self.target, &self.reference, &self.output_dir)
            .with_color_spec(spec)
            .with_windows(windows)
            .with_unit(self.unit.as_str()))
    }
}

impl Config {
    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> std::result::Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// # Errors
    ///
    /// Returns an error if `text` is not a valid configuration.
    pub fn from_toml_str(text: &str) -> std::result::Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Builds the color ramp from the configured stops.
    ///
    /// # Errors
    ///
    /// Returns an error if a color is malformed or the stops are not a valid
    /// ramp.
    pub fn color_spec(&self) -> Result<ColorSpec> {
        let stops = self
            .stops
            .iter()
            .map(|s| -> Result<ColorStop> {
                Ok(ColorStop::new(s.distance, Rgba::from_hex(&s.color, s.alpha)?))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ColorSpec::new(stops)?)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSection`] if `[distance_map]` is absent.
    pub fn distance_map(&self) -> std::result::Result<&DistanceMapConfig, ConfigError> {
        self.distance_map
            .as_ref()
            .ok_or(ConfigError::MissingSection("distance_map"))
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSection`] if `[scale_bar]` is absent.
    pub fn scale_bar(&self) -> std::result::Result<&ScaleBarConfig, ConfigError> {
        self.scale_bar
            .as_ref()
            .ok_or(ConfigError::MissingSection("scale_bar"))
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSection`] if `[overlay]` is absent.
    pub fn overlay(&self) -> std::result::Result<&OverlayConfig, ConfigError> {
        self.overlay
            .as_ref()
            .ok_or(ConfigError::MissingSection("overlay"))
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSection`] if `[color_mesh]` is absent.
    pub fn color_mesh(&self) -> std::result::Result<&ColorMeshConfig, ConfigError> {
        self.color_mesh
            .as_ref()
            .ok_or(ConfigError::MissingSection("color_mesh"))
    }
}
