use std::path::{Path, PathBuf};

use image::GrayImage;
use indicatif::ProgressBar;
use tracing::{debug, info};

use crate::color::{ChannelOrder, ColorSpec};
use crate::error::{IoError, Result};
use crate::field::{BinaryMask, ColorField, PixelSize};
use crate::io::{self, IndexPattern};
use crate::operations::{DistanceColorMapper, GridDistanceField};

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "tif", "tiff"];

/// Files written by a batch, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
}

/// Colors the distance to a segmented region for one gray slice.
///
/// Pixels equal to `segmentation_value` form the region and come out fully
/// transparent; every other pixel gets the color of its physical distance to
/// the region, normalized against the stop range of `spec`.
#[must_use]
pub fn color_distance_map(
    image: &GrayImage,
    segmentation_value: u8,
    pixel_size: PixelSize,
    spec: &ColorSpec,
) -> ColorField {
    let mask = BinaryMask::from_gray(image, segmentation_value);
    let field = GridDistanceField::new(&mask, pixel_size).execute();
    DistanceColorMapper::new(spec).map_field(&field)
}

/// Turns a folder of segmentation slices into colored distance maps.
pub struct DistanceMapBatch {
    input_dir: PathBuf,
    output_dir: PathBuf,
    spec: ColorSpec,
    pixel_size: PixelSize,
    segmentation_value: u8,
    output_pattern: IndexPattern,
    channel_order: ChannelOrder,
    progress: ProgressBar,
}

impl DistanceMapBatch {
    /// Creates a batch with segmentation value 191 and output names
    /// `CbD_mask_%04d.png`.
    #[must_use]
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        spec: ColorSpec,
        pixel_size: PixelSize,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            spec,
            pixel_size,
            segmentation_value: 191,
            output_pattern: IndexPattern::new("CbD_mask_", 4, ".png"),
            channel_order: ChannelOrder::Rgba,
            progress: ProgressBar::hidden(),
        }
    }

    #[must_use]
    pub fn with_segmentation_value(mut self, value: u8) -> Self {
        self.segmentation_value = value;
        self
    }

    #[must_use]
    pub fn with_output_pattern(mut self, pattern: IndexPattern) -> Self {
        self.output_pattern = pattern;
        self
    }

    /// Channel layout of the written maps.
    #[must_use]
    pub fn with_channel_order(mut self, order: ChannelOrder) -> Self {
        self.channel_order = order;
        self
    }

    /// Reports per-file progress on `progress`; its length is set on execute.
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Processes every image file of the input folder in sorted name order.
    ///
    /// The output index counts image files only.
    ///
    /// # Errors
    ///
    /// Returns the first read, decode or write error; files written before
    /// it are complete.
    pub fn execute(&self) -> Result<BatchReport> {
        let files = image_files(&self.input_dir)?;
        io::ensure_dir(&self.output_dir)?;
        info!(
            files = files.len(),
            input = %self.input_dir.display(),
            "creating distance maps"
        );

        self.progress.set_length(files.len() as u64);
        let mut report = BatchReport::default();
        for (i, file) in files.iter().enumerate() {
            let image = io::read_gray(file)?;
            let colors =
                color_distance_map(&image, self.segmentation_value, self.pixel_size, &self.spec);
            let output = self.output_dir.join(self.output_pattern.format(i));
            io::write_color_field(&output, &colors, self.channel_order)?;
            debug!(input = %file.display(), output = %output.display(), "distance map written");
            report.written.push(output);
            self.progress.inc(1);
        }
        self.progress.finish();

        info!(written = report.written.len(), "distance maps complete");
        Ok(report)
    }
}

fn image_files(dir: &Path) -> std::result::Result<Vec<PathBuf>, IoError> {
    let entries = std::fs::read_dir(dir).map_err(|e| IoError::file(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| IoError::file(dir, e))?.path();
        if path.is_file() && has_image_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}
