use std::path::PathBuf;

use image::{GrayImage, Rgb, RgbImage, RgbaImage};
use indicatif::ProgressBar;
use tracing::{debug, info};

use crate::color::ChannelOrder;
use crate::error::{IoError, Result};
use crate::io::{self, IndexPattern};

/// Indices handled by an [`OverlayBatch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayReport {
    pub written: Vec<usize>,
    /// Indices where the base image or the mask was missing.
    pub skipped: Vec<usize>,
}

/// Nearest-neighbor resize: target pixel `x` reads source pixel
/// `floor(x * src_width / width)`.
#[must_use]
pub fn resample_nearest(source: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (src_w, src_h) = source.dimensions();
    if (src_w, src_h) == (width, height) {
        return source.clone();
    }
    if src_w == 0 || src_h == 0 {
        return RgbaImage::new(width, height);
    }
    RgbaImage::from_fn(width, height, |x, y| {
        *source.get_pixel(
            source_index(x, width, src_w),
            source_index(y, height, src_h),
        )
    })
}

fn source_index(target: u32, target_len: u32, source_len: u32) -> u32 {
    let i = u64::from(target) * u64::from(source_len) / u64::from(target_len);
    u32::try_from(i).map_or(source_len - 1, |i| i.min(source_len - 1))
}

/// Blends a colored mask over a gray base image.
///
/// The mask is always resampled to the base size first, so the output has the
/// base resolution; there is no mode that downscales the base instead. Where
/// the base is black it
/// stays black; elsewhere every channel is `g * (1 - a) + m * a` with `a` the
/// mask alpha in `[0, 1]`.
#[must_use]
pub fn composite_overlay(base: &GrayImage, mask: &RgbaImage) -> RgbImage {
    let (width, height) = base.dimensions();
    let mask = resample_nearest(mask, width, height);
    RgbImage::from_fn(width, height, |x, y| {
        let g = base.get_pixel(x, y).0[0];
        if g == 0 {
            return Rgb([0, 0, 0]);
        }
        let [r, gr, b, a] = mask.get_pixel(x, y).0;
        let alpha = f64::from(a) / 255.0;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let blend = |m: u8| {
            (f64::from(g) * (1.0 - alpha) + f64::from(m) * alpha)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Rgb([blend(r), blend(gr), blend(b)])
    })
}

/// Composites a folder of colored masks over a folder of gray base slices.
pub struct OverlayBatch {
    base_dir: PathBuf,
    mask_dir: PathBuf,
    output_dir: PathBuf,
    base_pattern: IndexPattern,
    mask_pattern: IndexPattern,
    output_pattern: IndexPattern,
    channel_order: ChannelOrder,
    output_order: ChannelOrder,
    progress: ProgressBar,
}

impl OverlayBatch {
    /// Creates a batch reading `mip2_%04d.tif` bases and `CbD_mask_%04d.png`
    /// masks, writing `CbD_EM_%04d.png`.
    #[must_use]
    pub fn new(
        base_dir: impl Into<PathBuf>,
        mask_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            base_dir: base_dir.into(),
            mask_dir: mask_dir.into(),
            output_dir: output_dir.into(),
            base_pattern: IndexPattern::new("mip2_", 4, ".tif"),
            mask_pattern: IndexPattern::new("CbD_mask_", 4, ".png"),
            output_pattern: IndexPattern::new("CbD_EM_", 4, ".png"),
            channel_order: ChannelOrder::Rgba,
            output_order: ChannelOrder::Rgba,
            progress: ProgressBar::hidden(),
        }
    }

    #[must_use]
    pub fn with_patterns(
        mut self,
        base: IndexPattern,
        mask: IndexPattern,
        output: IndexPattern,
    ) -> Self {
        self.base_pattern = base;
        self.mask_pattern = mask;
        self.output_pattern = output;
        self
    }

    /// Channel layout the mask files were stored with.
    #[must_use]
    pub fn with_channel_order(mut self, order: ChannelOrder) -> Self {
        self.channel_order = order;
        self
    }

    /// Channel layout of the written overlays.
    #[must_use]
    pub fn with_output_channel_order(mut self, order: ChannelOrder) -> Self {
        self.output_order = order;
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Runs indices `0..n` where `n` is the number of entries in the base
    /// folder. Pairs with a missing file are skipped.
    ///
    /// # Errors
    ///
    /// Returns the first read, decode or write error of an existing pair.
    pub fn execute(&self) -> Result<OverlayReport> {
        let count = std::fs::read_dir(&self.base_dir)
            .map_err(|e| IoError::file(&self.base_dir, e))?
            .count();
        io::ensure_dir(&self.output_dir)?;
        info!(count, base = %self.base_dir.display(), "overlaying masks");

        self.progress.set_length(count as u64);
        let mut report = OverlayReport::default();
        for i in 0..count {
            let base_path = self.base_dir.join(self.base_pattern.format(i));
            let mask_path = self.mask_dir.join(self.mask_pattern.format(i));
            if !base_path.is_file() || !mask_path.is_file() {
                debug!(index = i, "missing base or mask, skipping");
                report.skipped.push(i);
                self.progress.inc(1);
                continue;
            }

            let base = io::read_gray(&base_path)?;
            let mask = io::read_rgba(&mask_path, self.channel_order)?;
            let output = self.output_dir.join(self.output_pattern.format(i));
            io::write_rgb(&output, &composite_overlay(&base, &mask), self.output_order)?;
            debug!(index = i, output = %output.display(), "overlay written");
            report.written.push(i);
            self.progress.inc(1);
        }
        self.progress.finish();

        info!(
            written = report.written.len(),
            skipped = report.skipped.len(),
            "overlays complete"
        );
        Ok(report)
    }
}
