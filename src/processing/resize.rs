//! Resampling backed by the `image` crate

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageFormat};
use tracing::debug;

use crate::config::{Direction, Interpolation, ResizeJob};
use crate::error::{ResizeError, Result};
use crate::processing::{FileOutcome, ResamplingEngine};

impl From<Interpolation> for FilterType {
    fn from(kernel: Interpolation) -> Self {
        match kernel {
            Interpolation::Nearest => FilterType::Nearest,
            Interpolation::Linear => FilterType::Triangle,
            Interpolation::Cubic => FilterType::CatmullRom,
            // No box filter in `image`; triangle is the closest area average
            Interpolation::Area => FilterType::Triangle,
            Interpolation::Lanczos => FilterType::Lanczos3,
        }
    }
}

/// Resampling direction for a `from` -> `to` resize, by pixel count
pub fn direction(from: (u32, u32), to: (u32, u32)) -> Direction {
    let area = |(w, h): (u32, u32)| u64::from(w) * u64::from(h);
    if area(to) > area(from) {
        Direction::Up
    } else {
        Direction::Down
    }
}

/// [`ResamplingEngine`] that decodes with `image`, resamples with
/// [`DynamicImage::resize_exact`] and encodes JPEG or PNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageEngine;

impl ImageEngine {
    pub fn new() -> Self {
        Self
    }

    fn encode(&self, image: &DynamicImage, job: &ResizeJob, output: &Path) -> Result<()> {
        let format = job.output_format();
        if !format.is_lossy() {
            return image
                .save_with_format(output, ImageFormat::Png)
                .map_err(|e| ResizeError::encode(output, e));
        }

        let file = File::create(output).map_err(|e| ResizeError::encode(output, e.into()))?;
        let mut writer = BufWriter::new(file);

        // The encoder's scale starts at 1
        let quality = job.jpeg_quality().max(1);
        let rgb = image.to_rgb8();
        JpegEncoder::new_with_quality(&mut writer, quality)
            .encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)
            .map_err(|e| ResizeError::encode(output, e))?;

        writer
            .flush()
            .map_err(|e| ResizeError::encode(output, e.into()))
    }
}

/// Largest accepted side of a resized image, in pixels
pub const MAX_DIMENSION: u32 = 32_768;

/// Largest accepted pixel count of a resized image
pub const MAX_PIXELS: u64 = 500_000_000;

/// Reject target sizes the engine would not be able to allocate
fn check_target_size(file: &Path, (width, height): (u32, u32)) -> Result<()> {
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(ResizeError::image_too_large(
            file,
            width,
            height,
            u64::from(MAX_DIMENSION),
        ));
    }
    if u64::from(width) * u64::from(height) > MAX_PIXELS {
        return Err(ResizeError::image_too_large(file, width, height, MAX_PIXELS));
    }
    Ok(())
}

impl ResamplingEngine for ImageEngine {
    fn process(&self, job: &ResizeJob, input: &Path, output: &Path) -> Result<FileOutcome> {
        let image = image::open(input).map_err(|e| ResizeError::decode(input, e))?;

        let from = (image.width(), image.height());
        let to = job.geometry().target_dimensions(from.0, from.1);

        if to == from {
            debug!("{:?} is already {}x{}", input, from.0, from.1);
            return Ok(FileOutcome::Unchanged { size: from });
        }

        check_target_size(input, to)?;

        let kernel = job.interpolation(direction(from, to));
        debug!(
            "Resizing {:?}: {}x{} -> {}x{} ({})",
            input, from.0, from.1, to.0, to.1, kernel
        );

        let resized = image.resize_exact(to.0, to.1, kernel.into());
        self.encode(&resized, job, output)?;

        Ok(FileOutcome::Resized { from, to })
    }
}
