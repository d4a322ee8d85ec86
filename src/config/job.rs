//! The resolved resize job and the enumerations it is built from

use std::fmt;
use std::num::{NonZeroU32, NonZeroUsize};

use serde::{Deserialize, Serialize};

/// Target size of the resized images
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// Exact output dimensions in pixels
    Explicit { width: NonZeroU32, height: NonZeroU32 },

    /// Uniform factor applied to both source dimensions (finite, > 0)
    Scale { factor: f32 },
}

impl Geometry {
    /// Output dimensions for a source image of `width` x `height`
    pub fn target_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        match *self {
            Self::Explicit { width, height } => (width.get(), height.get()),
            Self::Scale { factor } => {
                let scale = |side: u32| {
                    let scaled = (f64::from(side) * f64::from(factor)).round();
                    scaled.clamp(1.0, f64::from(u32::MAX)) as u32
                };
                (scale(width), scale(height))
            }
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit { width, height } => write!(f, "{}x{}", width, height),
            Self::Scale { factor } => write!(f, "x{}", factor),
        }
    }
}

/// Resampling kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    Nearest,
    Linear,
    Cubic,
    Area,
    Lanczos,
}

/// Lower-cased token -> kernel
const KERNELS: &[(&str, Interpolation)] = &[
    ("nearest", Interpolation::Nearest),
    ("linear", Interpolation::Linear),
    ("cubic", Interpolation::Cubic),
    ("area", Interpolation::Area),
    ("lanczos", Interpolation::Lanczos),
];

impl Interpolation {
    /// Look up a kernel by name, ignoring case
    pub fn from_token(token: &str) -> Option<Self> {
        lookup(KERNELS, token)
    }

    /// Accepted kernel names
    pub fn names() -> Vec<&'static str> {
        KERNELS.iter().map(|(name, _)| *name).collect()
    }

    /// Canonical name of this kernel
    pub fn name(self) -> &'static str {
        name_of(KERNELS, self)
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Output container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpg,
    Jpeg,
    Png,
}

const FORMATS: &[(&str, OutputFormat)] = &[
    ("jpg", OutputFormat::Jpg),
    ("jpeg", OutputFormat::Jpeg),
    ("png", OutputFormat::Png),
];

impl OutputFormat {
    /// Look up a container by name, ignoring case
    pub fn from_token(token: &str) -> Option<Self> {
        lookup(FORMATS, token)
    }

    /// Accepted container names
    pub fn names() -> Vec<&'static str> {
        FORMATS.iter().map(|(name, _)| *name).collect()
    }

    /// File extension for this format
    pub fn extension(self) -> &'static str {
        name_of(FORMATS, self)
    }

    /// Whether `jpeg_quality` applies to this format
    pub fn is_lossy(self) -> bool {
        matches!(self, Self::Jpg | Self::Jpeg)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

fn lookup<T: Copy>(table: &[(&str, T)], token: &str) -> Option<T> {
    let token = token.to_ascii_lowercase();
    table
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, value)| *value)
}

fn name_of<T: Copy + PartialEq>(table: &[(&'static str, T)], value: T) -> &'static str {
    table
        .iter()
        .find(|(_, v)| *v == value)
        .map_or("unknown", |(name, _)| *name)
}

/// Which way a kernel resamples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Shrinking
    Down,
    /// Enlarging
    Up,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Down => "down",
            Self::Up => "up",
        })
    }
}

/// Numeric options, named as on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Width,
    Height,
    Scale,
    Threads,
    JpegQuality,
}

impl NumericField {
    /// Human-readable constraint on this field's values
    pub fn constraint(self) -> &'static str {
        match self {
            Self::Width | Self::Height | Self::Threads => "must be a positive integer",
            Self::Scale => "must be a positive number",
            Self::JpegQuality => "must be an integer between 0 and 100",
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::Scale => "scale",
            Self::Threads => "threads",
            Self::JpegQuality => "jpeg_quality",
        })
    }
}

/// A fully validated resize operation.
///
/// Only the resolver builds one, so every instance satisfies all of the
/// option constraints; it is read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeJob {
    geometry: Geometry,
    down_interpolation: Interpolation,
    up_interpolation: Interpolation,
    threads: NonZeroUsize,
    jpeg_quality: u8,
    output_format: OutputFormat,
}

impl ResizeJob {
    pub(crate) fn new(
        geometry: Geometry,
        down_interpolation: Interpolation,
        up_interpolation: Interpolation,
        threads: NonZeroUsize,
        jpeg_quality: u8,
        output_format: OutputFormat,
    ) -> Self {
        Self {
            geometry,
            down_interpolation,
            up_interpolation,
            threads,
            jpeg_quality,
            output_format,
        }
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn down_interpolation(&self) -> Interpolation {
        self.down_interpolation
    }

    pub fn up_interpolation(&self) -> Interpolation {
        self.up_interpolation
    }

    /// Kernel for the given direction
    pub fn interpolation(&self, direction: Direction) -> Interpolation {
        match direction {
            Direction::Down => self.down_interpolation,
            Direction::Up => self.up_interpolation,
        }
    }

    /// Number of workers the batch runs on
    pub fn threads(&self) -> usize {
        self.threads.get()
    }

    /// Encoder quality, only used by lossy formats
    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }
}

/// How output files are named
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNaming {
    /// Keep the source file and write next to it with `suffix`
    pub keep: bool,
    pub suffix: String,
}

/// Characters that cannot appear in a suffix
pub(crate) const FORBIDDEN_SUFFIX_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];
