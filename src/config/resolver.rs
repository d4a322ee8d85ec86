//! Turns raw option values into a validated [`ResizeJob`]

use std::num::{IntErrorKind, NonZeroU32, NonZeroUsize};

use crate::config::job::FORBIDDEN_SUFFIX_CHARS;
use crate::config::{
    Direction, Geometry, Interpolation, JobDefaults, NumericField, OutputFormat, OutputNaming,
    RawOptions, ResizeJob,
};
use crate::error::ConfigError;

/// Resolve `raw` against the built-in defaults
pub fn resolve(raw: &RawOptions) -> Result<ResizeJob, ConfigError> {
    Resolver::new(&JobDefaults::default()).resolve(raw)
}

/// Option resolver bound to a set of defaults
pub struct Resolver<'a> {
    defaults: &'a JobDefaults,
}

impl<'a> Resolver<'a> {
    pub fn new(defaults: &'a JobDefaults) -> Self {
        Self { defaults }
    }

    /// Validate every option and build the job, or report the first problem.
    ///
    /// Order: geometry, down then up interpolation, threads, quality, format.
    pub fn resolve(&self, raw: &RawOptions) -> Result<ResizeJob, ConfigError> {
        let geometry = resolve_geometry(raw)?;
        let down = self.resolve_interpolation(Direction::Down, raw.down_interpolation.as_deref())?;
        let up = self.resolve_interpolation(Direction::Up, raw.up_interpolation.as_deref())?;
        let threads = self.resolve_threads(raw.threads.as_deref())?;
        let jpeg_quality = self.resolve_quality(raw.jpeg_quality.as_deref())?;
        let output_format = self.resolve_format(raw.output_format.as_deref())?;

        Ok(ResizeJob::new(
            geometry,
            down,
            up,
            threads,
            jpeg_quality,
            output_format,
        ))
    }

    /// Resolve how output files are named
    pub fn resolve_naming(
        &self,
        raw: &RawOptions,
        keep: bool,
    ) -> Result<OutputNaming, ConfigError> {
        let suffix = raw.suffix.as_deref().unwrap_or(&self.defaults.suffix);
        validate_suffix(suffix)?;
        Ok(OutputNaming {
            keep,
            suffix: suffix.to_string(),
        })
    }

    fn resolve_interpolation(
        &self,
        direction: Direction,
        token: Option<&str>,
    ) -> Result<Interpolation, ConfigError> {
        let Some(token) = token else {
            return Ok(match direction {
                Direction::Down => self.defaults.down_interpolation,
                Direction::Up => self.defaults.up_interpolation,
            });
        };
        Interpolation::from_token(token).ok_or_else(|| ConfigError::InvalidInterpolation {
            direction,
            token: token.to_string(),
        })
    }

    fn resolve_threads(&self, value: Option<&str>) -> Result<NonZeroUsize, ConfigError> {
        let Some(value) = value else {
            return Ok(self.defaults.thread_count());
        };
        let threads = parse_integer(NumericField::Threads, value)?;
        usize::try_from(threads)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| ConfigError::out_of_range(NumericField::Threads, value))
    }

    fn resolve_quality(&self, value: Option<&str>) -> Result<u8, ConfigError> {
        let Some(value) = value else {
            return Ok(self.defaults.jpeg_quality);
        };
        let quality = parse_integer(NumericField::JpegQuality, value)?;
        match u8::try_from(quality) {
            Ok(quality) if quality <= 100 => Ok(quality),
            _ => Err(ConfigError::out_of_range(NumericField::JpegQuality, value)),
        }
    }

    fn resolve_format(&self, token: Option<&str>) -> Result<OutputFormat, ConfigError> {
        let Some(token) = token else {
            return Ok(self.defaults.output_format);
        };
        OutputFormat::from_token(token).ok_or_else(|| ConfigError::InvalidFormat(token.to_string()))
    }
}

/// Explicit width/height, if either is present, wins over scale
fn resolve_geometry(raw: &RawOptions) -> Result<Geometry, ConfigError> {
    match (raw.width.as_deref(), raw.height.as_deref(), raw.scale.as_deref()) {
        (Some(width), Some(height), _) => Ok(Geometry::Explicit {
            width: parse_dimension(NumericField::Width, width)?,
            height: parse_dimension(NumericField::Height, height)?,
        }),
        (Some(_), None, _) | (None, Some(_), _) => Err(ConfigError::IncompleteGeometry),
        (None, None, Some(scale)) => Ok(Geometry::Scale {
            factor: parse_scale(scale)?,
        }),
        (None, None, None) => Err(ConfigError::MissingGeometry),
    }
}

/// Parse a signed integer so that negative input is a range error, not a syntax one
fn parse_integer(field: NumericField, value: &str) -> Result<i64, ConfigError> {
    value.trim().parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            ConfigError::out_of_range(field, value)
        }
        _ => ConfigError::invalid_number(field, value),
    })
}

fn parse_dimension(field: NumericField, value: &str) -> Result<NonZeroU32, ConfigError> {
    let parsed = parse_integer(field, value)?;
    u32::try_from(parsed)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or_else(|| ConfigError::out_of_range(field, value))
}

fn parse_scale(value: &str) -> Result<f32, ConfigError> {
    let factor = value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|f| f.is_finite())
        .ok_or_else(|| ConfigError::invalid_number(NumericField::Scale, value))?;
    if factor <= 0.0 {
        return Err(ConfigError::out_of_range(NumericField::Scale, value));
    }
    Ok(factor)
}

pub(crate) fn validate_suffix(suffix: &str) -> Result<(), ConfigError> {
    if suffix.contains(FORBIDDEN_SUFFIX_CHARS) {
        return Err(ConfigError::InvalidSuffix(suffix.to_string()));
    }
    Ok(())
}
