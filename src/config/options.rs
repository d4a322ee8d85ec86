//! Raw, uninterpreted option values

use crate::error::ConfigError;

/// Option values exactly as they were typed, keyed by option name.
///
/// Nothing here is parsed or checked; that is the resolver's job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOptions {
    pub width: Option<String>,
    pub height: Option<String>,
    pub scale: Option<String>,
    pub down_interpolation: Option<String>,
    pub up_interpolation: Option<String>,
    pub threads: Option<String>,
    pub jpeg_quality: Option<String>,
    pub output_format: Option<String>,
    pub suffix: Option<String>,
}

impl RawOptions {
    /// Build from `(name, value)` pairs. Names may carry a leading `--`.
    ///
    /// A later pair overwrites an earlier one with the same name.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut options = Self::default();
        for (name, value) in pairs {
            *options.slot(name.as_ref())? = Some(value.into());
        }
        Ok(options)
    }

    fn slot(&mut self, name: &str) -> Result<&mut Option<String>, ConfigError> {
        Ok(match name.trim_start_matches("--") {
            "width" => &mut self.width,
            "height" => &mut self.height,
            "scale" => &mut self.scale,
            "down_interpolation" => &mut self.down_interpolation,
            "up_interpolation" => &mut self.up_interpolation,
            "threads" => &mut self.threads,
            "jpeg_quality" => &mut self.jpeg_quality,
            "output_format" => &mut self.output_format,
            "suffix" => &mut self.suffix,
            _ => return Err(ConfigError::UnknownOption(name.to_string())),
        })
    }
}
