//! Command-line intake: argv to raw option values
//!
//! clap only splits the arguments here. Every value-taking option is kept as
//! a string, so negative or malformed numbers reach the resolver untouched.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;

use crate::config::RawOptions;
use crate::error::ConfigError;

/// resize - batch image resizer
#[derive(Parser, Debug)]
#[command(
    name = "resize",
    version,
    about = "Resize images to a fixed size or by a scale factor",
    long_about = "Resize image files in place or next to the originals. Every option is \
                  validated before any image is opened; an invalid combination is rejected \
                  with a non-zero exit status."
)]
struct Cli {
    /// Width of the resized image (requires --height)
    #[arg(long, value_name = "PIXELS", allow_hyphen_values = true)]
    width: Option<String>,

    /// Height of the resized image (requires --width)
    #[arg(long, value_name = "PIXELS", allow_hyphen_values = true)]
    height: Option<String>,

    /// Scale factor of the resized image (ignored when --width and --height are set)
    #[arg(long, value_name = "FACTOR", allow_hyphen_values = true)]
    scale: Option<String>,

    /// Interpolation for downscaling: nearest, linear, cubic, area, lanczos [default: area]
    #[arg(long = "down_interpolation", value_name = "METHOD", allow_hyphen_values = true)]
    down_interpolation: Option<String>,

    /// Interpolation for upscaling: nearest, linear, cubic, area, lanczos [default: linear]
    #[arg(long = "up_interpolation", value_name = "METHOD", allow_hyphen_values = true)]
    up_interpolation: Option<String>,

    /// JPEG quality, 0-100 [default: 95]
    #[arg(long = "jpeg_quality", value_name = "QUALITY", allow_hyphen_values = true)]
    jpeg_quality: Option<String>,

    /// Number of threads to use [default: all available]
    #[arg(long, value_name = "COUNT", allow_hyphen_values = true)]
    threads: Option<String>,

    /// Output format: jpg, jpeg, png [default: jpg]
    #[arg(long = "output_format", value_name = "FORMAT", allow_hyphen_values = true)]
    output_format: Option<String>,

    /// Suffix appended to the file name when --keep is set [default: _resized]
    #[arg(long, value_name = "SUFFIX", allow_hyphen_values = true)]
    suffix: Option<String>,

    /// Defaults file (.toml or .yaml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Keep original files
    #[arg(long)]
    keep: bool,

    /// Show a progress bar (on unless --verbose or --dry_run)
    #[arg(long)]
    progress: bool,

    /// Resize files in subdirectories
    #[arg(long)]
    recursive: bool,

    /// Verbose mode
    #[arg(long)]
    verbose: bool,

    /// Delete files that failed to resize
    #[arg(long = "delete_fails")]
    delete_fails: bool,

    /// List what would be resized without writing anything
    #[arg(long = "dry_run")]
    dry_run: bool,

    /// Print a summary of the resolved options before running
    #[arg(long)]
    summary: bool,

    /// Files or directories to resize
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,
}

/// Boolean switches of one invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Switches {
    pub keep: bool,
    pub progress: bool,
    pub recursive: bool,
    pub verbose: bool,
    pub delete_fails: bool,
    pub dry_run: bool,
    pub summary: bool,
}

impl Switches {
    /// Whether the progress bar is drawn
    pub fn show_progress(&self) -> bool {
        self.progress && !(self.verbose || self.dry_run)
    }
}

/// Everything the command line asked for, still uninterpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub options: RawOptions,
    pub switches: Switches,
    pub config: Option<PathBuf>,
    pub files: Vec<PathBuf>,
}

/// Outcome of reading the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intake {
    /// Help or version was requested; the rendered text
    Help(String),
    Run(Invocation),
}

/// Split an argument vector (program name first) into an [`Intake`]
pub fn parse_args<I, T>(args: I) -> Result<Intake, ConfigError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(Intake::Run(cli.into())),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                Ok(Intake::Help(err.render().to_string()))
            }
            ErrorKind::UnknownArgument => Err(ConfigError::UnknownOption(unknown_name(&err))),
            _ => Err(ConfigError::Usage(first_line(&err))),
        },
    }
}

fn unknown_name(err: &clap::Error) -> String {
    match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(name)) => name.clone(),
        _ => first_line(err),
    }
}

fn first_line(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let line = rendered.lines().next().unwrap_or_default();
    line.trim_start_matches("error: ").to_string()
}

impl From<Cli> for Invocation {
    fn from(cli: Cli) -> Self {
        Self {
            options: RawOptions {
                width: cli.width,
                height: cli.height,
                scale: cli.scale,
                down_interpolation: cli.down_interpolation,
                up_interpolation: cli.up_interpolation,
                threads: cli.threads,
                jpeg_quality: cli.jpeg_quality,
                output_format: cli.output_format,
                suffix: cli.suffix,
            },
            switches: Switches {
                keep: cli.keep,
                progress: cli.progress || !(cli.verbose || cli.dry_run),
                recursive: cli.recursive,
                verbose: cli.verbose,
                delete_fails: cli.delete_fails,
                dry_run: cli.dry_run,
                summary: cli.summary,
            },
            config: cli.config,
            files: cli.files,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> Invocation {
        let argv = std::iter::once("resize").chain(args.iter().copied());
        match parse_args(argv) {
            Ok(Intake::Run(invocation)) => invocation,
            other => panic!("expected a run, got {:?}", other),
        }
    }

    #[test]
    fn test_raw_values_are_kept_verbatim() {
        let invocation = run(&["--width", "-100", "--height", "A", "--scale", "1.1a"]);
        assert_eq!(invocation.options.width.as_deref(), Some("-100"));
        assert_eq!(invocation.options.height.as_deref(), Some("A"));
        assert_eq!(invocation.options.scale.as_deref(), Some("1.1a"));
    }

    #[test]
    fn test_snake_case_names() {
        let invocation = run(&[
            "--down_interpolation",
            "CUBIC",
            "--up_interpolation",
            "area",
            "--jpeg_quality",
            "0",
            "--output_format",
            "png",
            "--threads",
            "4",
        ]);
        let options = invocation.options;
        assert_eq!(options.down_interpolation.as_deref(), Some("CUBIC"));
        assert_eq!(options.up_interpolation.as_deref(), Some("area"));
        assert_eq!(options.jpeg_quality.as_deref(), Some("0"));
        assert_eq!(options.output_format.as_deref(), Some("png"));
        assert_eq!(options.threads.as_deref(), Some("4"));
    }

    #[test]
    fn test_switches_and_files() {
        let invocation = run(&["--keep", "--recursive", "--delete_fails", "a.jpg", "photos"]);
        assert!(invocation.switches.keep);
        assert!(invocation.switches.recursive);
        assert!(invocation.switches.delete_fails);
        assert!(!invocation.switches.dry_run);
        assert!(invocation.switches.progress);
        assert_eq!(
            invocation.files,
            vec![PathBuf::from("a.jpg"), PathBuf::from("photos")]
        );
    }

    #[test]
    fn test_progress_is_off_when_verbose_or_dry_run() {
        assert!(!run(&["--verbose"]).switches.show_progress());
        assert!(!run(&["--dry_run"]).switches.progress);
        assert!(run(&[]).switches.show_progress());
    }

    #[test]
    fn test_help_short_circuits() {
        match parse_args(["resize", "--help"]) {
            Ok(Intake::Help(text)) => assert!(text.contains("--down_interpolation")),
            other => panic!("expected help, got {:?}", other),
        }
        assert!(matches!(
            parse_args(["resize", "--version"]),
            Ok(Intake::Help(_))
        ));
    }

    #[test]
    fn test_unknown_option() {
        assert_eq!(
            parse_args(["resize", "--dsfhijgsdfklhj"]),
            Err(ConfigError::UnknownOption("--dsfhijgsdfklhj".to_string()))
        );
        assert!(matches!(
            parse_args(["resize", "--extensions", "jpg"]),
            Err(ConfigError::UnknownOption(_))
        ));
    }

    #[test]
    fn test_missing_value_is_a_usage_error() {
        assert!(matches!(
            parse_args(["resize", "--width"]),
            Err(ConfigError::Usage(_))
        ));
    }
}
