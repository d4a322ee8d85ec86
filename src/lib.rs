//! resize - batch image resizer
//!
//! Resizes JPEG and PNG files to a fixed size or by a scale factor, in place
//! or next to the originals, on a pool of worker threads.
//!
//! Command-line options are kept as raw strings until the [`Resolver`]
//! validates all of them at once and produces an immutable [`ResizeJob`].
//! The [`BatchRunner`] then hands every file to a [`ResamplingEngine`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use resize::{resolve, BatchRunner, ImageEngine, OutputNaming, RawOptions};
//! use std::path::PathBuf;
//!
//! let raw = RawOptions::from_pairs([("width", "1920"), ("height", "1080")])?;
//! let job = resolve(&raw)?;
//! let naming = OutputNaming { keep: true, suffix: "_hd".to_string() };
//!
//! let engine = ImageEngine::new();
//! let report = BatchRunner::new(&engine, &job, &naming)
//!     .run(&[PathBuf::from("input.jpg")])?;
//!
//! println!("{} resized, {} failed", report.resized, report.failed());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod intake;
pub mod parallel;
pub mod processing;
pub mod summary;

// Re-export commonly used types
pub use config::{resolve, Config, OutputNaming, RawOptions, ResizeJob, Resolver};
pub use error::{ConfigError, ResizeError, Result};
pub use intake::{parse_args, Intake, Invocation, Switches};
pub use parallel::{BatchReport, BatchRunner};
pub use processing::{collect_files, FileOutcome, ImageEngine, ResamplingEngine};
pub use summary::JobSummary;

use tracing_subscriber::EnvFilter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the global log subscriber, writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise `level` is used as the filter.
/// Calling this more than once is harmless.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        tracing::debug!("resize v{} initialized", VERSION);
    }
}
