//! Core image processing functionality

use std::fmt;
use std::path::Path;

use crate::config::ResizeJob;
use crate::error::Result;

pub mod discovery;
pub mod formats;
pub mod resize;

pub use discovery::*;
pub use formats::*;
pub use resize::*;

/// What happened to one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Resampled and written to the output path
    Resized { from: (u32, u32), to: (u32, u32) },

    /// Already at the target size; nothing was written
    Unchanged { size: (u32, u32) },
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resized { from, to } => {
                write!(f, "{}x{} -> {}x{}", from.0, from.1, to.0, to.1)
            }
            Self::Unchanged { size } => write!(f, "{}x{} unchanged", size.0, size.1),
        }
    }
}

/// Decodes, resamples and encodes a single image.
///
/// Implementations are shared across the batch workers.
pub trait ResamplingEngine: Send + Sync {
    /// Resize `input` according to `job` and write the result to `output`
    fn process(&self, job: &ResizeJob, input: &Path, output: &Path) -> Result<FileOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display() {
        let resized = FileOutcome::Resized {
            from: (1000, 800),
            to: (500, 400),
        };
        assert_eq!(resized.to_string(), "1000x800 -> 500x400");

        let unchanged = FileOutcome::Unchanged { size: (64, 64) };
        assert_eq!(unchanged.to_string(), "64x64 unchanged");
    }
}
