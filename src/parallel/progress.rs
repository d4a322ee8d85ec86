//! Progress display for batch runs

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

const TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({per_sec}, {eta}) {msg}";

/// Progress bar over `len` files, drawn on stderr.
///
/// A hidden bar is returned when `visible` is false, so callers never
/// branch on whether progress is shown.
pub fn batch_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(len as u64);
    match ProgressStyle::with_template(TEMPLATE) {
        Ok(style) => bar.set_style(style.progress_chars("#>-")),
        Err(e) => debug!("Falling back to the default progress style: {}", e),
    }
    bar
}

/// Short label for the file currently being worked on
pub fn file_label(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
