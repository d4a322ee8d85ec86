//! Input format detection and output file naming

use std::path::{Path, PathBuf};

use crate::config::{OutputFormat, OutputNaming};

/// Extensions read as input images
pub fn supported_input_formats() -> &'static [&'static str] {
    &["jpg", "jpeg", "png"]
}

/// Check if a file extension is supported for input
pub fn is_supported_input_format(extension: &str) -> bool {
    supported_input_formats()
        .iter()
        .any(|&fmt| fmt.eq_ignore_ascii_case(extension))
}

/// Check a path's extension against the supported inputs
pub fn has_supported_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, is_supported_input_format)
}

/// Where the resized copy of `input` is written.
///
/// Same directory and stem, plus the suffix when originals are kept, with
/// the extension of `format`.
pub fn output_path<P: AsRef<Path>>(
    input: P,
    naming: &OutputNaming,
    format: OutputFormat,
) -> PathBuf {
    let input = input.as_ref();
    let mut name = input
        .file_stem()
        .map(|stem| stem.to_os_string())
        .unwrap_or_default();

    if naming.keep {
        name.push(&naming.suffix);
    }
    name.push(".");
    name.push(format.extension());

    input.with_file_name(name)
}
