//! Output file naming.

use std::path::{Path, PathBuf};

/// Build the output path for a crop of `source`.
///
/// The result sits next to the source and is named `<stem>_<suffix>.png`,
/// whatever the source's own extension was.
pub fn output_path(source: &Path, suffix: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let name = format!("{}_{}.png", stem, suffix);

    match source.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}
