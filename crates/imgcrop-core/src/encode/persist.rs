//! Atomic file persistence.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::CropError;

/// Write `bytes` to `path` so that readers see either the old file or the
/// complete new one.
///
/// The data goes to a hidden temporary file in the same directory, which is
/// then renamed over `path`. On failure the temporary file is removed and
/// `path` is left untouched.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CropError> {
    let tmp = temp_path(path);

    let result = write_and_sync(&tmp, bytes).and_then(|_| fs::rename(&tmp, path));
    if let Err(e) = result {
        // Best effort: the temp file may not exist if creation failed
        let _ = fs::remove_file(&tmp);
        return Err(CropError::Io(e));
    }

    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
}
