use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::ZipArchive;

use crate::error::AcquireError;

/// Unpack every entry of `archive` under `target`, keeping relative paths.
/// Returns the extracted file paths.
pub fn extract_zip(archive: &Path, target: &Path) -> Result<Vec<PathBuf>, AcquireError> {
    let file = File::open(archive)?;
    let mut archive = ZipArchive::new(file)?;
    let mut extracted = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let relative = match entry.enclosed_name() {
            Some(path) => path.to_path_buf(),
            None => return Err(AcquireError::UnsafeEntry(entry.name().to_string())),
        };
        let out_path = target.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&out_path)?;
        let bytes = io::copy(&mut entry, &mut out)?;
        debug!("Extracted {} ({} bytes)", out_path.display(), bytes);
        extracted.push(out_path);
    }

    Ok(extracted)
}
