//! Acquisition stage: stage the Kaggle credential, download the dataset
//! archive and unpack it into the raw sentinel directory.

pub mod archive;
pub mod credential;
pub mod error;
pub mod fetch;

use std::fs;
use std::path::{Path, PathBuf};

use paddock_core::{Config, Sentinel};
use tracing::{info, warn};

pub use archive::extract_zip;
pub use credential::stage_credential;
pub use error::AcquireError;
pub use fetch::{DatasetFetcher, KaggleCli};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquireOutcome {
    /// The raw directory already existed; nothing was touched.
    Skipped,
    /// The archive was downloaded and unpacked.
    Acquired { files: usize },
}

/// Make sure the raw CSV directory exists, downloading it if necessary.
pub fn acquire(config: &Config, fetcher: &dyn DatasetFetcher) -> Result<AcquireOutcome, AcquireError> {
    let sentinel = Sentinel::new(&config.paths.raw_dir);
    if sentinel.is_present() {
        info!("CSV data already available at {}", sentinel.path().display());
        return Ok(AcquireOutcome::Skipped);
    }

    let credential = &config.kaggle.credential_file;
    if !credential.is_file() {
        return Err(AcquireError::MissingCredential {
            path: credential.clone(),
        });
    }
    let config_dir = config.kaggle.resolve_config_dir()?;
    stage_credential(credential, &config_dir)?;

    let download_dir = download_dir_for(sentinel.path());
    fs::create_dir_all(&download_dir)?;
    let archive = fetcher.fetch(&config.kaggle.dataset, &download_dir)?;

    let staging = sentinel.begin()?;
    let files = match extract_zip(&archive, &staging) {
        Ok(files) => files,
        Err(e) => {
            sentinel.abandon();
            return Err(e);
        }
    };
    sentinel.commit()?;
    discard_archive(&archive);

    info!(
        "Data downloaded and unzipped: {} files in {}",
        files.len(),
        sentinel.path().display()
    );
    Ok(AcquireOutcome::Acquired { files: files.len() })
}

/// The raw directory is already committed here, so a leftover archive is
/// only worth a warning.
fn discard_archive(archive: &Path) {
    if let Err(e) = fs::remove_file(archive) {
        warn!("Could not remove archive {}: {}", archive.display(), e);
    }
}

/// The archive lands next to the raw directory (the working directory by default).
fn download_dir_for(raw_dir: &Path) -> PathBuf {
    match raw_dir.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_dir_defaults_to_cwd() {
        assert_eq!(download_dir_for(Path::new(".data")), PathBuf::from("."));
        assert_eq!(download_dir_for(Path::new("/work/f1/.data")), PathBuf::from("/work/f1"));
    }

    #[test]
    fn discard_archive_tolerates_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("f1.zip");
        std::fs::write(&archive, b"zip").unwrap();

        discard_archive(&archive);
        assert!(!archive.exists());

        // Already gone: logged, not fatal.
        discard_archive(&archive);
    }
}
