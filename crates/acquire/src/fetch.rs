use std::path::{Path, PathBuf};
use std::process::Command;

use paddock_core::config::{archive_file_name, KaggleConfig};
use tracing::{debug, info};

use crate::error::AcquireError;

/// Something that can put a dataset archive on local disk.
pub trait DatasetFetcher {
    /// Download `dataset` into `dest_dir`, returning the archive path.
    fn fetch(&self, dataset: &str, dest_dir: &Path) -> Result<PathBuf, AcquireError>;
}

/// Shells out to the Kaggle CLI (`kaggle datasets download -d <slug> -p <dir>`).
#[derive(Debug, Clone)]
pub struct KaggleCli {
    command: String,
    config_dir: Option<PathBuf>,
}

impl KaggleCli {
    pub fn from_config(config: &KaggleConfig) -> Self {
        Self {
            command: config.command.clone(),
            config_dir: config.config_dir.clone(),
        }
    }
}

impl DatasetFetcher for KaggleCli {
    fn fetch(&self, dataset: &str, dest_dir: &Path) -> Result<PathBuf, AcquireError> {
        let mut cmd = Command::new(&self.command);
        cmd.args(["datasets", "download", "-d", dataset, "-p"]).arg(dest_dir);
        // Point the tool at the staged credential when it is not under $HOME.
        if let Some(dir) = &self.config_dir {
            cmd.env("KAGGLE_CONFIG_DIR", dir);
        }
        debug!(?cmd, "running download tool");

        info!("Downloading {} ...", dataset);
        let status = cmd.status().map_err(|source| AcquireError::Spawn {
            command: self.command.clone(),
            source,
        })?;
        if !status.success() {
            return Err(AcquireError::DownloadFailed {
                status: status.code(),
            });
        }

        let archive = dest_dir.join(archive_file_name(dataset));
        if !archive.is_file() {
            return Err(AcquireError::ArchiveMissing { path: archive });
        }
        Ok(archive)
    }
}
