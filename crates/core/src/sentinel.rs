//! Directories whose existence marks a finished step.
//!
//! Work for a step is produced in a sibling staging directory
//! (`<name>.partial`) and renamed onto the sentinel path only once it is
//! complete, so an interrupted run never leaves a sentinel behind.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::CoreError;

#[derive(Debug, Clone)]
pub struct Sentinel {
    path: PathBuf,
}

impl Sentinel {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The step is done when the sentinel directory exists.
    pub fn is_present(&self) -> bool {
        self.path.is_dir()
    }

    pub fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".partial");
        self.path.with_file_name(name)
    }

    /// Create an empty staging directory, discarding leftovers from an earlier
    /// interrupted run.
    pub fn begin(&self) -> Result<PathBuf, CoreError> {
        let staging = self.staging_path();
        if staging.exists() {
            debug!("removing stale staging dir {}", staging.display());
            fs::remove_dir_all(&staging)?;
        }
        fs::create_dir_all(&staging)?;
        Ok(staging)
    }

    /// Promote the staging directory to the sentinel path.
    pub fn commit(&self) -> Result<(), CoreError> {
        let staging = self.staging_path();
        if self.path.exists() {
            return Err(CoreError::Config(format!(
                "{} appeared while it was being produced",
                self.path.display()
            )));
        }
        fs::rename(&staging, &self.path)?;
        debug!("{} committed", self.path.display());
        Ok(())
    }

    /// Remove the staging directory after a failed step.
    pub fn abandon(&self) {
        let staging = self.staging_path();
        if staging.exists() {
            fs::remove_dir_all(&staging).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_is_a_sibling() {
        let sentinel = Sentinel::new("/work/.data_parquet");
        assert_eq!(sentinel.staging_path(), PathBuf::from("/work/.data_parquet.partial"));

        let relative = Sentinel::new(".data");
        assert_eq!(relative.staging_path(), PathBuf::from(".data.partial"));
    }

    #[test]
    fn absent_until_committed() {
        let tmp = tempfile::tempdir().unwrap();
        let sentinel = Sentinel::new(tmp.path().join(".data"));
        assert!(!sentinel.is_present());

        let staging = sentinel.begin().unwrap();
        fs::write(staging.join("circuits.csv"), "circuitId\n1\n").unwrap();
        assert!(!sentinel.is_present());

        sentinel.commit().unwrap();
        assert!(sentinel.is_present());
        assert!(sentinel.path().join("circuits.csv").is_file());
        assert!(!sentinel.staging_path().exists());
    }

    #[test]
    fn begin_clears_stale_staging() {
        let tmp = tempfile::tempdir().unwrap();
        let sentinel = Sentinel::new(tmp.path().join("out"));

        let staging = sentinel.begin().unwrap();
        fs::write(staging.join("leftover.parquet"), b"junk").unwrap();

        let staging = sentinel.begin().unwrap();
        assert!(staging.is_dir());
        assert_eq!(fs::read_dir(&staging).unwrap().count(), 0);
    }

    #[test]
    fn abandon_removes_staging() {
        let tmp = tempfile::tempdir().unwrap();
        let sentinel = Sentinel::new(tmp.path().join("out"));
        sentinel.begin().unwrap();
        sentinel.abandon();
        assert!(!sentinel.staging_path().exists());
        assert!(!sentinel.is_present());
    }

    #[test]
    fn commit_refuses_to_clobber() {
        let tmp = tempfile::tempdir().unwrap();
        let sentinel = Sentinel::new(tmp.path().join("out"));
        sentinel.begin().unwrap();
        fs::create_dir_all(sentinel.path()).unwrap();
        assert!(sentinel.commit().is_err());
    }
}
