//! Orchestration behind the `prepare-data` binary: acquisition, then
//! conversion, then the mapping from failures to exit codes.

pub mod cli;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use paddock_acquire::{acquire, AcquireError, AcquireOutcome, DatasetFetcher};
use paddock_convert::{convert_all, ConvertOutcome, TableReport};
use paddock_core::Config;
use serde::Serialize;

/// Summary of one `prepare` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Files unpacked by this run; `None` when the CSVs were already there.
    pub downloaded_files: Option<usize>,
    /// Tables written by this run; empty when nothing was converted.
    pub tables: Vec<TableReport>,
}

impl RunReport {
    pub fn is_no_op(&self) -> bool {
        self.downloaded_files.is_none() && self.tables.is_empty()
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("failed to write report to {}", path.display()))
    }
}

/// Make sure both the CSV and the Parquet directories exist. Acquisition
/// always runs first; each stage is skipped when its own directory exists.
pub fn prepare(config: &Config, fetcher: &dyn DatasetFetcher) -> Result<RunReport> {
    let downloaded_files = match acquire(config, fetcher).context("data acquisition failed")? {
        AcquireOutcome::Skipped => None,
        AcquireOutcome::Acquired { files } => Some(files),
    };

    let tables = match convert_all(&config.paths).context("parquet conversion failed")? {
        ConvertOutcome::Skipped => Vec::new(),
        ConvertOutcome::Converted(reports) => reports,
    };

    Ok(RunReport {
        downloaded_files,
        tables,
    })
}

/// How a failed run ends: the process exit code, and a message for stdout
/// when the failure is one the user fixes by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exit {
    pub code: u8,
    pub message: Option<String>,
}

/// Map a `prepare` error to its exit. A missing credential is exit 1 with
/// the copy instruction; anything else is exit 2 and the error chain is
/// printed by the caller.
pub fn exit_for(err: &anyhow::Error) -> Exit {
    match err.downcast_ref::<AcquireError>() {
        Some(AcquireError::MissingCredential { path }) => {
            let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            Exit {
                code: 1,
                message: Some(format!("Please copy {name} file to project root!")),
            }
        }
        _ => Exit {
            code: 2,
            message: None,
        },
    }
}
