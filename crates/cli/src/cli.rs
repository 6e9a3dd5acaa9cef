use std::path::PathBuf;

use clap::Parser;
use paddock_core::Config;

/// Download the Formula 1 dataset from Kaggle and convert it to Parquet.
///
/// Both stages are skipped when their output directory already exists.
/// Path and dataset flags override the `PADDOCK_*` environment settings
/// (including profiled ones such as `CI_PADDOCK_RAW_DIR`).
#[derive(Parser, Debug)]
#[command(name = "prepare-data", version, about)]
pub struct CliArgs {
    /// Directory the CSV files are unpacked into.
    #[arg(long)]
    pub raw_dir: Option<PathBuf>,

    /// Directory the Parquet files are written to.
    #[arg(long)]
    pub parquet_dir: Option<PathBuf>,

    /// Kaggle API credential to stage.
    #[arg(long)]
    pub credential: Option<PathBuf>,

    /// Kaggle dataset slug (owner/name).
    #[arg(long)]
    pub dataset: Option<String>,

    /// Executable used to download the dataset.
    #[arg(long)]
    pub download_command: Option<String>,

    /// Write a JSON summary of the run to this file.
    #[arg(long, env = "PADDOCK_REPORT")]
    pub report: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, env = "PADDOCK_VERBOSE")]
    pub verbose: bool,
}

impl CliArgs {
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Layer the flags that were given over the environment config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.raw_dir {
            config.paths.raw_dir = dir.clone();
        }
        if let Some(dir) = &self.parquet_dir {
            config.paths.parquet_dir = dir.clone();
        }
        if let Some(path) = &self.credential {
            config.kaggle.credential_file = path.clone();
        }
        if let Some(dataset) = &self.dataset {
            config.kaggle.dataset = dataset.clone();
        }
        if let Some(command) = &self.download_command {
            config.kaggle.command = command.clone();
        }
    }
}
