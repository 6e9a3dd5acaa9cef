//! prepare-data: fetch the Formula 1 dataset and convert it to Parquet.

use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use paddock_acquire::KaggleCli;
use paddock_cli::cli::CliArgs;
use paddock_cli::{exit_for, prepare};
use paddock_core::config::load_dotenv;
use paddock_core::{logging, Config};

fn main() -> ExitCode {
    load_dotenv();
    let args = CliArgs::parse();

    if let Err(e) = logging::init(args.log_level()) {
        eprintln!("warning: {e}");
    }

    let mut config = Config::from_env();
    args.apply(&mut config);
    config.log_summary();

    let fetcher = KaggleCli::from_config(&config.kaggle);
    let report = match prepare(&config, &fetcher) {
        Ok(report) => report,
        Err(err) => {
            let exit = exit_for(&err);
            match exit.message {
                Some(message) => println!("{message}"),
                None => eprintln!("Error: {err:?}"),
            }
            return ExitCode::from(exit.code);
        }
    };

    if report.is_no_op() {
        info!("Nothing to do");
    } else {
        info!(
            tables = report.tables.len(),
            downloaded = report.downloaded_files.unwrap_or(0),
            "Data preparation complete"
        );
    }

    if let Some(path) = &args.report {
        if let Err(err) = report.write_json(path) {
            eprintln!("Error: {err:?}");
            return ExitCode::from(2);
        }
    }
    ExitCode::SUCCESS
}
