use std::cell::Cell;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use paddock_acquire::{AcquireError, DatasetFetcher};
use paddock_cli::{prepare, RunReport};
use paddock_core::config::{archive_file_name, KaggleConfig, PathsConfig};
use paddock_core::Config;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../convert/tests/fixtures/f1")
}

/// Packs the converter fixtures into the archive Kaggle would hand back.
struct FixtureFetcher {
    calls: Cell<usize>,
}

impl DatasetFetcher for FixtureFetcher {
    fn fetch(&self, dataset: &str, dest_dir: &Path) -> Result<PathBuf, AcquireError> {
        self.calls.set(self.calls.get() + 1);
        let path = dest_dir.join(archive_file_name(dataset));
        let mut zip = zip::ZipWriter::new(File::create(&path)?);
        let options = zip::write::SimpleFileOptions::default();
        for entry in fs::read_dir(fixtures())? {
            let entry = entry?;
            zip.start_file(entry.file_name().to_string_lossy().into_owned(), options)?;
            zip.write_all(&fs::read(entry.path())?)?;
        }
        zip.finish()?;
        Ok(path)
    }
}

fn config_in(root: &Path) -> Config {
    Config {
        profile: String::new(),
        paths: PathsConfig {
            raw_dir: root.join(".data"),
            parquet_dir: root.join(".data_parquet"),
        },
        kaggle: KaggleConfig {
            credential_file: root.join("kaggle.json"),
            config_dir: Some(root.join("home/.kaggle")),
            ..KaggleConfig::default()
        },
    }
}

#[test]
fn fresh_run_downloads_then_converts() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_in(tmp.path());
    fs::write(&config.kaggle.credential_file, r#"{"username":"u","key":"k"}"#).unwrap();
    let fetcher = FixtureFetcher { calls: Cell::new(0) };

    let report = prepare(&config, &fetcher).unwrap();

    assert_eq!(fetcher.calls.get(), 1);
    assert_eq!(report.downloaded_files, Some(12));
    assert_eq!(report.tables.len(), 12);
    assert!(config.paths.raw_dir.join("results.csv").is_file());
    assert!(config.paths.parquet_dir.join("results.parquet").is_file());
}

#[test]
fn second_run_is_a_no_op() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_in(tmp.path());
    fs::write(&config.kaggle.credential_file, "{}").unwrap();
    let fetcher = FixtureFetcher { calls: Cell::new(0) };
    prepare(&config, &fetcher).unwrap();

    let marker = config.paths.parquet_dir.join("drivers.parquet");
    let before = fs::metadata(&marker).unwrap().modified().unwrap();
    let report = prepare(&config, &fetcher).unwrap();

    assert!(report.is_no_op());
    assert_eq!(fetcher.calls.get(), 1);
    assert_eq!(fs::metadata(&marker).unwrap().modified().unwrap(), before);
}

#[test]
fn converted_data_without_csvs_still_needs_credential() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_in(tmp.path());
    fs::create_dir_all(&config.paths.parquet_dir).unwrap();
    let fetcher = FixtureFetcher { calls: Cell::new(0) };

    let err = prepare(&config, &fetcher).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<AcquireError>(),
        Some(AcquireError::MissingCredential { .. })
    ));
    assert_eq!(fetcher.calls.get(), 0);
    assert!(!config.paths.raw_dir.exists());
}

#[test]
fn converted_data_without_csvs_downloads_again() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_in(tmp.path());
    fs::write(&config.kaggle.credential_file, "{}").unwrap();
    fs::create_dir_all(&config.paths.parquet_dir).unwrap();
    let fetcher = FixtureFetcher { calls: Cell::new(0) };

    let report = prepare(&config, &fetcher).unwrap();

    assert_eq!(fetcher.calls.get(), 1);
    assert_eq!(report.downloaded_files, Some(12));
    // The converted directory was already there, so nothing is rewritten.
    assert!(report.tables.is_empty());
    assert!(!config.paths.parquet_dir.join("status.parquet").exists());
}

#[test]
fn missing_credential_surfaces_through_anyhow() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_in(tmp.path());
    let fetcher = FixtureFetcher { calls: Cell::new(0) };

    let err = prepare(&config, &fetcher).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<AcquireError>(),
        Some(AcquireError::MissingCredential { .. })
    ));
    assert_eq!(fetcher.calls.get(), 0);
    assert!(!config.paths.parquet_dir.exists());
}

#[test]
fn existing_csvs_skip_download() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_in(tmp.path());
    fs::create_dir_all(&config.paths.raw_dir).unwrap();
    for entry in fs::read_dir(fixtures()).unwrap() {
        let entry = entry.unwrap();
        fs::copy(entry.path(), config.paths.raw_dir.join(entry.file_name())).unwrap();
    }
    let fetcher = FixtureFetcher { calls: Cell::new(0) };

    let report = prepare(&config, &fetcher).unwrap();

    assert_eq!(report.downloaded_files, None);
    assert_eq!(report.tables.len(), 12);
    assert_eq!(fetcher.calls.get(), 0);
}

#[test]
fn report_serializes_to_json() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("report.json");
    let report = RunReport {
        downloaded_files: Some(3),
        tables: Vec::new(),
    };

    report.write_json(&path).unwrap();

    let body = fs::read_to_string(&path).unwrap();
    assert!(body.contains("\"downloaded_files\": 3"));
    assert!(body.contains("\"tables\": []"));
}
