use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run_in(dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_prepare-data"))
        .current_dir(dir)
        .env_remove("PADDOCK_PROFILE")
        .env_remove("PADDOCK_RAW_DIR")
        .env_remove("PADDOCK_PARQUET_DIR")
        .env_remove("PADDOCK_CREDENTIAL_FILE")
        .env_remove("PADDOCK_REPORT")
        .env_remove("PADDOCK_DATASET")
        .env("KAGGLE_CONFIG_DIR", dir.join("home/.kaggle"))
        .env("PADDOCK_DOWNLOAD_COMMAND", "paddock-no-such-download-tool")
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

#[test]
fn missing_credential_exits_one() {
    let tmp = tempfile::tempdir().unwrap();

    let output = run_in(tmp.path());

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "Please copy kaggle.json file to project root!"
    );
    assert!(!tmp.path().join(".data").exists());
}

#[test]
fn converted_data_alone_does_not_skip_credential_check() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir(tmp.path().join(".data_parquet")).unwrap();

    let output = run_in(tmp.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Please copy kaggle.json"));
}

#[test]
fn both_directories_present_exits_zero() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir(tmp.path().join(".data")).unwrap();
    fs::create_dir(tmp.path().join(".data_parquet")).unwrap();

    let output = run_in(tmp.path());

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(fs::read_dir(tmp.path().join(".data_parquet")).unwrap().count(), 0);
}

#[test]
fn failing_download_tool_exits_two() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("kaggle.json"), "{}").unwrap();

    let output = run_in(tmp.path());

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("data acquisition failed"));
    assert!(!tmp.path().join(".data").exists());
}
