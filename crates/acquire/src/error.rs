use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AcquireError {
    /// The API credential is not in the working directory.
    #[error("credential file {} not found", .path.display())]
    MissingCredential { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("core error: {0}")]
    Core(#[from] paddock_core::CoreError),

    #[error("failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("download tool exited with {}", exit_label(.status))]
    DownloadFailed { status: Option<i32> },

    #[error("expected archive {} after download", .path.display())]
    ArchiveMissing { path: PathBuf },

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("archive entry `{0}` escapes the target directory")]
    UnsafeEntry(String),
}

fn exit_label(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}
