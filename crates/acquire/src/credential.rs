use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::AcquireError;

/// Copy the API credential into the tool's config area, readable by the owner only.
pub fn stage_credential(credential: &Path, config_dir: &Path) -> Result<PathBuf, AcquireError> {
    if !credential.is_file() {
        return Err(AcquireError::MissingCredential {
            path: credential.to_path_buf(),
        });
    }

    fs::create_dir_all(config_dir)?;
    let file_name = credential
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "kaggle.json".into());
    let staged = config_dir.join(file_name);
    fs::copy(credential, &staged)?;
    restrict_permissions(&staged)?;

    info!("Credential staged at {}", staged.display());
    Ok(staged)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), AcquireError> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), AcquireError> {
    Ok(())
}
