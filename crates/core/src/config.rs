use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Kaggle slug of the Formula 1 World Championship dataset.
pub const DEFAULT_DATASET: &str = "rohanrao/formula-1-world-championship-1950-2020";

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

/// File name the download tool leaves behind: the slug's last segment plus `.zip`.
pub fn archive_file_name(dataset: &str) -> String {
    let name = dataset.rsplit('/').next().unwrap_or(dataset);
    format!("{}.zip", name)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub paths: PathsConfig,
    pub kaggle: KaggleConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `PADDOCK_PROFILE`. When set (e.g. `CI`), every key
    /// is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("PADDOCK_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            paths: PathsConfig::from_env_profiled(p),
            kaggle: KaggleConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs. The credential contents are never read here.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  paths:   raw_dir={}, parquet_dir={}",
            self.paths.raw_dir.display(),
            self.paths.parquet_dir.display()
        );
        tracing::info!(
            "  kaggle:  dataset={}, command={}, credential={}",
            self.kaggle.dataset,
            self.kaggle.command,
            self.kaggle.credential_file.display()
        );
    }
}

// ── Paths ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Sentinel directory holding the unpacked CSV files.
    pub raw_dir: PathBuf,
    /// Sentinel directory holding one Parquet file per table.
    pub parquet_dir: PathBuf,
}

impl PathsConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            raw_dir: PathBuf::from(profiled_env_or(p, "PADDOCK_RAW_DIR", ".data")),
            parquet_dir: PathBuf::from(profiled_env_or(p, "PADDOCK_PARQUET_DIR", ".data_parquet")),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from(".data"),
            parquet_dir: PathBuf::from(".data_parquet"),
        }
    }
}

// ── Kaggle ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KaggleConfig {
    /// API credential expected in the working directory.
    pub credential_file: PathBuf,
    /// Override for the user config area (`KAGGLE_CONFIG_DIR`).
    pub config_dir: Option<PathBuf>,
    /// Dataset slug, `owner/name`.
    pub dataset: String,
    /// Download tool executable.
    pub command: String,
}

impl KaggleConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            credential_file: PathBuf::from(profiled_env_or(p, "PADDOCK_CREDENTIAL_FILE", "kaggle.json")),
            config_dir: profiled_env_opt(p, "KAGGLE_CONFIG_DIR").map(PathBuf::from),
            dataset: profiled_env_or(p, "PADDOCK_DATASET", DEFAULT_DATASET),
            command: profiled_env_or(p, "PADDOCK_DOWNLOAD_COMMAND", "kaggle"),
        }
    }

    pub fn archive_name(&self) -> String {
        archive_file_name(&self.dataset)
    }

    /// Where the staged credential lives: `config_dir` if set, else `$HOME/.kaggle`.
    pub fn resolve_config_dir(&self) -> Result<PathBuf, CoreError> {
        if let Some(dir) = &self.config_dir {
            return Ok(dir.clone());
        }
        dirs::home_dir()
            .map(|home| home.join(".kaggle"))
            .ok_or_else(|| CoreError::Config("home directory could not be determined".into()))
    }
}

impl Default for KaggleConfig {
    fn default() -> Self {
        Self {
            credential_file: PathBuf::from("kaggle.json"),
            config_dir: None,
            dataset: DEFAULT_DATASET.to_string(),
            command: "kaggle".to_string(),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────
