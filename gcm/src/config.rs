//! Declarative configuration: `workingCopies.yaml`.
//!
//! Resolution order mirrors the original tool: first `./workingCopies.yaml`
//! in the current directory, then `~/workingCopies.yaml`. Unknown YAML
//! fields are tolerated (serde's default — we never set
//! `deny_unknown_fields`).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::PipelineError;

pub const CONFIG_FILE_NAME: &str = "workingCopies.yaml";

/// The default clone rate (repositories/second) applied when a host omits
/// `rateLimitPerSecond` or sets it to `0`. Tuned (in the original tool) to
/// minimize clone error rate on a few hundred repositories.
pub const DEFAULT_RATE_LIMIT_PER_SECOND: u32 = 7;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default, rename = "gitlab")]
    pub hosts: Vec<HostConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HostConfig {
    #[serde(rename = "tokenEnvVar")]
    pub token_env_var: String,
    #[serde(rename = "hostName")]
    pub host_name: String,
    #[serde(rename = "cloneDirectory")]
    pub clone_directory: String,
    #[serde(default, rename = "rateLimitPerSecond")]
    pub rate_limit_per_second: u32,
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
    #[serde(default)]
    pub projects: Vec<DirectProjectConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupConfig {
    pub name: String,
    #[serde(default, rename = "cloneArchived")]
    pub clone_archived: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectProjectConfig {
    pub name: String,
    #[serde(rename = "fullPath")]
    pub full_path: String,
}

impl HostConfig {
    /// Resolves the API token from the environment. Empty/unset yields
    /// `None`, which is the host-skip condition.
    pub fn token(&self) -> Option<String> {
        if self.token_env_var.is_empty() {
            return None;
        }
        std::env::var(&self.token_env_var)
            .ok()
            .filter(|value| !value.is_empty())
    }

    pub fn rate_limit_per_second(&self) -> u32 {
        if self.rate_limit_per_second == 0 {
            DEFAULT_RATE_LIMIT_PER_SECOND
        } else {
            self.rate_limit_per_second
        }
    }

    pub fn base_url(&self) -> String {
        format!("https://{}/api/v4", self.host_name)
    }
}

/// Loads `workingCopies.yaml`, searching `.` then `$HOME`.
pub fn load_config() -> Result<AppConfig, PipelineError> {
    let path = resolve_config_path(Path::new("."), dirs::home_dir().as_deref())
        .ok_or(PipelineError::ConfigNotFound)?;
    let data = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&data)?;
    Ok(config)
}

fn resolve_config_path(cwd: &Path, home: Option<&Path>) -> Option<PathBuf> {
    let in_cwd = cwd.join(CONFIG_FILE_NAME);
    if in_cwd.is_file() {
        return Some(in_cwd);
    }
    let in_home = home?.join(CONFIG_FILE_NAME);
    in_home.is_file().then_some(in_home)
}
