//! Configuration Management
//!
//! Optional defaults persisted as JSON under the user config directory.
//! Command-line flags always win over stored values.

use crate::gcp::client::DEFAULT_RESOURCE_MANAGER_ENDPOINT;
use crate::lookup::gcloud::DEFAULT_GCLOUD_BIN;
use crate::lookup::Backend;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT: &str = "iam_policies.json";
pub const DEFAULT_OUTPUT: &str = "iam_report_final.csv";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Exported policy file
    #[serde(default)]
    pub input: Option<PathBuf>,
    /// CSV report destination
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub backend: Option<Backend>,
    /// gcloud executable
    #[serde(default)]
    pub gcloud_bin: Option<String>,
    /// Resource Manager endpoint for the api backend
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("iam-reporter").join("config.json"))
    }

    /// Load configuration from disk, falling back to defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    pub fn effective_input(&self, cli: Option<PathBuf>) -> PathBuf {
        cli.or_else(|| self.input.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT))
    }

    pub fn effective_output(&self, cli: Option<PathBuf>) -> PathBuf {
        cli.or_else(|| self.output.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    pub fn effective_backend(&self, cli: Option<Backend>) -> Backend {
        cli.or(self.backend).unwrap_or_default()
    }

    pub fn effective_gcloud_bin(&self, cli: Option<String>) -> String {
        cli.or_else(|| self.gcloud_bin.clone())
            .unwrap_or_else(|| DEFAULT_GCLOUD_BIN.to_string())
    }

    pub fn effective_endpoint(&self, cli: Option<String>) -> String {
        cli.or_else(|| self.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_RESOURCE_MANAGER_ENDPOINT.to_string())
    }
}
