//! Name lookups against the resource hierarchy
//!
//! The resolver only needs three describe calls. They sit behind
//! [`NameLookup`] so the report logic does not care whether names come from
//! the `gcloud` CLI or straight from the Resource Manager REST API.
//!
//! - [`gcloud`] - shells out to `gcloud` and parses `--format=value(...)` output
//! - [`api`] - authenticated REST calls through [`crate::gcp::client::GcpClient`]

pub mod api;
pub mod gcloud;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// What a project describe call yields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetails {
    pub display_name: String,
    /// `folder` or `organization`
    pub parent_type: String,
    pub parent_id: String,
}

/// Describe calls used to resolve display names.
///
/// Any `Err` is read by the caller as "not found"; implementations should not
/// retry.
#[allow(async_fn_in_trait)]
pub trait NameLookup {
    /// Display name and parent of a project
    async fn describe_project(&self, project_id: &str) -> Result<ProjectDetails>;

    /// Display name of a folder
    async fn describe_folder(&self, folder_id: &str) -> Result<String>;

    /// Parent path of a folder, e.g. `organizations/1` or `folders/2`
    async fn folder_parent(&self, folder_id: &str) -> Result<String>;
}

impl<L: NameLookup> NameLookup for &L {
    async fn describe_project(&self, project_id: &str) -> Result<ProjectDetails> {
        (**self).describe_project(project_id).await
    }

    async fn describe_folder(&self, folder_id: &str) -> Result<String> {
        (**self).describe_folder(folder_id).await
    }

    async fn folder_parent(&self, folder_id: &str) -> Result<String> {
        (**self).folder_parent(folder_id).await
    }
}

/// Which lookup implementation to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Shell out to the gcloud CLI
    #[default]
    Gcloud,
    /// Call the Cloud Resource Manager REST API
    Api,
}
