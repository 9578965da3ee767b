//! Resource Manager describe calls
//!
//! Projects come from the v1 API, which reports the parent as a
//! `{type, id}` pair. Folders come from v3, which reports it as a path.

use super::client::GcpClient;
use anyhow::{Context, Result};
use serde_json::Value;

/// Project as returned by `v1/projects/{id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub parent_type: String,
    pub parent_id: String,
}

impl TryFrom<&Value> for Project {
    type Error = anyhow::Error;

    fn try_from(value: &Value) -> Result<Self> {
        let field = |v: Option<&Value>, name: &str| {
            v.and_then(|v| v.as_str())
                .map(str::to_string)
                .with_context(|| format!("project response has no '{}'", name))
        };
        let parent = value.get("parent");

        Ok(Self {
            name: field(value.get("name"), "name")?,
            parent_type: field(parent.and_then(|p| p.get("type")), "parent.type")?,
            parent_id: field(parent.and_then(|p| p.get("id")), "parent.id")?,
        })
    }
}

/// Folder as returned by `v3/folders/{id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub display_name: String,
    pub parent: String,
}

impl TryFrom<&Value> for Folder {
    type Error = anyhow::Error;

    fn try_from(value: &Value) -> Result<Self> {
        let display_name = value
            .get("displayName")
            .and_then(|v| v.as_str())
            .context("folder response has no 'displayName'")?;

        Ok(Self {
            display_name: display_name.to_string(),
            parent: value
                .get("parent")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
        })
    }
}

/// Describe a single project
pub async fn get_project(client: &GcpClient, project_id: &str) -> Result<Project> {
    let url = client.resourcemanager_url(
        "v1",
        &format!("projects/{}", urlencoding::encode(project_id)),
    );
    let response = client.get(&url).await?;
    Project::try_from(&response)
}

/// Describe a single folder
pub async fn get_folder(client: &GcpClient, folder_id: &str) -> Result<Folder> {
    let url = client.resourcemanager_url(
        "v3",
        &format!("folders/{}", urlencoding::encode(folder_id)),
    );
    let response = client.get(&url).await?;
    Folder::try_from(&response)
}
