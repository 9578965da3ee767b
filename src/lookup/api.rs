//! Lookups through the Resource Manager REST API
//!
//! Failures carry the friendly status text from
//! [`format_gcp_error`] as their outermost context, so the resolver's
//! warnings read "Permission denied..." ahead of the raw status line.

use super::{NameLookup, ProjectDetails};
use crate::gcp::client::GcpClient;
use crate::gcp::http::format_gcp_error;
use crate::gcp::resourcemanager;
use anyhow::Result;

pub struct ApiLookup {
    client: GcpClient,
}

impl ApiLookup {
    pub fn new(client: GcpClient) -> Self {
        Self { client }
    }
}

fn friendly(error: anyhow::Error) -> anyhow::Error {
    let message = format_gcp_error(&error);
    error.context(message)
}

impl NameLookup for ApiLookup {
    async fn describe_project(&self, project_id: &str) -> Result<ProjectDetails> {
        let project = resourcemanager::get_project(&self.client, project_id)
            .await
            .map_err(friendly)?;
        Ok(ProjectDetails {
            display_name: project.name,
            parent_type: project.parent_type,
            parent_id: project.parent_id,
        })
    }

    async fn describe_folder(&self, folder_id: &str) -> Result<String> {
        let folder = resourcemanager::get_folder(&self.client, folder_id)
            .await
            .map_err(friendly)?;
        Ok(folder.display_name)
    }

    async fn folder_parent(&self, folder_id: &str) -> Result<String> {
        let folder = resourcemanager::get_folder(&self.client, folder_id)
            .await
            .map_err(friendly)?;
        Ok(folder.parent)
    }
}
