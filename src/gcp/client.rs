//! GCP Client
//!
//! Authenticated GET access to the Cloud Resource Manager API.

use super::auth::GcpCredentials;
use super::http::GcpHttpClient;
use anyhow::{Context, Result};
use serde_json::Value;

/// Public Resource Manager endpoint
pub const DEFAULT_RESOURCE_MANAGER_ENDPOINT: &str = "https://cloudresourcemanager.googleapis.com";

/// Main GCP client
#[derive(Clone)]
pub struct GcpClient {
    pub credentials: GcpCredentials,
    pub http: GcpHttpClient,
    endpoint: String,
}

impl GcpClient {
    /// Create a client using Application Default Credentials
    pub async fn new(endpoint: &str) -> Result<Self> {
        let credentials = GcpCredentials::new()
            .await
            .context("Failed to initialize GCP credentials")?;

        Self::with_credentials(credentials, endpoint)
    }

    pub fn with_credentials(credentials: GcpCredentials, endpoint: &str) -> Result<Self> {
        Ok(Self {
            credentials,
            http: GcpHttpClient::new()?,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Make a GET request to a GCP API
    pub async fn get(&self, url: &str) -> Result<Value> {
        let token = self.credentials.get_token().await?;
        self.http.get(url, &token).await
    }

    /// Build a versioned Resource Manager API URL
    pub fn resourcemanager_url(&self, version: &str, path: &str) -> String {
        format!("{}/{}/{}", self.endpoint, version, path)
    }
}
