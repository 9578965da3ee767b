//! GCP API interaction module
//!
//! # Module Structure
//!
//! - [`auth`] - Application Default Credentials or a supplied access token
//! - [`client`] - authenticated GET access and URL building
//! - [`http`] - HTTP utilities for REST API calls
//! - [`resourcemanager`] - project and folder describe calls
//!
//! # Example
//!
//! ```ignore
//! use iam_reporter::gcp::{client::GcpClient, resourcemanager};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = GcpClient::new("https://cloudresourcemanager.googleapis.com").await?;
//!     let folder = resourcemanager::get_folder(&client, "1234").await?;
//!     println!("{}", folder.display_name);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;
pub mod resourcemanager;
