//! Display-name resolution for projects and folders
//!
//! Projects and folders resolve their parent along separate paths with
//! different fallbacks: a failed project describe blanks the parent, a failed
//! folder-parent lookup reports [`PARENT_LOOKUP_FAILED`].

use super::cache::NameCache;
use super::classify::{ClassifiedResource, ResourceType};
use crate::lookup::NameLookup;

/// Folder name could not be looked up
pub const FOLDER_NOT_FOUND: &str = "<not found>";
/// Project describe failed or returned something unusable
pub const PROJECT_NOT_FOUND: &str = "<project details not found>";
/// Parent is the organization itself
pub const ORGANIZATION_PARENT: &str = "<Organization>";
/// Folder parent lookup failed
pub const PARENT_LOOKUP_FAILED: &str = "<Parent lookup failed>";

const FOLDER_PATH_PREFIX: &str = "folders/";

/// Names resolved for one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNames {
    pub resource_name: String,
    pub parent_name: String,
}

/// Resolves resource and parent names, memoizing folder names for one run
pub struct HierarchyResolver<L> {
    lookup: L,
    cache: NameCache,
    failed_lookups: usize,
}

impl<L: NameLookup> HierarchyResolver<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            cache: NameCache::new(),
            failed_lookups: 0,
        }
    }

    pub fn cache(&self) -> &NameCache {
        &self.cache
    }

    /// Number of describe calls that ended in a placeholder
    pub fn failed_lookups(&self) -> usize {
        self.failed_lookups
    }

    pub async fn resolve(&mut self, resource: &ClassifiedResource) -> ResolvedNames {
        match resource.resource_type {
            ResourceType::Project => self.resolve_project(&resource.resource_id).await,
            ResourceType::Folder => self.resolve_folder(&resource.resource_id).await,
        }
    }

    async fn resolve_project(&mut self, project_id: &str) -> ResolvedNames {
        let details = match self.lookup.describe_project(project_id).await {
            Ok(details) => details,
            Err(e) => {
                tracing::warn!("Project lookup failed for {}: {:#}", project_id, e);
                self.failed_lookups += 1;
                return ResolvedNames {
                    resource_name: PROJECT_NOT_FOUND.to_string(),
                    parent_name: String::new(),
                };
            }
        };

        let parent_name = if details.parent_type == "folder" {
            self.folder_name(&details.parent_id).await
        } else {
            ORGANIZATION_PARENT.to_string()
        };

        ResolvedNames {
            resource_name: details.display_name,
            parent_name,
        }
    }

    async fn resolve_folder(&mut self, folder_id: &str) -> ResolvedNames {
        let resource_name = self.folder_name(folder_id).await;

        let parent_name = match self.lookup.folder_parent(folder_id).await {
            Ok(path) => match parent_folder_id(&path) {
                Some(parent_id) => self.folder_name(parent_id).await,
                None => ORGANIZATION_PARENT.to_string(),
            },
            Err(e) => {
                tracing::warn!("Parent lookup failed for folder {}: {:#}", folder_id, e);
                self.failed_lookups += 1;
                PARENT_LOOKUP_FAILED.to_string()
            }
        };

        ResolvedNames {
            resource_name,
            parent_name,
        }
    }

    /// Display name of a folder, consulting the cache first
    pub async fn folder_name(&mut self, folder_id: &str) -> String {
        if let Some(name) = self.cache.get(folder_id) {
            return name.to_string();
        }

        let name = match self.lookup.describe_folder(folder_id).await {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!("Folder lookup failed for {}: {:#}", folder_id, e);
                self.failed_lookups += 1;
                FOLDER_NOT_FOUND.to_string()
            }
        };

        self.cache.insert(folder_id, name).to_string()
    }
}

/// Folder id from a parent path like `folders/123`
fn parent_folder_id(path: &str) -> Option<&str> {
    let id = path.trim().strip_prefix(FOLDER_PATH_PREFIX)?;
    (!id.is_empty() && !id.contains('/')).then_some(id)
}
