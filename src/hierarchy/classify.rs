//! Resource classification
//!
//! Decides from a full resource name such as
//! `//cloudresourcemanager.googleapis.com/projects/my-project` whether the
//! policy is attached to a project, a folder, or something the report ignores.

use std::fmt;

const RESOURCE_PREFIX: &str = "//";
const RESOURCE_MANAGER_HOST: &str = "cloudresourcemanager.";

/// Resource kinds that produce report rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Project,
    Folder,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Project => "Project",
            ResourceType::Folder => "Folder",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying a resource name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Project(String),
    Folder(String),
    /// Project ids containing `:` belong to Google-managed projects
    SystemProject(String),
    Unsupported,
}

/// A project or folder with its trailing id extracted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedResource {
    pub resource_type: ResourceType,
    pub resource_id: String,
}

impl Classification {
    /// The resource to report on, if any
    pub fn supported(self) -> Option<ClassifiedResource> {
        match self {
            Classification::Project(id) => Some(ClassifiedResource {
                resource_type: ResourceType::Project,
                resource_id: id,
            }),
            Classification::Folder(id) => Some(ClassifiedResource {
                resource_type: ResourceType::Folder,
                resource_id: id,
            }),
            Classification::SystemProject(_) | Classification::Unsupported => None,
        }
    }
}

/// Classify a full resource name
pub fn classify(resource: &str) -> Classification {
    let Some(rest) = resource.strip_prefix(RESOURCE_PREFIX) else {
        return Classification::Unsupported;
    };
    let Some((host, path)) = rest.split_once('/') else {
        return Classification::Unsupported;
    };
    if !host.starts_with(RESOURCE_MANAGER_HOST) || host.len() == RESOURCE_MANAGER_HOST.len() {
        return Classification::Unsupported;
    }
    let Some((kind, id)) = path.split_once('/') else {
        return Classification::Unsupported;
    };
    if id.is_empty() || id.contains('/') {
        return Classification::Unsupported;
    }

    match kind {
        "projects" if id.contains(':') => Classification::SystemProject(id.to_string()),
        "projects" => Classification::Project(id.to_string()),
        "folders" => Classification::Folder(id.to_string()),
        _ => Classification::Unsupported,
    }
}
