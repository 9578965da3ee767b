//! Resource hierarchy handling
//!
//! - [`classify`] - picks projects and folders out of full resource names
//! - [`cache`] - per-run folder name cache
//! - [`resolver`] - looks up display names for a resource and its parent

pub mod cache;
pub mod classify;
pub mod resolver;

pub use cache::NameCache;
pub use classify::{classify, Classification, ClassifiedResource, ResourceType};
pub use resolver::{
    HierarchyResolver, ResolvedNames, FOLDER_NOT_FOUND, ORGANIZATION_PARENT, PARENT_LOOKUP_FAILED,
    PROJECT_NOT_FOUND,
};
