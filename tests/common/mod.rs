//! Shared fixtures for integration tests

#![allow(dead_code)]

use iam_reporter::lookup::{NameLookup, ProjectDetails};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;

/// Lookup backed by fixed answers, recording every call it receives
#[derive(Default)]
pub struct ScriptedLookup {
    projects: HashMap<String, ProjectDetails>,
    folders: HashMap<String, String>,
    parents: HashMap<String, String>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(mut self, id: &str, name: &str, parent_type: &str, parent_id: &str) -> Self {
        self.projects.insert(
            id.to_string(),
            ProjectDetails {
                display_name: name.to_string(),
                parent_type: parent_type.to_string(),
                parent_id: parent_id.to_string(),
            },
        );
        self
    }

    pub fn folder(mut self, id: &str, name: &str) -> Self {
        self.folders.insert(id.to_string(), name.to_string());
        self
    }

    pub fn folder_parent(mut self, id: &str, parent: &str) -> Self {
        self.parents.insert(id.to_string(), parent.to_string());
        self
    }

    /// Calls recorded as `describe_folder:<id>` and so on
    pub fn count(&self, call: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.borrow().len()
    }

    fn record(&self, call: &str, id: &str) {
        self.calls.borrow_mut().push(format!("{}:{}", call, id));
    }
}

impl NameLookup for ScriptedLookup {
    async fn describe_project(&self, project_id: &str) -> anyhow::Result<ProjectDetails> {
        self.record("describe_project", project_id);
        self.projects
            .get(project_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("project {} not found", project_id))
    }

    async fn describe_folder(&self, folder_id: &str) -> anyhow::Result<String> {
        self.record("describe_folder", folder_id);
        self.folders
            .get(folder_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("folder {} not found", folder_id))
    }

    async fn folder_parent(&self, folder_id: &str) -> anyhow::Result<String> {
        self.record("folder_parent", folder_id);
        self.parents
            .get(folder_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("folder {} not found", folder_id))
    }
}

pub fn project_resource(id: &str) -> String {
    format!("//cloudresourcemanager.googleapis.com/projects/{}", id)
}

pub fn folder_resource(id: &str) -> String {
    format!("//cloudresourcemanager.googleapis.com/folders/{}", id)
}

/// A policy document as the asset export writes it
pub fn policy_doc(resource: &str, org: &str, bindings: Value) -> Value {
    json!({
        "resource": resource,
        "organization": format!("organizations/{}", org),
        "policy": {"bindings": bindings}
    })
}
