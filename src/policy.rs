//! IAM policy export model
//!
//! Mirrors the subset of `gcloud asset search-all-iam-policies` output the
//! report needs. Absent fields deserialize to empty values so a sparse export
//! never fails to load.

use crate::error::{ReportError, Result};
use serde::Deserialize;
use std::path::Path;

/// Organization id used when a document carries no `organization` field
const UNKNOWN_ORGANIZATION: &str = "organizations/UNKNOWN";

/// One entry of the exported policy collection
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyDocument {
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub policy: Policy,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Policy {
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

/// A role granted to a list of principals
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Binding {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub members: Vec<String>,
}

impl PolicyDocument {
    /// Bare organization id, e.g. `123` for `organizations/123`
    pub fn organization_id(&self) -> &str {
        let organization = self.organization.as_deref().unwrap_or(UNKNOWN_ORGANIZATION);
        match organization.split_once('/') {
            Some((_, rest)) => rest.split('/').next().unwrap_or(rest),
            None => organization,
        }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.policy.bindings
    }
}

/// Load the exported policy collection from disk
pub fn load_documents(path: &Path) -> Result<Vec<PolicyDocument>> {
    if !path.exists() {
        return Err(ReportError::InputNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| ReportError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;

    parse_documents(&content).map_err(|source| ReportError::ParseInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a JSON array of policy documents
pub fn parse_documents(content: &str) -> serde_json::Result<Vec<PolicyDocument>> {
    serde_json::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_full_document() {
        let docs = parse_documents(
            r#"[{
                "resource": "//cloudresourcemanager.googleapis.com/projects/p1",
                "organization": "organizations/o1",
                "policy": {"bindings": [
                    {"role": "roles/viewer", "members": ["user:a@x.com", "user:a@x.com"]}
                ]}
            }]"#,
        )
        .unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].organization_id(), "o1");
        assert_eq!(docs[0].bindings()[0].role, "roles/viewer");
        // duplicates are kept as exported
        assert_eq!(docs[0].bindings()[0].members.len(), 2);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let docs = parse_documents(r#"[{}, {"policy": {}}, {"policy": {"bindings": [{}]}}]"#).unwrap();

        assert_eq!(docs[0].resource, "");
        assert!(docs[0].bindings().is_empty());
        assert!(docs[1].bindings().is_empty());
        assert_eq!(docs[2].bindings()[0], Binding::default());
    }

    #[test]
    fn organization_id_fallbacks() {
        let mut doc = PolicyDocument::default();
        assert_eq!(doc.organization_id(), "UNKNOWN");

        doc.organization = Some("1234".to_string());
        assert_eq!(doc.organization_id(), "1234");

        doc.organization = Some("organizations/42".to_string());
        assert_eq!(doc.organization_id(), "42");
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_documents(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ReportError::InputNotFound(_)));
    }

    #[test]
    fn load_reports_corrupt_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{{\"resource\": ").unwrap();

        let err = load_documents(file.path()).unwrap_err();
        assert!(matches!(err, ReportError::ParseInput { .. }));
    }

    #[test]
    fn load_rejects_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = load_documents(file.path()).unwrap_err();
        assert!(matches!(err, ReportError::ParseInput { .. }));
    }
}
