//! Lookups through the gcloud CLI
//!
//! Each call runs `gcloud ... describe --format=value(...)` and reads the
//! trimmed stdout. A non-zero exit status is an error.

use super::{NameLookup, ProjectDetails};
use anyhow::{bail, Context, Result};
use tokio::process::Command;

pub const DEFAULT_GCLOUD_BIN: &str = "gcloud";

pub struct GcloudLookup {
    program: String,
}

impl GcloudLookup {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    /// Run gcloud and return trimmed stdout
    async fn run(&self, args: &[&str]) -> Result<String> {
        tracing::debug!("Executing: {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .await
            .with_context(|| format!("Failed to launch {}", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            );
        }

        let stdout = String::from_utf8(output.stdout).context("gcloud output is not UTF-8")?;
        Ok(stdout.trim().to_string())
    }
}

impl Default for GcloudLookup {
    fn default() -> Self {
        Self::new(DEFAULT_GCLOUD_BIN)
    }
}

/// Split `name<TAB>parent.type<TAB>parent.id`
pub fn parse_project_line(line: &str) -> Result<ProjectDetails> {
    let fields: Vec<&str> = line.split('\t').collect();
    let [name, parent_type, parent_id] = fields.as_slice() else {
        bail!("expected 3 tab-separated fields, got {}", fields.len());
    };

    Ok(ProjectDetails {
        display_name: name.to_string(),
        parent_type: parent_type.to_string(),
        parent_id: parent_id.to_string(),
    })
}

impl NameLookup for GcloudLookup {
    async fn describe_project(&self, project_id: &str) -> Result<ProjectDetails> {
        let line = self
            .run(&[
                "projects",
                "describe",
                project_id,
                "--format=value(name, parent.type, parent.id)",
            ])
            .await?;
        parse_project_line(&line)
    }

    async fn describe_folder(&self, folder_id: &str) -> Result<String> {
        self.run(&[
            "resource-manager",
            "folders",
            "describe",
            folder_id,
            "--format=value(displayName)",
        ])
        .await
    }

    async fn folder_parent(&self, folder_id: &str) -> Result<String> {
        self.run(&[
            "resource-manager",
            "folders",
            "describe",
            folder_id,
            "--format=value(parent)",
        ])
        .await
    }
}
