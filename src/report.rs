//! Report generation
//!
//! Walks the exported policy documents in order, resolves names for each
//! project or folder, and expands every binding into one row per member.

use crate::error::{ReportError, Result};
use crate::hierarchy::{
    classify, Classification, ClassifiedResource, HierarchyResolver, ResolvedNames, ResourceType,
};
use crate::lookup::NameLookup;
use crate::policy::{Binding, PolicyDocument};
use std::path::Path;

/// Column header of the CSV report
pub const HEADER: [&str; 7] = [
    "OrganizationID",
    "ResourceType",
    "ResourceID",
    "ResourceName",
    "Parent",
    "Role",
    "Member",
];

/// One (resource, role, member) line of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub organization_id: String,
    pub resource_type: ResourceType,
    pub resource_id: String,
    pub resource_name: String,
    pub parent_name: String,
    pub role: String,
    pub member: String,
}

impl ReportRow {
    fn record(&self) -> [&str; 7] {
        [
            self.organization_id.as_str(),
            self.resource_type.as_str(),
            self.resource_id.as_str(),
            self.resource_name.as_str(),
            self.parent_name.as_str(),
            self.role.as_str(),
            self.member.as_str(),
        ]
    }
}

/// Counters for a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub documents: usize,
    pub projects: usize,
    pub folders: usize,
    pub skipped: usize,
    pub rows: usize,
    pub lookups_failed: usize,
    pub cached_folders: usize,
}

/// Rows plus run statistics
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub rows: Vec<ReportRow>,
    pub stats: RunStats,
}

/// Expand bindings into rows, keeping binding and member order
pub fn flatten_bindings(
    organization_id: &str,
    resource: &ClassifiedResource,
    names: &ResolvedNames,
    bindings: &[Binding],
) -> Vec<ReportRow> {
    bindings
        .iter()
        .flat_map(|binding| {
            binding.members.iter().map(move |member| ReportRow {
                organization_id: organization_id.to_string(),
                resource_type: resource.resource_type,
                resource_id: resource.resource_id.clone(),
                resource_name: names.resource_name.clone(),
                parent_name: names.parent_name.clone(),
                role: binding.role.clone(),
                member: member.clone(),
            })
        })
        .collect()
}

/// Builds one report. The folder cache lives and dies with the builder.
pub struct ReportBuilder<L> {
    resolver: HierarchyResolver<L>,
    quiet: bool,
}

impl<L: NameLookup> ReportBuilder<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            resolver: HierarchyResolver::new(lookup),
            quiet: false,
        }
    }

    /// Suppress per-resource progress lines on stdout
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub async fn build(mut self, documents: &[PolicyDocument]) -> Report {
        let mut report = Report::default();

        for document in documents {
            report.stats.documents += 1;

            let class = classify(&document.resource);
            if let Classification::SystemProject(id) = &class {
                tracing::debug!("Skipping system project {}", id);
            }
            let Some(resource) = class.supported() else {
                tracing::debug!("Skipping unsupported resource '{}'", document.resource);
                report.stats.skipped += 1;
                continue;
            };

            match resource.resource_type {
                ResourceType::Project => report.stats.projects += 1,
                ResourceType::Folder => report.stats.folders += 1,
            }
            if !self.quiet {
                println!("Processing {}: {}", resource.resource_type, resource.resource_id);
            }

            let names = self.resolver.resolve(&resource).await;
            let rows = flatten_bindings(
                document.organization_id(),
                &resource,
                &names,
                document.bindings(),
            );
            tracing::debug!(
                "{} {} produced {} rows",
                resource.resource_type,
                resource.resource_id,
                rows.len()
            );
            report.rows.extend(rows);
        }

        report.stats.rows = report.rows.len();
        report.stats.lookups_failed = self.resolver.failed_lookups();
        report.stats.cached_folders = self.resolver.cache().len();
        tracing::info!("Report built: {:?}", report.stats);

        report
    }
}

/// Serialize rows as CSV with the fixed header
pub fn to_csv(rows: &[ReportRow]) -> std::io::Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for row in rows {
        writer.write_record(row.record())?;
    }
    writer.into_inner().map_err(|e| e.into_error())
}

/// Write the report, replacing any existing file
pub fn write_report(path: &Path, rows: &[ReportRow]) -> Result<()> {
    let write_err = |source: std::io::Error| ReportError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };

    let bytes = to_csv(rows).map_err(write_err)?;
    std::fs::write(path, bytes).map_err(write_err)?;

    tracing::info!("Wrote {} rows to {:?}", rows.len(), path);
    Ok(())
}

/// Build the report for `documents` and write it to `output`
pub async fn generate_report<L: NameLookup>(
    lookup: L,
    documents: &[PolicyDocument],
    output: &Path,
    quiet: bool,
) -> Result<RunStats> {
    let report = ReportBuilder::new(lookup).quiet(quiet).build(documents).await;
    write_report(output, &report.rows)?;
    Ok(report.stats)
}
