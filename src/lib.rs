//! Flatten a Cloud Asset Inventory IAM policy export into a CSV report.
//!
//! Project and folder policies are enriched with display names and the name
//! of their parent in the resource hierarchy; everything else in the export
//! is ignored.

pub mod config;
pub mod error;
pub mod gcp;
pub mod hierarchy;
pub mod lookup;
pub mod policy;
pub mod report;

pub use error::{ReportError, Result};
pub use report::{generate_report, ReportBuilder, ReportRow, RunStats};
