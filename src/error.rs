//! Fatal errors
//!
//! Only file-level failures abort a run. Lookup failures never surface here;
//! the resolver turns them into placeholder names instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("The input file '{}' was not found.", .0.display())]
    InputNotFound(PathBuf),

    #[error("Could not read '{}'.", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse '{}'. It may be empty or corrupted.", path.display())]
    ParseInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not write the output file '{}'.", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not initialise the lookup backend: {0}")]
    Backend(String),
}

impl ReportError {
    /// Extra hint printed under the fatal banner
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ReportError::InputNotFound(_) => {
                Some("Please run the required `gcloud asset` export first to create this file.")
            }
            ReportError::Backend(_) => {
                Some("Run 'gcloud auth application-default login' or pass --access-token.")
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
