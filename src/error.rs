use std::path::PathBuf;

use thiserror::Error;

/// Why a dataset could not be loaded. Callers receive this alongside an empty
/// table; it never aborts the dashboard.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("File not found: {}. Please ensure the CSV is in the working directory.", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Error processing {}: {reason}", path.display())]
    SourceUnparsable { path: PathBuf, reason: String },
}

/// Expected, recoverable outcomes of an aggregation request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("No IPO named '{0}' in the current selection")]
    CompanyNotFound(String),

    #[error("Not enough subscription columns found")]
    InsufficientColumns,
}
