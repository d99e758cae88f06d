use thiserror::Error;

/// Failures of a single analysis. No partial record is ever produced.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Missing or unparseable URL; nothing was fetched.
    #[error("{0}")]
    Input(String),

    /// The target site could not be reached or answered with a non-success
    /// status. `status` carries the upstream status when there was one.
    #[error("{message}")]
    Fetch { status: Option<u16>, message: String },

    /// The assembled record broke one of its own invariants.
    #[error("Failed to parse website data")]
    Validation(Vec<String>),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
