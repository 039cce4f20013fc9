//! Error classification shared by every core component.
//!
//! Each module keeps its own `thiserror` enum; [`ErrorKind`] is the coarse
//! taxonomy callers use to decide how to report a failure.

use thiserror::Error;

use crate::pipeline::PipelineError;
use crate::topics::TopicStoreError;

/// Coarse failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A topic or stage does not exist.
    NotFound,
    /// A caller-supplied value was rejected.
    InvalidArgument,
    /// The pipeline is not in the state the operation requires.
    Conflict,
    /// Reading or writing the durable document failed.
    StorageFailure,
    /// The durable document could not be parsed or failed an integrity check.
    MalformedData,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::InvalidArgument => "invalid_argument",
            Self::Conflict => "conflict",
            Self::StorageFailure => "storage_failure",
            Self::MalformedData => "malformed_data",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any error produced by a core operation.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Topics(#[from] TopicStoreError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Topics(e) => e.kind(),
            Self::Pipeline(e) => e.kind(),
        }
    }
}
