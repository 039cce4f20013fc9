//! Error types for the pipeline state machine.

use thiserror::Error;

use crate::error::ErrorKind;

/// A rejected pipeline transition or stage update.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// `start` was called while a run is in progress.
    #[error("Pipeline is already running")]
    AlreadyRunning,

    /// `stop` was called with no run in progress.
    #[error("Pipeline is not running")]
    NotRunning,

    /// Stage ids are fixed at 1 through 8.
    #[error("Invalid stage ID {0}")]
    InvalidStageId(i64),
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AlreadyRunning | Self::NotRunning => ErrorKind::Conflict,
            Self::InvalidStageId(_) => ErrorKind::NotFound,
        }
    }
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_errors_are_conflicts() {
        assert_eq!(PipelineError::AlreadyRunning.kind(), ErrorKind::Conflict);
        assert_eq!(PipelineError::NotRunning.kind(), ErrorKind::Conflict);
        assert_eq!(PipelineError::InvalidStageId(9).kind(), ErrorKind::NotFound);
        assert_eq!(PipelineError::InvalidStageId(0).to_string(), "Invalid stage ID 0");
    }
}
