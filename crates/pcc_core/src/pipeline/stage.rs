//! The eight fixed production stages.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::PipelineError;

/// Stage names, indexed by `StageId - 1`.
pub const STAGE_NAMES: [&str; 8] = [
    "Script Generation",
    "GUI Automation",
    "OBS Recording",
    "Subtitle Generation",
    "Voice Synthesis",
    "Background Generation",
    "FFmpeg Assembly",
    "Upload",
];

/// Identifier of one of the fixed stages, always in `1..=8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StageId(u8);

impl StageId {
    pub const FIRST: StageId = StageId(1);
    pub const LAST: StageId = StageId(STAGE_NAMES.len() as u8);

    pub fn get(self) -> u8 {
        self.0
    }

    /// Fixed display name of this stage.
    pub fn name(self) -> &'static str {
        STAGE_NAMES[usize::from(self.0) - 1]
    }

    /// All stage ids in pipeline order.
    pub fn all() -> impl Iterator<Item = StageId> {
        (Self::FIRST.0..=Self::LAST.0).map(StageId)
    }
}

impl TryFrom<i64> for StageId {
    type Error = PipelineError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Self::FIRST.0)..=i64::from(Self::LAST.0)).contains(&value) {
            Ok(StageId(value as u8))
        } else {
            Err(PipelineError::InvalidStageId(value))
        }
    }
}

impl TryFrom<u8> for StageId {
    type Error = PipelineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl From<StageId> for u8 {
    fn from(id: StageId) -> Self {
        id.0
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status reported for a stage.
///
/// Workers report free-form strings; the well-known ones get variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StageStatus {
    #[default]
    Idle,
    Queued,
    Running,
    Complete,
    Error,
    Other(String),
}

impl StageStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Idle => "Idle",
            Self::Queued => "Queued",
            Self::Running => "Running",
            Self::Complete => "Complete",
            Self::Error => "Error",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for StageStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Idle" => Self::Idle,
            "Queued" => Self::Queued,
            "Running" => Self::Running,
            "Complete" => Self::Complete,
            "Error" => Self::Error,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for StageStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<StageStatus> for String {
    fn from(status: StageStatus) -> Self {
        match status {
            StageStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress record of a single stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    pub status: StageStatus,
    /// Percent complete as reported by the worker. Not range-checked.
    pub progress: i64,
    pub details: String,
}

impl Stage {
    /// Idle stage with no progress.
    pub fn idle(id: StageId) -> Self {
        Self {
            name: id.name().to_string(),
            status: StageStatus::Idle,
            progress: 0,
            details: String::new(),
        }
    }
}

/// Values a worker reports for a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageUpdate {
    pub status: StageStatus,
    pub progress: i64,
    pub details: String,
}

impl StageUpdate {
    /// Update with zero progress and empty details.
    pub fn new(status: impl Into<StageStatus>) -> Self {
        Self {
            status: status.into(),
            progress: 0,
            details: String::new(),
        }
    }

    pub fn progress(mut self, progress: i64) -> Self {
        self.progress = progress;
        self
    }

    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }
}
