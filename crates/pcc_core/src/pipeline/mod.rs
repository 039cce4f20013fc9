//! Pipeline state machine for the production stages.
//!
//! The pipeline itself does no work. External workers push stage reports
//! in, and the dashboard reads snapshots out.
//!
//! # Architecture
//!
//! ```text
//! Pipeline (Idle | Running)
//!     ├── 1 Script Generation
//!     ├── 2 GUI Automation
//!     ├── 3 OBS Recording
//!     ├── 4 Subtitle Generation
//!     ├── 5 Voice Synthesis
//!     ├── 6 Background Generation
//!     ├── 7 FFmpeg Assembly
//!     └── 8 Upload
//! ```
//!
//! # Example
//!
//! ```
//! use pcc_core::logging::EventLog;
//! use pcc_core::pipeline::{Pipeline, StageUpdate};
//!
//! let pipeline = Pipeline::new(EventLog::default());
//! pipeline.start(3).unwrap();
//! pipeline
//!     .update_stage(1, StageUpdate::new("Running").progress(40).details("drafting hook"))
//!     .unwrap();
//!
//! let state = pipeline.snapshot();
//! assert!(state.running());
//! assert_eq!(state.current_topic(), Some(3));
//! ```

mod errors;
mod stage;
mod state;

pub use errors::{PipelineError, PipelineResult};
pub use stage::{Stage, StageId, StageStatus, StageUpdate, STAGE_NAMES};
pub use state::{Pipeline, PipelineState};
