//! Application state shared across handlers.

use std::path::PathBuf;
use std::sync::Arc;

use pcc_core::logging::DEFAULT_TAIL;
use pcc_core::ControlCenter;

#[derive(Clone)]
pub struct AppState {
    pub center: Arc<ControlCenter>,
    /// Entries returned by `GET /api/logs` when no limit is given.
    pub default_tail: usize,
    /// HTML page served at `/`.
    pub dashboard: PathBuf,
    pub cors: bool,
}

impl AppState {
    /// State with the default tail size, CORS on, and the dashboard looked
    /// up in the working directory.
    pub fn new(center: Arc<ControlCenter>) -> Self {
        Self {
            center,
            default_tail: DEFAULT_TAIL,
            dashboard: PathBuf::from("control_center.html"),
            cors: true,
        }
    }
}
