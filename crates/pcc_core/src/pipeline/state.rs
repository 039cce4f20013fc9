//! Pipeline run state and the transitions that change it.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::errors::{PipelineError, PipelineResult};
use super::stage::{Stage, StageId, StageStatus, StageUpdate};
use crate::logging::EventLog;
use crate::topics::TopicId;

/// Snapshot of the whole pipeline.
///
/// Serializes as `{"running", "current_topic", "stages": {"1": ..., "8": ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineState {
    running: bool,
    current_topic: Option<TopicId>,
    stages: BTreeMap<StageId, Stage>,
}

impl PipelineState {
    /// Idle pipeline with every stage idle.
    pub fn new() -> Self {
        Self {
            running: false,
            current_topic: None,
            stages: StageId::all().map(|id| (id, Stage::idle(id))).collect(),
        }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn current_topic(&self) -> Option<TopicId> {
        self.current_topic
    }

    pub fn stage(&self, id: StageId) -> &Stage {
        &self.stages[&id]
    }

    /// Stages in pipeline order.
    pub fn stages(&self) -> impl Iterator<Item = (StageId, &Stage)> {
        self.stages.iter().map(|(id, stage)| (*id, stage))
    }

    /// Set every stage's status and zero its progress. Details are kept.
    fn reset_stages(&mut self, status: StageStatus) {
        for stage in self.stages.values_mut() {
            stage.status = status.clone();
            stage.progress = 0;
        }
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::new()
    }
}

/// The pipeline state machine.
///
/// All state sits behind one lock, held for the whole check-then-act of
/// each transition.
#[derive(Debug)]
pub struct Pipeline {
    state: Mutex<PipelineState>,
    log: EventLog,
}

impl Pipeline {
    pub fn new(log: EventLog) -> Self {
        Self {
            state: Mutex::new(PipelineState::new()),
            log,
        }
    }

    /// Begin a run for `topic_id`.
    ///
    /// The topic is not looked up in the queue; any id is accepted.
    pub fn start(&self, topic_id: TopicId) -> PipelineResult<()> {
        let mut state = self.state.lock();
        if state.running {
            return Err(PipelineError::AlreadyRunning);
        }

        state.running = true;
        state.current_topic = Some(topic_id);
        state.reset_stages(StageStatus::Queued);

        self.log
            .success(format!("Pipeline started for topic #{}", topic_id));
        Ok(())
    }

    /// End the current run and return every stage to idle.
    pub fn stop(&self) -> PipelineResult<()> {
        let mut state = self.state.lock();
        if !state.running {
            return Err(PipelineError::NotRunning);
        }

        state.running = false;
        state.current_topic = None;
        state.reset_stages(StageStatus::Idle);

        self.log.info("Pipeline stopped");
        Ok(())
    }

    /// Record a worker's report for one stage.
    ///
    /// Status and progress are stored as given. Works whether or not a run
    /// is in progress, and does not write to the event log.
    pub fn update_stage(&self, stage_id: i64, update: StageUpdate) -> PipelineResult<Stage> {
        let id = StageId::try_from(stage_id)?;

        let mut state = self.state.lock();
        let stage = state
            .stages
            .get_mut(&id)
            .ok_or(PipelineError::InvalidStageId(stage_id))?;
        stage.status = update.status;
        stage.progress = update.progress;
        stage.details = update.details;
        Ok(stage.clone())
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> PipelineState {
        self.state.lock().clone()
    }

    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }

    pub fn current_topic(&self) -> Option<TopicId> {
        self.state.lock().current_topic
    }
}
