//! Orchestration: input checks, the in-flight guard, and history updates

use crate::error::{InputError, RecruiterBotError, Result};
use crate::history::{HistoryStore, Storage};
use crate::llm::AnalysisService;
use crate::model::AnalysisRecord;
use log::{error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Message shown for any analysis service failure.
pub const SERVICE_FAILURE_MESSAGE: &str = "An error occurred while analyzing the data. Please try again.";

/// Single-slot guard: at most one analysis in flight.
#[derive(Debug, Clone, Default)]
pub struct InFlightGuard {
    busy: Arc<AtomicBool>,
}

/// Held while an analysis runs; releases the slot on drop.
#[derive(Debug)]
pub struct InFlightPermit {
    busy: Arc<AtomicBool>,
}

impl InFlightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self) -> Option<InFlightPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightPermit {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for InFlightPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// What happened to one submission.
#[derive(Debug)]
pub enum SubmitOutcome {
    Completed(AnalysisRecord),
    /// Blank fields; the service was not called.
    Rejected(InputError),
    /// The service failed; `message` is safe to show to the user.
    Failed { message: String, cause: String },
    /// Another analysis is still running.
    Busy,
}

/// Blocking yes/no prompt used before destructive actions.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> bool;
}

/// Answers yes without asking, for `--yes`.
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _question: &str) -> bool {
        true
    }
}

pub fn validate_inputs(job_description: &str, resume: &str) -> std::result::Result<(), InputError> {
    match (job_description.trim().is_empty(), resume.trim().is_empty()) {
        (true, true) => Err(InputError::BothEmpty),
        (true, false) => Err(InputError::EmptyJobDescription),
        (false, true) => Err(InputError::EmptyResume),
        (false, false) => Ok(()),
    }
}

/// Ask first, then clear the store. Returns whether it was cleared.
pub fn clear_history<S: Storage>(store: &mut HistoryStore<S>, confirm: &mut impl Confirm) -> Result<bool> {
    if !confirm.confirm("Are you sure you want to delete the entire history?") {
        info!("History clear cancelled");
        return Ok(false);
    }

    store.clear()?;
    info!("History cleared");
    Ok(true)
}

/// Owns the injected service and store plus the currently displayed record.
pub struct Session<A: AnalysisService, S: Storage> {
    service: A,
    store: HistoryStore<S>,
    current: Option<AnalysisRecord>,
    guard: InFlightGuard,
}

impl<A: AnalysisService, S: Storage> Session<A, S> {
    pub fn new(service: A, store: HistoryStore<S>) -> Self {
        Self {
            service,
            store,
            current: None,
            guard: InFlightGuard::new(),
        }
    }

    /// Run one analysis.
    ///
    /// Input and service failures become outcomes. Only a failure to persist
    /// the new record is returned as an error.
    pub async fn submit(&mut self, job_description: &str, resume: &str) -> Result<SubmitOutcome> {
        if let Err(input_error) = validate_inputs(job_description, resume) {
            warn!("Rejected submission: {}", input_error);
            return Ok(SubmitOutcome::Rejected(input_error));
        }

        let Some(_permit) = self.guard.try_acquire() else {
            warn!("Analysis already in progress; ignoring submission");
            return Ok(SubmitOutcome::Busy);
        };

        info!("Starting compatibility analysis");
        let result = match self.service.analyze(job_description, resume).await {
            Ok(result) => result,
            Err(e) => {
                error!("Analysis service call failed: {}", e);
                return Ok(SubmitOutcome::Failed {
                    message: SERVICE_FAILURE_MESSAGE.to_string(),
                    cause: e.to_string(),
                });
            }
        };

        let record = AnalysisRecord::now(result);
        self.store.append(record.clone())?;
        self.current = Some(record.clone());

        Ok(SubmitOutcome::Completed(record))
    }

    /// Make a past record the displayed one.
    pub fn select(&mut self, id: &str) -> Result<&AnalysisRecord> {
        let record = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| RecruiterBotError::RecordNotFound(id.to_string()))?;
        Ok(self.current.insert(record))
    }

    /// Clear all history after confirmation. Returns whether it was cleared.
    pub fn clear_history(&mut self, confirm: &mut impl Confirm) -> Result<bool> {
        let cleared = clear_history(&mut self.store, confirm)?;
        if cleared {
            self.current = None;
        }
        Ok(cleared)
    }

    pub fn current(&self) -> Option<&AnalysisRecord> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &[AnalysisRecord] {
        self.store.records()
    }

    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    /// Handle on the guard, shared with whatever drives the session.
    pub fn guard(&self) -> InFlightGuard {
        self.guard.clone()
    }

    pub fn store(&self) -> &HistoryStore<S> {
        &self.store
    }
}
