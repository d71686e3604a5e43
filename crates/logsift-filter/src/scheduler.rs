use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use logsift_types::Item;

use crate::criteria::CriteriaModel;
use crate::engine::FilterEngine;
use crate::error::Result;

/// Default simulated backend latency
pub const DEFAULT_APPLY_DELAY: Duration = Duration::from_secs(1);

/// Result of a scheduled apply
#[derive(Debug)]
pub struct ApplyOutcome {
    /// Generation the apply was scheduled under
    pub generation: u64,

    pub criteria: CriteriaModel,

    pub result: Result<Vec<Item>>,
}

/// Runs filter applies behind a delay, one at a time.
///
/// Scheduling a new apply cancels the one in flight. Outcomes carry the
/// generation they were scheduled under so a receiver can drop any that were
/// already queued when they got superseded.
pub struct ApplyScheduler {
    /// Latency before an apply completes
    delay: Duration,

    /// Cancels the in-flight apply
    cancel: CancellationToken,

    /// Bumped on every schedule and cancel
    generation: u64,

    /// In-flight task
    task: Option<tokio::task::JoinHandle<()>>,

    outcome_tx: mpsc::UnboundedSender<ApplyOutcome>,
}

impl ApplyScheduler {
    /// Create a scheduler and the receiver its outcomes arrive on
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<ApplyOutcome>) {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            delay,
            cancel: CancellationToken::new(),
            generation: 0,
            task: None,
            outcome_tx,
        };
        (scheduler, outcome_rx)
    }

    /// Start applying `criteria` to `items`, superseding any pending apply.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, criteria: CriteriaModel, items: Arc<[Item]>) -> u64 {
        self.cancel();
        let generation = self.generation;
        let cancel = self.cancel.clone();
        let delay = self.delay;
        let outcome_tx = self.outcome_tx.clone();

        tracing::debug!(generation, criteria = %criteria.summary(), "Scheduling apply");

        self.task = Some(tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!(generation, "Apply superseded");
                }

                _ = tokio::time::sleep(delay) => {
                    let result = FilterEngine::apply(&items, &criteria);
                    // Receiver gone means the session ended
                    let _ = outcome_tx.send(ApplyOutcome {
                        generation,
                        criteria,
                        result,
                    });
                }
            }
        }));

        generation
    }

    /// Cancel the pending apply, if any
    pub fn cancel(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.generation += 1;
        self.cancel = CancellationToken::new();
    }

    /// Whether an outcome belongs to the latest scheduled apply
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation && self.task.is_some()
    }

    /// Mark the current apply as delivered
    pub fn finish(&mut self, generation: u64) {
        if self.is_current(generation) {
            self.task = None;
        }
    }

    /// Whether an apply is scheduled and not yet delivered
    pub fn is_pending(&self) -> bool {
        self.task.is_some()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Drop for ApplyScheduler {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
