//! Dispatch policy under the hard connection ceiling.
//!
//! The remote endpoint allows at most [`CONNECTION_CEILING`] simultaneous
//! streams across all jobs. The policy trades "one job at maximum
//! parallelism" against "two jobs at reduced parallelism": a lone job gets
//! both streams rather than idling one slot, while any deeper queue spreads
//! the budget one stream per job so the second job is not starved.

/// Hard cap on simultaneous transfer streams across all active jobs.
pub const CONNECTION_CEILING: usize = 2;

/// What the worker should start right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchPlan {
    /// Jobs to claim from the pending head. Zero means wait.
    pub batch_size: usize,
    /// Stream count passed to the transfer engine for each job in the batch.
    pub streams_per_job: u32,
}

impl DispatchPlan {
    pub fn wait() -> Self {
        Self {
            batch_size: 0,
            streams_per_job: 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.batch_size == 0
    }
}

/// Pure function of the current bucket sizes.
///
/// Invariant: `batch_size * streams_per_job + in_flight <= CONNECTION_CEILING`.
/// The 2-stream mode triggers only when the job is truly alone
/// (`pending + in_flight == 1`), so a retried sibling can never push the
/// total over the ceiling.
pub fn plan(pending: usize, in_flight: usize) -> DispatchPlan {
    if in_flight >= CONNECTION_CEILING || pending == 0 {
        return DispatchPlan::wait();
    }
    if pending + in_flight == 1 {
        return DispatchPlan {
            batch_size: 1,
            streams_per_job: CONNECTION_CEILING as u32,
        };
    }
    DispatchPlan {
        batch_size: pending.min(CONNECTION_CEILING - in_flight),
        streams_per_job: 1,
    }
}
