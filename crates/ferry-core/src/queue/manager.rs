//! Gate-protected lifecycle operations over the queue document.
//!
//! Every method here is a single load→transform→save critical section, so
//! two operations never interleave — including across processes (the worker
//! and any number of CLI invocations). Transitions that reference a job no
//! longer where they expect it are no-ops, not errors: the job may already
//! have been moved by a crash-recovery pass.

use anyhow::Result;

use crate::paths::FerryPaths;

use super::document::{QueueCounts, QueueDocument};
use super::gate::Gate;
use super::job::{unix_timestamp, Job, JobId};
use super::store::QueueStore;

/// What `fail_or_retry` did with the job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDisposition {
    /// Back to the pending tail with the incremented retry count.
    Requeued { retries: u32 },
    /// Retry budget exhausted; moved to the failed bucket.
    Failed { retries: u32 },
    /// Job was not in flight (already moved elsewhere); nothing changed.
    NotFound,
}

/// Handle for all queue mutations and reads.
#[derive(Debug, Clone)]
pub struct QueueManager {
    store: QueueStore,
    gate: Gate,
    max_retries: u32,
}

impl QueueManager {
    pub fn new(paths: &FerryPaths, max_retries: u32) -> Self {
        Self {
            store: QueueStore::new(&paths.queue),
            gate: Gate::new(&paths.lock),
            max_retries,
        }
    }

    /// Run a mutation as one critical section. The save only happens if the
    /// transform succeeds, so the document is either fully updated or
    /// untouched.
    fn with_doc<T>(&self, transform: impl FnOnce(&mut QueueDocument) -> Result<T>) -> Result<T> {
        self.gate.with_exclusive(|| {
            let mut doc = self.store.load()?;
            let out = transform(&mut doc)?;
            self.store.save(&doc)?;
            Ok(out)
        })
    }

    /// Gate-protected read (no save).
    fn read_doc<T>(&self, read: impl FnOnce(&QueueDocument) -> T) -> Result<T> {
        self.gate.with_exclusive(|| {
            let doc = self.store.load()?;
            Ok(read(&doc))
        })
    }

    /// Append a fresh job to the pending tail and return it.
    pub fn enqueue(
        &self,
        source: &str,
        destination: &std::path::Path,
        display_name: &str,
        size_bytes: u64,
    ) -> Result<Job> {
        let job = Job::new(source, destination, display_name, size_bytes);
        self.with_doc(|doc| {
            doc.pending.push(job.clone());
            Ok(())
        })?;
        tracing::info!(id = %job.id, name = %job.display_name, "enqueued");
        Ok(job)
    }

    /// Atomically take up to `n` jobs from the pending head. The sole way
    /// jobs leave pending; two concurrent claimers can never receive
    /// overlapping jobs because the whole removal runs under the gate.
    pub fn claim_batch(&self, n: usize) -> Result<Vec<Job>> {
        self.with_doc(|doc| {
            let take = n.min(doc.pending.len());
            Ok(doc.pending.drain(..take).collect())
        })
    }

    /// Record a claimed batch in the in-flight bucket. Status display only;
    /// the jobs are logically claimed the instant `claim_batch` returned.
    pub fn mark_in_flight(&self, batch: &[Job]) -> Result<()> {
        self.with_doc(|doc| {
            doc.in_flight.extend(batch.iter().cloned());
            Ok(())
        })
    }

    /// Move a finished job from in-flight to completed. No-op if the job is
    /// no longer in flight, so calling it twice is safe.
    pub fn complete(&self, job: &Job) -> Result<()> {
        self.with_doc(|doc| {
            let Some(pos) = doc.in_flight.iter().position(|j| j.id == job.id) else {
                tracing::debug!(id = %job.id, "complete: job not in flight, skipping");
                return Ok(());
            };
            let mut done = doc.in_flight.remove(pos);
            done.completed_at = Some(unix_timestamp());
            doc.completed.push(done);
            Ok(())
        })
    }

    /// Route a failed transfer: requeue at the pending tail while the retry
    /// budget lasts (retried jobs do not jump fresh ones), otherwise move to
    /// the failed bucket.
    pub fn fail_or_retry(&self, job: &Job) -> Result<RetryDisposition> {
        let max_retries = self.max_retries;
        self.with_doc(|doc| {
            let Some(pos) = doc.in_flight.iter().position(|j| j.id == job.id) else {
                tracing::debug!(id = %job.id, "fail_or_retry: job not in flight, skipping");
                return Ok(RetryDisposition::NotFound);
            };
            let mut failed = doc.in_flight.remove(pos);
            failed.retries += 1;
            let retries = failed.retries;
            if retries < max_retries {
                doc.pending.push(failed);
                Ok(RetryDisposition::Requeued { retries })
            } else {
                failed.failed_at = Some(unix_timestamp());
                doc.failed.push(failed);
                Ok(RetryDisposition::Failed { retries })
            }
        })
    }

    /// Worker-startup crash recovery: anything still in flight means the
    /// previous worker died mid-transfer. Requeue those jobs at the pending
    /// head so they keep their queue position. Returns how many were moved.
    pub fn recover_crashed(&self) -> Result<usize> {
        self.with_doc(|doc| {
            let n = doc.in_flight.len();
            if n == 0 {
                return Ok(0);
            }
            let mut recovered: Vec<Job> = doc.in_flight.drain(..).collect();
            recovered.append(&mut doc.pending);
            doc.pending = recovered;
            Ok(n)
        })
    }

    /// Post-batch sweep: drop any leftover in-flight display entries for
    /// these ids. Normally a no-op since each outcome already removed its
    /// entry.
    pub fn release_in_flight(&self, ids: &[JobId]) -> Result<()> {
        self.with_doc(|doc| {
            let before = doc.in_flight.len();
            doc.in_flight.retain(|j| !ids.contains(&j.id));
            let swept = before - doc.in_flight.len();
            if swept > 0 {
                tracing::debug!(swept, "released stale in-flight entries");
            }
            Ok(())
        })
    }

    /// Remove one pending job by queue position. Returns the removed job,
    /// or None if the index is out of range (e.g. the worker claimed it
    /// first — whichever wins the gate is authoritative).
    pub fn remove_pending(&self, index: usize) -> Result<Option<Job>> {
        self.with_doc(|doc| {
            if index < doc.pending.len() {
                Ok(Some(doc.pending.remove(index)))
            } else {
                Ok(None)
            }
        })
    }

    pub fn clear_pending(&self) -> Result<usize> {
        self.with_doc(|doc| {
            let n = doc.pending.len();
            doc.pending.clear();
            Ok(n)
        })
    }

    pub fn clear_completed(&self) -> Result<usize> {
        self.with_doc(|doc| {
            let n = doc.completed.len();
            doc.completed.clear();
            Ok(n)
        })
    }

    pub fn clear_failed(&self) -> Result<usize> {
        self.with_doc(|doc| {
            let n = doc.failed.len();
            doc.failed.clear();
            Ok(n)
        })
    }

    /// Operator bulk retry: every failed job back to the pending tail with
    /// a fresh retry budget.
    pub fn retry_all_failed(&self) -> Result<usize> {
        self.with_doc(|doc| {
            let n = doc.failed.len();
            for mut job in doc.failed.drain(..) {
                job.retries = 0;
                job.failed_at = None;
                doc.pending.push(job);
            }
            Ok(n)
        })
    }

    pub fn set_paused(&self, paused: bool) -> Result<()> {
        self.with_doc(|doc| {
            doc.paused = paused;
            Ok(())
        })
    }

    pub fn is_paused(&self) -> Result<bool> {
        self.read_doc(|doc| doc.paused)
    }

    pub fn counts(&self) -> Result<QueueCounts> {
        self.read_doc(|doc| doc.counts())
    }

    /// Full copy of the document, for status/list display.
    pub fn snapshot(&self) -> Result<QueueDocument> {
        self.read_doc(|doc| doc.clone())
    }
}
