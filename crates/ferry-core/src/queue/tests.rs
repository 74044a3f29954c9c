//! Lifecycle tests over a real store in a temp directory.

use std::collections::HashSet;
use std::path::Path;

use crate::paths::FerryPaths;

use super::{JobId, QueueManager, RetryDisposition};

fn manager(dir: &Path) -> QueueManager {
    QueueManager::new(&FerryPaths::at_dir(dir), 3)
}

fn enqueue_n(queue: &QueueManager, n: usize) -> Vec<JobId> {
    (0..n)
        .map(|i| {
            queue
                .enqueue(
                    &format!("remote:/files/{i}.bin"),
                    Path::new("/tmp/downloads"),
                    &format!("{i}.bin"),
                    1024 * (i as u64 + 1),
                )
                .unwrap()
                .id
        })
        .collect()
}

#[test]
fn enqueue_preserves_fifo_and_claim_takes_from_head() {
    let dir = tempfile::tempdir().unwrap();
    let queue = manager(dir.path());
    let ids = enqueue_n(&queue, 4);

    let batch = queue.claim_batch(2).unwrap();
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].id, ids[0]);
    assert_eq!(batch[1].id, ids[1]);

    // Over-asking returns what is there.
    let rest = queue.claim_batch(10).unwrap();
    assert_eq!(rest.len(), 2);
    assert_eq!(rest[0].id, ids[2]);
    assert!(queue.claim_batch(1).unwrap().is_empty());
}

#[test]
fn complete_moves_job_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let queue = manager(dir.path());
    enqueue_n(&queue, 1);

    let batch = queue.claim_batch(1).unwrap();
    queue.mark_in_flight(&batch).unwrap();
    let job = &batch[0];

    queue.complete(job).unwrap();
    let doc = queue.snapshot().unwrap();
    assert_eq!(doc.completed.len(), 1);
    assert!(doc.completed[0].completed_at.is_some());
    assert!(doc.in_flight.is_empty());

    // Second call: no error, no duplicate entry.
    queue.complete(job).unwrap();
    let doc = queue.snapshot().unwrap();
    assert_eq!(doc.completed.len(), 1);
}

#[test]
fn fail_or_retry_requeues_at_tail_then_fails_at_cap() {
    let dir = tempfile::tempdir().unwrap();
    let queue = manager(dir.path());
    let ids = enqueue_n(&queue, 2);

    // Fail job 0 once: it must land behind job 1.
    let batch = queue.claim_batch(1).unwrap();
    queue.mark_in_flight(&batch).unwrap();
    let disp = queue.fail_or_retry(&batch[0]).unwrap();
    assert_eq!(disp, RetryDisposition::Requeued { retries: 1 });
    let doc = queue.snapshot().unwrap();
    assert_eq!(doc.pending[0].id, ids[1]);
    assert_eq!(doc.pending[1].id, ids[0]);

    // Drain job 1 out of the way.
    let other = queue.claim_batch(1).unwrap();
    queue.mark_in_flight(&other).unwrap();
    queue.complete(&other[0]).unwrap();

    // Two more failures exhaust the budget of 3.
    for expected in [2u32, 3u32] {
        let batch = queue.claim_batch(1).unwrap();
        assert_eq!(batch[0].id, ids[0]);
        queue.mark_in_flight(&batch).unwrap();
        let disp = queue.fail_or_retry(&batch[0]).unwrap();
        if expected < 3 {
            assert_eq!(disp, RetryDisposition::Requeued { retries: expected });
        } else {
            assert_eq!(disp, RetryDisposition::Failed { retries: expected });
        }
    }

    let doc = queue.snapshot().unwrap();
    assert!(doc.pending.is_empty());
    assert_eq!(doc.failed.len(), 1);
    assert_eq!(doc.failed[0].retries, 3);
    assert!(doc.failed[0].failed_at.is_some());
}

#[test]
fn fail_or_retry_on_absent_job_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let queue = manager(dir.path());
    enqueue_n(&queue, 1);
    let batch = queue.claim_batch(1).unwrap();
    // Never marked in flight, e.g. recovered by a concurrent pass.
    let disp = queue.fail_or_retry(&batch[0]).unwrap();
    assert_eq!(disp, RetryDisposition::NotFound);
}

#[test]
fn recover_crashed_requeues_at_head_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let queue = manager(dir.path());
    let ids = enqueue_n(&queue, 5);

    // Two jobs in flight, three still pending.
    let batch = queue.claim_batch(2).unwrap();
    queue.mark_in_flight(&batch).unwrap();

    let recovered = queue.recover_crashed().unwrap();
    assert_eq!(recovered, 2);

    let doc = queue.snapshot().unwrap();
    assert!(doc.in_flight.is_empty());
    assert_eq!(doc.pending.len(), 5);
    // Recovered jobs precede the ones that were still waiting.
    let order: Vec<_> = doc.pending.iter().map(|j| j.id).collect();
    assert_eq!(order, ids);
}

#[test]
fn retry_all_failed_resets_retry_count() {
    let dir = tempfile::tempdir().unwrap();
    let queue = manager(dir.path());
    enqueue_n(&queue, 1);

    for _ in 0..3 {
        let batch = queue.claim_batch(1).unwrap();
        queue.mark_in_flight(&batch).unwrap();
        queue.fail_or_retry(&batch[0]).unwrap();
    }
    assert_eq!(queue.counts().unwrap().failed, 1);

    let moved = queue.retry_all_failed().unwrap();
    assert_eq!(moved, 1);
    let doc = queue.snapshot().unwrap();
    assert!(doc.failed.is_empty());
    assert_eq!(doc.pending.len(), 1);
    assert_eq!(doc.pending[0].retries, 0);
    assert!(doc.pending[0].failed_at.is_none());
}

#[test]
fn remove_pending_by_index_and_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let queue = manager(dir.path());
    let ids = enqueue_n(&queue, 3);

    let removed = queue.remove_pending(1).unwrap().unwrap();
    assert_eq!(removed.id, ids[1]);
    assert!(queue.remove_pending(5).unwrap().is_none());
    assert_eq!(queue.counts().unwrap().pending, 2);
}

#[test]
fn pause_flag_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let queue = manager(dir.path());
    assert!(!queue.is_paused().unwrap());
    queue.set_paused(true).unwrap();
    assert!(queue.is_paused().unwrap());
    queue.set_paused(false).unwrap();
    assert!(!queue.is_paused().unwrap());
}

#[test]
fn concurrent_claimers_never_overlap() {
    let dir = tempfile::tempdir().unwrap();
    let queue = manager(dir.path());
    let ids: HashSet<JobId> = enqueue_n(&queue, 24).into_iter().collect();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let dir = dir.path().to_path_buf();
        handles.push(std::thread::spawn(move || {
            // Separate manager per thread, as separate processes would have.
            let queue = manager(&dir);
            let mut claimed = Vec::new();
            loop {
                let batch = queue.claim_batch(2).unwrap();
                if batch.is_empty() {
                    break;
                }
                claimed.extend(batch.into_iter().map(|j| j.id));
            }
            claimed
        }));
    }

    let mut seen = HashSet::new();
    for h in handles {
        for id in h.join().unwrap() {
            assert!(seen.insert(id), "job claimed twice: {id}");
        }
    }
    // No lost claims either.
    assert_eq!(seen, ids);
    assert_eq!(queue.counts().unwrap().pending, 0);
}
