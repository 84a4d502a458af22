//! Bulk timestamp alignment.
//! Items are processed strictly in input order, one at a time; a failing item
//! is recorded and the loop moves on. Batch mode never renames: each entry is
//! stamped in place under its existing name.

use tracing::{debug, info, warn};

use super::primitives::FileSystem;
use super::update::MetadataUpdater;
use crate::model::{BatchOutcome, BatchSummary, BulkDatePolicy, FileTarget, TimestampPair};

#[derive(Debug)]
pub struct BatchProcessor<F> {
    updater: MetadataUpdater<F>,
    processed: usize,
    total: usize,
}

impl<F: FileSystem> BatchProcessor<F> {
    pub fn new(updater: MetadataUpdater<F>) -> Self {
        Self {
            updater,
            processed: 0,
            total: 0,
        }
    }

    pub fn updater(&self) -> &MetadataUpdater<F> {
        &self.updater
    }

    /// `(processed, total)` of the running batch; `(0, 0)` when idle.
    pub fn progress(&self) -> (usize, usize) {
        (self.processed, self.total)
    }

    /// Apply `policy` to every target. `on_progress` is called once per item,
    /// after it finishes, with `processed / total`.
    pub fn run_batch<P>(
        &mut self,
        targets: &[FileTarget],
        policy: BulkDatePolicy,
        mut on_progress: P,
    ) -> Vec<BatchOutcome>
    where
        P: FnMut(f64),
    {
        self.processed = 0;
        self.total = targets.len();
        info!(total = self.total, %policy, "Batch started");

        let mut outcomes = Vec::with_capacity(targets.len());
        for target in targets {
            outcomes.push(self.process_one(target, policy));
            self.processed += 1;
            on_progress(self.processed as f64 / self.total as f64);
        }

        let summary = BatchSummary::from_outcomes(&outcomes);
        info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Batch complete"
        );
        self.processed = 0;
        self.total = 0;
        outcomes
    }

    fn process_one(&self, target: &FileTarget, policy: BulkDatePolicy) -> BatchOutcome {
        let current = match self.updater.inspect(target) {
            Ok(pair) => pair,
            Err(e) => {
                warn!(path = %target.path.display(), error = %e, "cannot read timestamps; using now");
                TimestampPair::now()
            }
        };
        let times = policy.derive(current);
        debug!(path = %target.path.display(), created = %times.created, modified = %times.modified, "derived timestamps");

        match self.updater.stamp(target, times) {
            Ok(updated) => BatchOutcome::succeeded(updated),
            Err(e) => {
                warn!(path = %target.path.display(), code = e.code(), kind = e.kind(), error = %e, "batch item failed");
                BatchOutcome::failed(target.clone(), &e)
            }
        }
    }
}

impl<F: FileSystem> From<MetadataUpdater<F>> for BatchProcessor<F> {
    fn from(updater: MetadataUpdater<F>) -> Self {
        Self::new(updater)
    }
}
