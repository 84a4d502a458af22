//! Background batch execution.
//!
//! The batch loop runs on its own thread and reports through a channel, so
//! the caller decides on which thread progress is handled (typically whatever
//! thread renders UI). Events arrive in target order: one `Progress` per item,
//! then exactly one `Completed`. A started batch always runs to the end, even
//! if the receiver goes away.

use crossbeam::channel::{self, Receiver};
use std::io;
use std::panic;
use std::thread::{self, JoinHandle};
use tracing::debug;

use super::batch::BatchProcessor;
use super::primitives::FileSystem;
use crate::model::{BatchOutcome, BulkDatePolicy, FileTarget};

#[derive(Debug, Clone, PartialEq)]
pub enum BatchEvent {
    Progress {
        processed: usize,
        total: usize,
        ratio: f64,
    },
    Completed(Vec<BatchOutcome>),
}

pub struct BatchHandle<F> {
    events: Receiver<BatchEvent>,
    thread: JoinHandle<BatchProcessor<F>>,
}

impl<F> BatchHandle<F> {
    /// Raw event stream, for callers running their own loop.
    pub fn events(&self) -> &Receiver<BatchEvent> {
        &self.events
    }

    /// Deliver progress on the calling thread until the batch completes, then
    /// return the outcomes and the processor (ready for another run).
    pub fn finish<P>(self, mut on_progress: P) -> (Vec<BatchOutcome>, BatchProcessor<F>)
    where
        P: FnMut(usize, usize, f64),
    {
        let mut outcomes = Vec::new();
        for event in self.events.iter() {
            match event {
                BatchEvent::Progress {
                    processed,
                    total,
                    ratio,
                } => on_progress(processed, total, ratio),
                BatchEvent::Completed(done) => outcomes = done,
            }
        }
        match self.thread.join() {
            Ok(processor) => (outcomes, processor),
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}

/// Run `processor` over `targets` on a dedicated thread.
pub fn spawn_batch<F>(
    mut processor: BatchProcessor<F>,
    targets: Vec<FileTarget>,
    policy: BulkDatePolicy,
) -> io::Result<BatchHandle<F>>
where
    F: FileSystem + Send + 'static,
{
    let (tx, rx) = channel::unbounded();
    let thread = thread::Builder::new()
        .name("filestamp-batch".into())
        .spawn(move || {
            let total = targets.len();
            let mut processed = 0;
            let outcomes = processor.run_batch(&targets, policy, |ratio| {
                processed += 1;
                // A vanished receiver does not stop the batch.
                let _ = tx.send(BatchEvent::Progress {
                    processed,
                    total,
                    ratio,
                });
            });
            let _ = tx.send(BatchEvent::Completed(outcomes));
            debug!(total, "batch worker finished");
            processor
        })?;
    Ok(BatchHandle { events: rx, thread })
}
