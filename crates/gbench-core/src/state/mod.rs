use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;

use crate::queue::ArtifactQueue;

/// Mutex-guarded iteration counter of a periodic job.
#[derive(Clone, Debug, Default)]
pub struct RunCounter {
    inner: Arc<Mutex<u64>>,
}

impl RunCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn incr(&self) {
        let mut n = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *n += 1;
    }

    pub fn get(&self) -> u64 {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Per-job state of one executor run.
///
/// `shutdown` and `artifacts` are shared by every job of the run; `runs` belongs to this job only.
#[derive(Clone)]
pub struct RunState {
    shutdown: CancellationToken,
    artifacts: ArtifactQueue,
    runs: RunCounter,
}

impl RunState {
    pub fn new(shutdown: CancellationToken, artifacts: ArtifactQueue) -> Self {
        Self {
            shutdown,
            artifacts,
            runs: RunCounter::new(),
        }
    }

    /// State for a job running outside an executor: fresh signal, closed queue.
    pub fn standalone() -> Self {
        Self::new(CancellationToken::new(), ArtifactQueue::closed())
    }

    #[inline]
    pub fn shutdown(&self) -> &CancellationToken {
        &self.shutdown
    }

    #[inline]
    pub fn artifacts(&self) -> &ArtifactQueue {
        &self.artifacts
    }

    #[inline]
    pub fn runs(&self) -> &RunCounter {
        &self.runs
    }

    /// Called by the producer once all of its workers are done.
    ///
    /// Closes the artifact queue first so consumers drain instead of blocking, then fires the shutdown signal.
    pub fn finish_producer(&self) {
        self.artifacts.close();
        self.shutdown.cancel();
    }
}
