use std::sync::Arc;

use async_trait::async_trait;
use gbench_model::{JobConfig, JobKind, Summary};

use crate::{invoker::ProcessInvoker, state::RunState};

mod bulk;
pub use bulk::{BulkJob, partition, resolve_concurrency};

mod periodic;
pub use periodic::PeriodicJob;

/// What a finished job hands back to the executor.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    /// A bulk job's reduced results.
    Summary(Summary),
    /// A periodic or consumer job observed shutdown; its count lives in the run counter.
    Stopped,
}

/// A unit of repeated execution of the target binary.
#[async_trait]
pub trait Job: Send + Sync {
    fn config(&self) -> &JobConfig;

    /// Run to completion under the given run state.
    async fn run(&self, state: RunState) -> JobOutcome;
}

/// Pick the scheduling implementation for a config.
pub fn job_for(config: JobConfig, invoker: Arc<dyn ProcessInvoker>) -> Arc<dyn Job> {
    match config.kind {
        JobKind::Bulk { .. } => Arc::new(BulkJob::new(config, invoker)),
        JobKind::Periodic { .. } | JobKind::Consumer { .. } => {
            Arc::new(PeriodicJob::new(config, invoker))
        }
    }
}
