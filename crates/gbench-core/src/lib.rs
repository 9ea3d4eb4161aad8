pub mod error;
pub use error::{CoreError, InvokeError};

pub mod invoker;
pub use invoker::{CommandSpec, ProcessInvoker};

pub mod command;
pub use command::{BuiltCommand, CommandBuilder, InvocationContext, artifact_name};

pub mod queue;
pub use queue::{ArtifactQueue, QueueClosed};

pub mod state;
pub use state::{RunCounter, RunState};

pub mod aggregate;
pub use aggregate::{Aggregator, SumSpec, summarize};

pub mod job;
pub use job::{BulkJob, Job, JobOutcome, PeriodicJob, job_for};

pub mod executor;
pub use executor::JobExecutor;

#[cfg(test)]
pub(crate) mod testing;
