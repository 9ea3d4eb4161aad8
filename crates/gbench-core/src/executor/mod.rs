use std::sync::Arc;

use gbench_model::{JobConfig, JobKind, Subcommand, Summary};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};

use crate::{
    error::CoreError,
    invoker::ProcessInvoker,
    job::{Job, JobOutcome, job_for},
    queue::ArtifactQueue,
    state::{RunCounter, RunState},
};

/// Runs a set of jobs concurrently and merges their outcomes into one [`Summary`].
///
/// Exactly one bulk job drives a run: it owns the shutdown signal, and every periodic job
/// stops once it has finished.
pub struct JobExecutor {
    jobs: Vec<Arc<dyn Job>>,
}

impl JobExecutor {
    pub fn new(jobs: Vec<Arc<dyn Job>>) -> Self {
        Self { jobs }
    }

    /// Validate the configs and build one job per entry, all sharing the same invoker.
    pub fn from_configs(
        configs: Vec<JobConfig>,
        invoker: Arc<dyn ProcessInvoker>,
    ) -> Result<Self, CoreError> {
        let mut jobs = Vec::with_capacity(configs.len());
        for config in configs {
            config.validate()?;
            jobs.push(job_for(config, Arc::clone(&invoker)));
        }
        Ok(Self::new(jobs))
    }

    /// Reject the run before anything starts if any job is misconfigured.
    fn validate(&self) -> Result<usize, CoreError> {
        for job in &self.jobs {
            job.config().validate()?;
        }
        self.bulk_total()
    }

    /// Total invocations of the bulk job, or an error if the job set cannot terminate.
    fn bulk_total(&self) -> Result<usize, CoreError> {
        let totals: Vec<usize> = self
            .jobs
            .iter()
            .filter_map(|job| match &job.config().kind {
                JobKind::Bulk { total, .. } => Some(*total),
                _ => None,
            })
            .collect();

        match totals.as_slice() {
            [] => Err(CoreError::NoBulkJob),
            [total] => Ok(*total),
            many => Err(CoreError::MultipleBulkJobs(many.len())),
        }
    }

    /// Run every job to completion.
    ///
    /// An empty job set returns an empty summary without starting anything.
    #[instrument(level = "debug", skip(self), fields(jobs = self.jobs.len()))]
    pub async fn run(&self) -> Result<Summary, CoreError> {
        if self.jobs.is_empty() {
            return Ok(Summary::default());
        }
        let capacity = self.validate()?;

        let shutdown = CancellationToken::new();
        let artifacts = ArtifactQueue::bounded(capacity);

        let mut counters: Vec<(Subcommand, RunCounter)> = Vec::with_capacity(self.jobs.len());
        let mut tasks = JoinSet::new();
        for job in &self.jobs {
            let state = RunState::new(shutdown.clone(), artifacts.clone());
            counters.push((job.config().subcommand(), state.runs().clone()));

            let job = Arc::clone(job);
            tasks.spawn(async move { job.run(state).await });
        }
        info!(target: "gbench.core.executor", jobs = self.jobs.len(), "all jobs started");

        let mut summary = None;
        let mut failure = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(JobOutcome::Summary(s)) => summary = Some(s),
                Ok(JobOutcome::Stopped) => {}
                Err(e) => {
                    error!(target: "gbench.core.executor", error = %e, "job task aborted");
                    // Unblock the remaining jobs so the join can finish.
                    artifacts.close();
                    shutdown.cancel();
                    failure.get_or_insert(CoreError::Join(e.to_string()));
                }
            }
        }
        if let Some(e) = failure {
            return Err(e);
        }

        let mut summary = summary.unwrap_or_default();
        for (subcommand, counter) in counters {
            match subcommand {
                Subcommand::Clean => {
                    summary.ran_with_parallel_clean = true;
                    summary.number_of_cleans += counter.get();
                }
                Subcommand::Delete => summary.number_of_deletes += counter.get(),
                Subcommand::Create => {}
            }
        }

        info!(
            target: "gbench.core.executor",
            total = summary.total_images,
            errors = summary.total_errors_amt,
            cleans = summary.number_of_cleans,
            deletes = summary.number_of_deletes,
            "run finished"
        );
        Ok(summary)
    }
}
