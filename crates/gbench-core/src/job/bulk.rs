use std::sync::Arc;

use async_trait::async_trait;
use gbench_model::{InvocationResult, JobConfig, JobKind};
use tokio::{sync::mpsc, task::JoinSet, time::Instant};
use tracing::{debug, error, info, instrument};

use super::{Job, JobOutcome};
use crate::{
    aggregate::{SumSpec, summarize},
    command::{CommandBuilder, InvocationContext},
    invoker::ProcessInvoker,
    state::RunState,
};

/// Runs a fixed number of `create` invocations over a worker pool, then stops.
///
/// When every worker is done the job closes the artifact queue and fires the shutdown signal,
/// which is what lets periodic jobs of the same run terminate.
pub struct BulkJob {
    config: Arc<JobConfig>,
    invoker: Arc<dyn ProcessInvoker>,
}

impl BulkJob {
    pub fn new(config: JobConfig, invoker: Arc<dyn ProcessInvoker>) -> Self {
        Self {
            config: Arc::new(config),
            invoker,
        }
    }

    /// `(total, concurrency, use_quota)`; zeros for a non-bulk config.
    fn params(&self) -> (usize, usize, bool) {
        match &self.config.kind {
            JobKind::Bulk {
                total,
                concurrency,
                use_quota,
                ..
            } => (*total, *concurrency, *use_quota),
            _ => (0, 0, false),
        }
    }
}

#[async_trait]
impl Job for BulkJob {
    fn config(&self) -> &JobConfig {
        &self.config
    }

    #[instrument(level = "debug", skip_all, fields(subcommand = %self.config.subcommand()))]
    async fn run(&self, state: RunState) -> JobOutcome {
        let (total, concurrency, use_quota) = self.params();
        let concurrency = resolve_concurrency(concurrency);
        let plan = partition(total, concurrency);
        info!(
            target: "gbench.core.job",
            total,
            concurrency,
            workers = plan.len(),
            "bulk job starting"
        );

        let (tx, rx) = mpsc::channel(total.max(1));
        let builder = Arc::new(CommandBuilder::new(
            Arc::clone(&self.config),
            state.artifacts().clone(),
        ));

        let start = Instant::now();
        let mut workers = JoinSet::new();
        for (worker, iterations) in plan {
            let builder = Arc::clone(&builder);
            let invoker = Arc::clone(&self.invoker);
            let artifacts = state.artifacts().clone();
            let tx = tx.clone();

            workers.spawn(async move {
                for iteration in 0..iterations {
                    let ctx = InvocationContext::new(worker, iteration);
                    let (result, artifact) = invoke_once(&builder, invoker.as_ref(), ctx).await;
                    if tx.send(result).await.is_err() {
                        break;
                    }
                    if let Some(name) = artifact
                        && artifacts.publish(name).await.is_err()
                    {
                        debug!(target: "gbench.core.job", worker, "artifact queue closed; name dropped");
                    }
                }
            });
        }
        drop(tx);

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                error!(target: "gbench.core.job", error = %e, "bulk worker aborted");
            }
        }
        let duration = start.elapsed();
        state.finish_producer();

        let summary = summarize(
            SumSpec {
                duration,
                concurrency,
                use_quota,
            },
            rx,
        )
        .await;
        info!(
            target: "gbench.core.job",
            total = summary.total_images,
            errors = summary.total_errors_amt,
            elapsed_ms = duration.as_millis() as u64,
            "bulk job done"
        );
        JobOutcome::Summary(summary)
    }
}

async fn invoke_once(
    builder: &CommandBuilder,
    invoker: &dyn ProcessInvoker,
    ctx: InvocationContext,
) -> (InvocationResult, Option<String>) {
    let start = Instant::now();
    let Some(cmd) = builder.build(ctx).await else {
        return (
            InvocationResult::failed(start.elapsed(), "no command could be built"),
            None,
        );
    };

    match invoker.run(&cmd.spec).await {
        Ok(_) => (InvocationResult::ok(start.elapsed()), cmd.artifact),
        Err(e) => {
            debug!(target: "gbench.core.job", worker = ctx.worker, error = %e, "invocation failed");
            (InvocationResult::failed(start.elapsed(), e.to_string()), None)
        }
    }
}

/// Worker count for a configured concurrency; `0` means one per available CPU.
pub fn resolve_concurrency(configured: usize) -> usize {
    if configured > 0 {
        return configured;
    }
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Split `total` invocations over `concurrency` workers as `(worker_id, iterations)` pairs.
///
/// Every worker id gets `total / concurrency` iterations; the `total % concurrency` leftovers
/// run as extra single-iteration workers reusing ids `0..total % concurrency`.
/// Workers with nothing to do are omitted.
pub fn partition(total: usize, concurrency: usize) -> Vec<(usize, usize)> {
    let concurrency = concurrency.max(1);
    let per_worker = total / concurrency;
    let leftover = total % concurrency;

    let full = (0..concurrency)
        .filter(|_| per_worker > 0)
        .map(|worker| (worker, per_worker));
    let extra = (0..leftover).map(|worker| (worker, 1));
    full.chain(extra).collect()
}
