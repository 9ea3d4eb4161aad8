use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use gbench_model::{DEFAULT_INTERVAL_SECS, JobConfig};
use tracing::{debug, instrument, trace, warn};

use super::{Job, JobOutcome};
use crate::{
    command::{CommandBuilder, InvocationContext},
    invoker::ProcessInvoker,
    state::RunState,
};

/// Runs one invocation per interval until the shutdown signal fires.
///
/// A consumer (`delete`) job takes its argument from the artifact queue. When that queue is
/// closed and drained the tick is skipped; the loop itself still only ends on shutdown.
pub struct PeriodicJob {
    config: Arc<JobConfig>,
    invoker: Arc<dyn ProcessInvoker>,
    interval: Duration,
}

impl PeriodicJob {
    pub fn new(config: JobConfig, invoker: Arc<dyn ProcessInvoker>) -> Self {
        let interval = config
            .kind
            .interval()
            .unwrap_or(Duration::from_secs(DEFAULT_INTERVAL_SECS));
        Self {
            config: Arc::new(config),
            invoker,
            interval,
        }
    }
}

#[async_trait]
impl Job for PeriodicJob {
    fn config(&self) -> &JobConfig {
        &self.config
    }

    #[instrument(level = "debug", skip_all, fields(subcommand = %self.config.subcommand()))]
    async fn run(&self, state: RunState) -> JobOutcome {
        let builder = CommandBuilder::new(Arc::clone(&self.config), state.artifacts().clone());
        let shutdown = state.shutdown();
        debug!(target: "gbench.core.job", interval_ms = self.interval.as_millis() as u64, "periodic job starting");

        let mut tick = 0;
        loop {
            if shutdown.is_cancelled() {
                break;
            }

            let built = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                built = builder.build(InvocationContext::new(0, tick)) => built,
            };

            match built {
                Some(cmd) => match self.invoker.run(&cmd.spec).await {
                    Ok(_) => state.runs().incr(),
                    Err(e) => warn!(target: "gbench.core.job", tick, error = %e, "periodic invocation failed"),
                },
                None => trace!(target: "gbench.core.job", tick, "nothing to consume; tick skipped"),
            }
            tick += 1;

            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        debug!(target: "gbench.core.job", runs = state.runs().get(), ticks = tick, "periodic job stopped");
        JobOutcome::Stopped
    }
}
