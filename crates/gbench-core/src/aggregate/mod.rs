//! Reduction of bulk invocation results into a [`Summary`].
use std::time::Duration;

use gbench_model::{InvocationResult, Summary};
use tokio::sync::mpsc;
use tracing::debug;

/// Run-level inputs echoed into the summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumSpec {
    /// Wall-clock duration of the whole bulk run.
    pub duration: Duration,
    pub concurrency: usize,
    pub use_quota: bool,
}

/// Streaming accumulator; results may arrive in any order.
#[derive(Debug, Default)]
pub struct Aggregator {
    total: usize,
    errors: usize,
    success_secs: f64,
    messages: Vec<String>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: InvocationResult) {
        self.total += 1;
        match result.error {
            Some(err) => {
                self.errors += 1;
                self.messages
                    .push(format!("could not create artifact {}: {}", self.total, err));
            }
            None => self.success_secs += result.duration.as_secs_f64(),
        }
    }

    pub fn finish(self, spec: &SumSpec) -> Summary {
        let successes = self.total - self.errors;
        let wall_secs = spec.duration.as_secs_f64();

        let images_per_second = if wall_secs > 0.0 {
            successes as f64 / wall_secs
        } else {
            0.0
        };
        let error_rate = if self.total > 0 {
            (self.errors * 100) as f64 / self.total as f64
        } else {
            0.0
        };
        let average_time_per_image = if successes == 0 {
            -1.0
        } else {
            self.success_secs / successes as f64
        };

        Summary {
            total_duration: spec.duration,
            images_per_second,
            ran_with_quota: spec.use_quota,
            average_time_per_image,
            total_errors_amt: self.errors,
            error_rate,
            total_images: self.total,
            concurrency_factor: spec.concurrency,
            error_messages: self.messages,
            ..Default::default()
        }
    }
}

/// Drain a closed result stream and reduce it.
///
/// Returns once every sender has been dropped.
pub async fn summarize(spec: SumSpec, mut results: mpsc::Receiver<InvocationResult>) -> Summary {
    let mut agg = Aggregator::new();
    while let Some(result) = results.recv().await {
        agg.push(result);
    }
    let summary = agg.finish(&spec);
    debug!(
        target: "gbench.core.aggregate",
        total = summary.total_images,
        errors = summary.total_errors_amt,
        "results summarized"
    );
    summary
}
