use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Subcommand;

/// Interval applied to periodic jobs configured with `0` seconds.
pub const DEFAULT_INTERVAL_SECS: u64 = 1;

/// Scheduling policy of a job together with the parameters that policy needs.
///
/// Each variant maps onto exactly one sub-command of the target binary:
/// - `Bulk` runs `create` a fixed number of times over a worker pool;
/// - `Periodic` runs `clean` once per interval until shutdown;
/// - `Consumer` runs `delete` once per interval, consuming one artifact name produced by the bulk job.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JobKind {
    Bulk {
        /// Base image references, used round-robin.
        base_images: Vec<String>,
        /// Pass the disk limit flag to every `create`.
        #[serde(default)]
        use_quota: bool,
        /// Number of workers; `0` means one per available CPU.
        #[serde(default)]
        concurrency: usize,
        /// Total number of invocations.
        total: usize,
    },
    Periodic {
        #[serde(default)]
        interval_secs: u64,
    },
    Consumer {
        #[serde(default)]
        interval_secs: u64,
    },
}

impl JobKind {
    pub fn bulk(base_images: Vec<String>, total: usize, concurrency: usize) -> Self {
        JobKind::Bulk {
            base_images,
            use_quota: false,
            concurrency,
            total,
        }
    }

    pub fn periodic(interval_secs: u64) -> Self {
        JobKind::Periodic { interval_secs }
    }

    pub fn consumer(interval_secs: u64) -> Self {
        JobKind::Consumer { interval_secs }
    }

    /// Short symbolic identifier, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            JobKind::Bulk { .. } => "bulk",
            JobKind::Periodic { .. } => "periodic",
            JobKind::Consumer { .. } => "consumer",
        }
    }

    pub fn subcommand(&self) -> Subcommand {
        match self {
            JobKind::Bulk { .. } => Subcommand::Create,
            JobKind::Periodic { .. } => Subcommand::Clean,
            JobKind::Consumer { .. } => Subcommand::Delete,
        }
    }

    #[inline]
    pub fn is_bulk(&self) -> bool {
        matches!(self, JobKind::Bulk { .. })
    }

    /// Tick interval of a periodic or consumer job, `None` for bulk jobs.
    pub fn interval(&self) -> Option<Duration> {
        match self {
            JobKind::Bulk { .. } => None,
            JobKind::Periodic { interval_secs } | JobKind::Consumer { interval_secs } => {
                let secs = if *interval_secs == 0 {
                    DEFAULT_INTERVAL_SECS
                } else {
                    *interval_secs
                };
                Some(Duration::from_secs(secs))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_subcommands() {
        assert_eq!(JobKind::bulk(vec!["img".into()], 1, 1).subcommand(), Subcommand::Create);
        assert_eq!(JobKind::periodic(3).subcommand(), Subcommand::Clean);
        assert_eq!(JobKind::consumer(3).subcommand(), Subcommand::Delete);
    }

    #[test]
    fn zero_interval_falls_back_to_default() {
        assert_eq!(
            JobKind::consumer(0).interval(),
            Some(Duration::from_secs(DEFAULT_INTERVAL_SECS))
        );
        assert_eq!(JobKind::periodic(5).interval(), Some(Duration::from_secs(5)));
        assert_eq!(JobKind::bulk(vec![], 0, 0).interval(), None);
    }

    #[test]
    fn serde_tagged_variant() {
        let kind = JobKind::periodic(2);
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, r#"{"periodic":{"interval_secs":2}}"#);

        let back: JobKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }
}
