use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Statistical reduction of one benchmark run.
///
/// Field names are the public JSON contract consumed by the reporter and by dashboards.
/// `total_duration` is serialized as integer nanoseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(with = "duration_nanos")]
    pub total_duration: Duration,
    /// Successful invocations per wall-clock second.
    pub images_per_second: f64,
    pub ran_with_quota: bool,
    pub ran_with_parallel_clean: bool,
    pub number_of_cleans: u64,
    pub number_of_deletes: u64,
    /// Mean seconds per successful invocation, `-1` when nothing succeeded.
    pub average_time_per_image: f64,
    pub total_errors_amt: usize,
    /// Percentage of failed invocations, in `[0, 100]`.
    pub error_rate: f64,
    pub total_images: usize,
    pub concurrency_factor: usize,
    /// Diagnostic messages; never part of the structured payload.
    #[serde(skip)]
    pub error_messages: Vec<String>,
}

impl Summary {
    #[inline]
    pub fn has_errors(&self) -> bool {
        self.total_errors_amt > 0
    }

    #[inline]
    pub fn successes(&self) -> usize {
        self.total_images.saturating_sub(self.total_errors_amt)
    }
}

mod duration_nanos {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_nanos)
    }
}
