//! Datadog publishing for benchmark results.
//!
//! Two payloads are supported: metric series built from the JSON summary of a bench run,
//! and commit events used as dashboard markers.

mod client;
mod config;
mod event;
mod series;

pub use client::DatadogClient;
pub use config::{API_KEY_ENV, APP_KEY_ENV, DEFAULT_ENDPOINT, DatadogConfig};
pub use event::{EVENT_LOOKBACK_SECS, EVENT_TAG, Event, commit_title};
pub use series::{METRIC_TAG, Series, metric_series};

/// Seconds since the unix epoch.
pub fn unix_now() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}

#[cfg(test)]
pub(crate) mod stub;
