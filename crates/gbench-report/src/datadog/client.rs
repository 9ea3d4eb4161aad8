use reqwest::StatusCode;
use serde_json::json;
use tracing::{debug, info};

use crate::ReportError;
use crate::datadog::config::DatadogConfig;
use crate::datadog::event::{EVENT_LOOKBACK_SECS, Event, EventQueryResponse};
use crate::datadog::series::Series;

/// Thin HTTP client over the Datadog v1 series and events endpoints.
#[derive(Debug, Clone)]
pub struct DatadogClient {
    http: reqwest::Client,
    cfg: DatadogConfig,
}

impl DatadogClient {
    pub fn new(cfg: DatadogConfig) -> Self {
        Self::with_http(reqwest::Client::new(), cfg)
    }

    pub fn with_http(http: reqwest::Client, cfg: DatadogConfig) -> Self {
        Self { http, cfg }
    }

    /// POST the series; Datadog acknowledges with 202.
    pub async fn emit_series(&self, series: &[Series]) -> Result<(), ReportError> {
        debug!(target: "gbench.report.datadog", count = series.len(), "emitting metric series");

        let response = self
            .http
            .post(self.cfg.series_url())
            .json(&json!({ "series": series }))
            .send()
            .await?;

        expect_status(response.status(), StatusCode::ACCEPTED, "submit series")
    }

    /// Whether an event titled `title` was posted in the lookback window ending at `now`.
    pub async fn event_already_published(&self, title: &str, now: i64) -> Result<bool, ReportError> {
        let start = now - EVENT_LOOKBACK_SECS;
        let url = format!("{}&start={start}&end={now}", self.cfg.events_url());

        let response = self.http.get(url).send().await?;
        expect_status(response.status(), StatusCode::OK, "event query")?;

        let body = response.text().await?;
        let found: EventQueryResponse = serde_json::from_str(&body)?;
        Ok(found.events.iter().any(|ev| ev.title == title))
    }

    pub async fn publish_event(&self, event: &Event) -> Result<(), ReportError> {
        info!(target: "gbench.report.datadog", title = %event.title, "publishing event");

        let response = self
            .http
            .post(self.cfg.events_url())
            .json(event)
            .send()
            .await?;

        expect_status(response.status(), StatusCode::ACCEPTED, "submit event")
    }
}

fn expect_status(got: StatusCode, want: StatusCode, op: &'static str) -> Result<(), ReportError> {
    if got == want {
        Ok(())
    } else {
        Err(ReportError::UnexpectedStatus {
            op,
            status: got.as_u16(),
        })
    }
}
