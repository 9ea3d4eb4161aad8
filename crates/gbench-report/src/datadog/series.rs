use serde::{Deserialize, Serialize};

pub const METRIC_TAG: &str = "concourse";

/// One Datadog metric series with a single point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub metric: String,
    /// `[[timestamp, value]]`
    pub points: Vec<(f64, f64)>,
    pub tags: Vec<String>,
}

/// Turn every numeric field of a bench summary into a series named
/// `{prefix}.grootfs.benchmark-performance.{field}`. Other fields are skipped.
pub fn metric_series(prefix: &str, summary: &serde_json::Value, now: i64) -> Vec<Series> {
    let Some(fields) = summary.as_object() else {
        return Vec::new();
    };

    fields
        .iter()
        .filter_map(|(key, value)| {
            let metric = value.as_f64()?;
            Some(Series {
                metric: format!("{prefix}.grootfs.benchmark-performance.{key}"),
                points: vec![(now as f64, metric)],
                tags: vec![METRIC_TAG.to_string()],
            })
        })
        .collect()
}
