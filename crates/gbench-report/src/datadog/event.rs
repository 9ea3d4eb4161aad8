use serde::{Deserialize, Serialize};

pub const EVENT_TAG: &str = "grootfs:performance";
/// Window searched for an already published event.
pub const EVENT_LOOKBACK_SECS: i64 = 30 * 24 * 60 * 60;

pub fn commit_title(title: &str) -> String {
    format!("grootfs-commit: {title}")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub date_happened: i64,
}

impl Event {
    /// Commit marker event; `title` is expanded with [`commit_title`].
    pub fn commit(title: &str, text: impl Into<String>, now: i64) -> Self {
        Self {
            title: commit_title(title),
            text: text.into(),
            tags: vec![EVENT_TAG.to_string()],
            date_happened: now,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct EventQueryResponse {
    #[serde(default)]
    pub events: Vec<Event>,
}
