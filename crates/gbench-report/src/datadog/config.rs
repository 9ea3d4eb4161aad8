use crate::ReportError;

pub const API_KEY_ENV: &str = "DATADOG_API_KEY";
pub const APP_KEY_ENV: &str = "DATADOG_APPLICATION_KEY";
pub const DEFAULT_ENDPOINT: &str = "https://app.datadoghq.com";

#[derive(Debug, Clone)]
pub struct DatadogConfig {
    pub api_key: String,
    pub application_key: String,
    /// Base url without trailing slash.
    pub endpoint: String,
}

impl DatadogConfig {
    pub fn new(api_key: impl Into<String>, application_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            application_key: application_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Read both keys from the process environment.
    pub fn from_env() -> Result<Self, ReportError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Both keys are required and must be non-empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ReportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or(ReportError::MissingEnv(key))
        };
        let api_key = read(API_KEY_ENV)?;
        let application_key = read(APP_KEY_ENV)?;
        Ok(Self::new(api_key, application_key))
    }

    pub(crate) fn series_url(&self) -> String {
        format!("{}/api/v1/series?api_key={}", self.endpoint, self.api_key)
    }

    pub(crate) fn events_url(&self) -> String {
        format!(
            "{}/api/v1/events?api_key={}&application_key={}",
            self.endpoint, self.api_key, self.application_key
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn reads_both_keys() {
        let vars = env(&[(API_KEY_ENV, "api"), (APP_KEY_ENV, "app")]);
        let cfg = DatadogConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(cfg.api_key, "api");
        assert_eq!(cfg.application_key, "app");
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn missing_or_empty_keys_are_rejected() {
        let vars = env(&[(APP_KEY_ENV, "app")]);
        let err = DatadogConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ReportError::MissingEnv(API_KEY_ENV)));

        let vars = env(&[(API_KEY_ENV, "api"), (APP_KEY_ENV, "")]);
        let err = DatadogConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert_eq!(err.to_string(), "DATADOG_APPLICATION_KEY not specified");
    }

    #[test]
    fn urls_carry_keys() {
        let cfg = DatadogConfig::new("a", "b").with_endpoint("http://127.0.0.1:9/");
        assert_eq!(cfg.series_url(), "http://127.0.0.1:9/api/v1/series?api_key=a");
        assert_eq!(
            cfg.events_url(),
            "http://127.0.0.1:9/api/v1/events?api_key=a&application_key=b"
        );
    }
}
