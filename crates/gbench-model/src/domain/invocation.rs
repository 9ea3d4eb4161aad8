use std::time::Duration;

/// Outcome of one bulk invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationResult {
    /// Wall-clock time spent building, spawning and waiting.
    pub duration: Duration,
    /// Error text, including the combined process output.
    pub error: Option<String>,
}

impl InvocationResult {
    pub fn ok(duration: Duration) -> Self {
        Self {
            duration,
            error: None,
        }
    }

    pub fn failed(duration: Duration, error: impl Into<String>) -> Self {
        Self {
            duration,
            error: Some(error.into()),
        }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
