use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

use async_trait::async_trait;

use crate::{
    error::InvokeError,
    invoker::{CommandSpec, ProcessInvoker},
};

/// Records every command and answers according to a fixed policy.
pub(crate) struct FakeInvoker {
    executed: Mutex<Vec<CommandSpec>>,
    calls: AtomicUsize,
    fail_first: usize,
    output: String,
    delay: Option<Duration>,
}

impl FakeInvoker {
    pub(crate) fn succeeding() -> Self {
        Self {
            executed: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            fail_first: 0,
            output: "/var/lib/grootfs/images/fake".to_string(),
            delay: None,
        }
    }

    pub(crate) fn failing(output: &str) -> Self {
        Self::failing_first(usize::MAX, output)
    }

    /// Fails the first `n` calls, succeeds afterwards.
    pub(crate) fn failing_first(n: usize, output: &str) -> Self {
        Self {
            fail_first: n,
            output: output.to_string(),
            ..Self::succeeding()
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn executed(&self) -> Vec<CommandSpec> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessInvoker for FakeInvoker {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn run(&self, cmd: &CommandSpec) -> Result<String, InvokeError> {
        self.executed.lock().unwrap().push(cmd.clone());
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if call < self.fail_first {
            return Err(InvokeError::NonZeroExit {
                code: 1,
                output: self.output.clone(),
            });
        }
        Ok(self.output.clone())
    }
}
