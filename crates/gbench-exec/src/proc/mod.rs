use std::path::PathBuf;

use async_trait::async_trait;
use gbench_core::{CommandSpec, InvokeError, ProcessInvoker};
use tracing::{debug, trace};

use crate::{
    error::{ExecError, ExecResult},
    util::{capture, cmd_program, combined_output},
};

/// Process settings shared by every invocation.
#[derive(Clone, Debug, Default)]
pub struct ProcConfig {
    pub env: Vec<(String, String)>,
    pub cwd: Option<PathBuf>,
    /// Let the child write straight to our stderr; the returned output is then stdout only.
    pub inherit_stderr: bool,
}

/// Invoker that spawns the target binary as a child process.
///
/// No timeout is applied: a hung child blocks the calling worker until it exits.
pub struct ProcInvoker {
    name: &'static str,
    cfg: ProcConfig,
}

impl ProcInvoker {
    pub fn new(cfg: ProcConfig) -> Self {
        Self { name: "proc", cfg }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    async fn execute(&self, spec: &CommandSpec) -> ExecResult<String> {
        if spec.program.is_empty() {
            return Err(ExecError::MissingProgram);
        }

        let mut cmd = cmd_program(&spec.program, &spec.args);
        if let Some(cwd) = &self.cfg.cwd {
            cmd.current_dir(cwd);
        }
        for (k, v) in &self.cfg.env {
            cmd.env(k, v);
        }
        capture(&mut cmd, self.cfg.inherit_stderr);

        trace!(target: "gbench.exec.proc", program = %spec.program, args = ?spec.args, "spawn");
        let child = cmd.spawn().map_err(|source| ExecError::Spawn {
            program: spec.program.clone(),
            source,
        })?;
        let output = child.wait_with_output().await.map_err(ExecError::Wait)?;
        let text = combined_output(&output);

        if output.status.success() {
            trace!(target: "gbench.exec.proc", "exit success");
            return Ok(text);
        }

        debug!(target: "gbench.exec.proc", status = %output.status, "child failed");
        Err(ExecError::Failed {
            status: output.status,
            output: text.trim_end().to_string(),
        })
    }
}

impl Default for ProcInvoker {
    fn default() -> Self {
        Self::new(ProcConfig::default())
    }
}

#[async_trait]
impl ProcessInvoker for ProcInvoker {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn run(&self, cmd: &CommandSpec) -> Result<String, InvokeError> {
        self.execute(cmd).await.map_err(InvokeError::from)
    }
}
