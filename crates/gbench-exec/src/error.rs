use std::io;
use std::process::ExitStatus;

use gbench_core::InvokeError;
use thiserror::Error;

pub type ExecResult<T> = Result<T, ExecError>;

/// Failure of one child process, as seen from the process layer.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("missing program")]
    MissingProgram,
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to collect child output: {0}")]
    Wait(#[source] io::Error),
    /// The child ran but did not succeed; `output` is the trimmed combined output.
    #[error("{status}, {output}")]
    Failed { status: ExitStatus, output: String },
}

/// Condense process details into the invoker contract: exit code or signal death, plus output.
impl From<ExecError> for InvokeError {
    fn from(e: ExecError) -> Self {
        match e {
            ExecError::MissingProgram => InvokeError::Spawn("missing program".into()),
            ExecError::Spawn { program, source } => InvokeError::Spawn(format!("{program}: {source}")),
            ExecError::Wait(source) => InvokeError::Io(source.to_string()),
            ExecError::Failed { status, output } => match status.code() {
                Some(code) => InvokeError::NonZeroExit { code, output },
                None => InvokeError::KilledBySignal { output },
            },
        }
    }
}
