use gbench_model::ConfigError;
use thiserror::Error;

/// Structural failures: the run cannot start or could not be joined.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid job config: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("no bulk job configured; periodic jobs would never be stopped")]
    NoBulkJob,
    #[error("exactly one bulk job per run is supported, got {0}")]
    MultipleBulkJobs(usize),
    #[error("job task failed: {0}")]
    Join(String),
}

/// Failure of a single invocation of the target binary.
///
/// Carries the combined process output; it is recorded, never propagated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvokeError {
    #[error("spawn failed: {0}")]
    Spawn(String),
    #[error("exit status {code}, {output}")]
    NonZeroExit { code: i32, output: String },
    #[error("killed by signal, {output}")]
    KilledBySignal { output: String },
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for InvokeError {
    fn from(e: std::io::Error) -> Self {
        InvokeError::Io(e.to_string())
    }
}
