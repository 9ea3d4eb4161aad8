use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("binary path is empty")]
    EmptyBinary,
    #[error("store path is empty")]
    EmptyStore,
    #[error("log level is empty")]
    EmptyLogLevel,
    #[error("bulk job needs at least one base image")]
    NoBaseImage,
    #[error("base image reference at position {0} is empty")]
    EmptyBaseImage(usize),
}
