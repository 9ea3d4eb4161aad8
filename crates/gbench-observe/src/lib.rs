//! Logging bootstrap shared by the bench binaries.
//!
//! Everything is written to stderr. stdout belongs to the benchmark report, so a
//! `grootfs-bench --json | jq` pipeline keeps working with tracing enabled.

mod config;
mod error;
mod init;

pub use config::{LoggerConfig, LoggerFormat};
pub use error::LoggerError;
pub use init::logger_init;
