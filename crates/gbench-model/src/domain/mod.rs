mod error;
pub use error::ConfigError;

mod target;
pub use target::Target;

mod job_config;
pub use job_config::JobConfig;

mod invocation;
pub use invocation::InvocationResult;

mod summary;
pub use summary::Summary;

/// Fixed byte value passed along with `--disk-limit-size-bytes` when quota is enabled.
pub const DISK_LIMIT_SIZE_BYTES: u64 = 1_019_430_400;
