mod job;
pub use job::{DEFAULT_INTERVAL_SECS, JobKind};

mod subcommand;
pub use subcommand::Subcommand;
