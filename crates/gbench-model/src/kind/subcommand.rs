use std::fmt;

use serde::{Deserialize, Serialize};

/// Sub-command of the target binary a job drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Subcommand {
    Create,
    Clean,
    Delete,
}

impl Subcommand {
    /// Literal argument passed to the binary.
    pub fn as_str(&self) -> &'static str {
        match self {
            Subcommand::Create => "create",
            Subcommand::Clean => "clean",
            Subcommand::Delete => "delete",
        }
    }
}

impl fmt::Display for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
