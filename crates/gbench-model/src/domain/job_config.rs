use serde::{Deserialize, Serialize};

use super::{ConfigError, Target};
use crate::{JobKind, Subcommand};

/// Immutable description of one job.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobConfig {
    pub target: Target,
    pub kind: JobKind,
}

impl JobConfig {
    pub fn new(target: Target, kind: JobKind) -> Self {
        Self { target, kind }
    }

    #[inline]
    pub fn subcommand(&self) -> Subcommand {
        self.kind.subcommand()
    }

    /// Check the configuration before any job is started.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.target.validate()?;

        if let JobKind::Bulk { base_images, .. } = &self.kind {
            if base_images.is_empty() {
                return Err(ConfigError::NoBaseImage);
            }
            if let Some(pos) = base_images.iter().position(|img| img.trim().is_empty()) {
                return Err(ConfigError::EmptyBaseImage(pos));
            }
        }
        Ok(())
    }
}
