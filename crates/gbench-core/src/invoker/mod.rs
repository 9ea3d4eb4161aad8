use std::fmt;

use async_trait::async_trait;

use crate::error::InvokeError;

/// A fully built command line: program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Last argument, which for `create` and `delete` is the artifact name.
    pub fn last_arg(&self) -> Option<&str> {
        self.args.last().map(String::as_str)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Executes one command to completion.
///
/// Implementations capture stdout and stderr together and return them as the output.
/// A non-zero exit is an error that still carries that output.
#[async_trait]
pub trait ProcessInvoker: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self, cmd: &CommandSpec) -> Result<String, InvokeError>;
}
