//! Runner that spawns real processes.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, trace};

use super::CommandRunner;
use crate::error::PollError;

/// Spawns the program directly (no shell) and waits for it to finish.
///
/// There is no timeout: a command that never exits blocks the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<Vec<u8>, PollError> {
        debug!(program, ?args, "running command");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| PollError::Launch {
                program: program.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(PollError::Exit {
                program: program.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        trace!(program, bytes = output.stdout.len(), "command finished");
        Ok(output.stdout)
    }
}
