use std::process::Stdio;

use async_trait::async_trait;
use tracing::{debug, info};

use super::command::Command;
use crate::errors::GameServiceError;

/// Captured output of one finished game process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    /// Standard output followed by standard error.
    pub raw_output: String,
    /// Exit code; `-1` when the process was terminated by a signal.
    pub exit_status: i32,
}

impl ProcessResult {
    pub fn new(raw_output: impl Into<String>, exit_status: i32) -> Self {
        Self {
            raw_output: raw_output.into(),
            exit_status,
        }
    }

    pub fn success(&self) -> bool {
        self.exit_status == 0
    }
}

/// Runs a [`Command`] to completion.
///
/// There is no timeout: a hung game process holds the caller until it exits.
#[async_trait]
pub trait ProcessInvoker: Send + Sync {
    async fn invoke(&self, command: &Command) -> Result<ProcessResult, GameServiceError>;
}

/// Spawns the command as an OS process with `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubprocessInvoker;

#[async_trait]
impl ProcessInvoker for SubprocessInvoker {
    async fn invoke(&self, command: &Command) -> Result<ProcessResult, GameServiceError> {
        info!(command = %command, "invoking game process");

        let child = tokio::process::Command::new(command.program())
            .args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| GameServiceError::ProcessLaunch {
                program: command.program().to_string(),
                source,
            })?;

        // Drains both pipes concurrently, then reaps the child.
        let output = child
            .wait_with_output()
            .await
            .map_err(|source| GameServiceError::ProcessIo { source })?;

        let mut raw_output = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.stderr.is_empty() {
            if !raw_output.is_empty() && !raw_output.ends_with('\n') {
                raw_output.push('\n');
            }
            raw_output.push_str(&String::from_utf8_lossy(&output.stderr));
        }

        let exit_status = output.status.code().unwrap_or(-1);
        debug!(exit_status, bytes = raw_output.len(), "game process finished");

        Ok(ProcessResult {
            raw_output,
            exit_status,
        })
    }
}
