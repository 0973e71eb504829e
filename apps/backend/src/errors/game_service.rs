//! Failures at the game process boundary.
//!
//! HTTP-agnostic. Handlers convert into `AppError` via the
//! `From<GameServiceError> for AppError` implementation in `crate::error`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameServiceError {
    /// An input value cannot be passed to the game process.
    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    /// The process could not be spawned.
    #[error("failed to launch game process `{program}`: {source}")]
    ProcessLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading output or waiting for exit failed after spawn.
    #[error("I/O error while running game process: {source}")]
    ProcessIo {
        #[source]
        source: std::io::Error,
    },

    /// The process exited with a non-zero status. `output` is diagnostic only.
    #[error("game process reported error (exit {exit_status})")]
    NonZeroExit { exit_status: i32, output: String },

    /// Exit 0, but the output is not the expected document.
    #[error("malformed response from game process: {detail}")]
    MalformedResponse { detail: String },
}

impl GameServiceError {
    pub fn invalid_argument(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            detail: detail.into(),
        }
    }
}
