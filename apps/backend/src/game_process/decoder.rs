use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::invoker::ProcessResult;
use crate::errors::GameServiceError;

/// Decode the output of a finished game process into `T`.
///
/// A non-zero exit is always a failure, whatever was printed. On exit 0 the
/// trimmed output must be exactly one JSON document of shape `T`.
pub fn decode<T: DeserializeOwned>(result: ProcessResult) -> Result<T, GameServiceError> {
    let output = result.raw_output.trim();

    if !result.success() {
        warn!(
            exit_status = result.exit_status,
            output = %output,
            "game process reported error"
        );
        return Err(GameServiceError::NonZeroExit {
            exit_status: result.exit_status,
            output: output.to_string(),
        });
    }

    debug!(output = %output, "game process returned");

    serde_json::from_str(output).map_err(|e| {
        warn!(error = %e, output = %output, "malformed game process response");
        GameServiceError::malformed(e.to_string())
    })
}
