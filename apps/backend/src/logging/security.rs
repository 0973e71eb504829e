use tracing::warn;

use crate::trace_ctx;

/// Log a rejected bearer token.
pub fn auth_rejected(reason: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_AUTH_REJECTED",
        %trace_id,
        reason,
        "Authentication failure"
    );
}

/// Log a request for a user that is not known and could not be provisioned.
pub fn unknown_user(sub: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_UNKNOWN_USER",
        %trace_id,
        sub,
        "Token subject has no user record"
    );
}
