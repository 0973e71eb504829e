//! Process-wide JSON tracing for the server binary.

use tracing::warn;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Used when `RUST_LOG` is unset or cannot be parsed.
pub const DEFAULT_DIRECTIVES: &str = "info,actix_web=info";

/// Filter for the given `RUST_LOG` value. An unparsable value falls back to
/// [`DEFAULT_DIRECTIVES`] and its parse error is returned alongside.
pub fn select_filter(requested: Option<&str>) -> (EnvFilter, Option<ParseError>) {
    match requested.map(EnvFilter::try_new) {
        Some(Ok(filter)) => (filter, None),
        Some(Err(e)) => (EnvFilter::new(DEFAULT_DIRECTIVES), Some(e)),
        None => (EnvFilter::new(DEFAULT_DIRECTIVES), None),
    }
}

pub fn init_tracing() {
    let requested = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (env_filter, rejected) = select_filter(requested.as_deref());

    // The request span opened by TraceSpan rides along on every event.
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .json()
        .with_current_span(true)
        .with_span_list(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    if let Some(e) = rejected {
        warn!(
            error = %e,
            value = requested.as_deref().unwrap_or_default(),
            defaults = DEFAULT_DIRECTIVES,
            "ignoring unparsable RUST_LOG"
        );
    }
}
