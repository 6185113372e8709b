#![forbid(unsafe_code)]

//! Logging setup.
//!
//! With the `tracing` feature the tracing macros are re-exported here so
//! downstream crates can use `coachmark_core::debug!` without their own
//! dependency. `tracing-json` adds a JSON subscriber for production hosts.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Environment variable consulted for the log filter.
pub const LOG_ENV: &str = "COACHMARK_LOG";

/// Install a global JSON subscriber filtered by `COACHMARK_LOG`
/// (default `info`).
///
/// Returns `false` if a global subscriber was already set.
#[cfg(feature = "tracing-json")]
pub fn init_json_subscriber() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(true)
        .try_init()
        .is_ok()
}
