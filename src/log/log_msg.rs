use std::time::{SystemTime, UNIX_EPOCH};

use crate::log::log_level::LogLevel;

/// Represents a single log message event.
///
/// Carries the severity, a millisecond timestamp, the origin (target) and the
/// message text itself.
#[derive(Debug, Clone)]
pub struct LogMsg {
    /// The severity level of the log.
    pub level: LogLevel,
    /// The timestamp of the log event in milliseconds.
    pub ts_ms: u128,
    /// The actual content of the log message.
    pub text: String,
    /// The target source of the log, typically the static module path.
    pub target: &'static str, // module path
}

/// Milliseconds since the UNIX epoch, used to timestamp log events.
#[must_use]
pub fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}
