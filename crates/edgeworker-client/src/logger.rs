//! Logging convenience wrappers.

use tracing::debug;

use crate::sanitize::redact;

/// Log at debug level, redacting secrets unless `sanitize` is off.
pub(crate) fn debug_with_sanitization(sanitize: bool, label: &str, message: &str) {
    if sanitize {
        debug!("{} {}", label, redact(message));
    } else {
        debug!("{} {}", label, message);
    }
}
