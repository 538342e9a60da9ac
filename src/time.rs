//! Wall-clock helpers.
//!
//! The submission path stamps bare scalar measurements with the time of
//! the call. Everything downstream treats time as integer seconds since
//! the epoch, which is the resolution both wire formats care about.

use chrono::Utc;

/// The current wall-clock time in seconds since the Unix epoch.
pub fn now() -> i64 {
    Utc::now().timestamp()
}
