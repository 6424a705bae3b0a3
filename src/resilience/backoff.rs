//! Two-tier backoff between polling attempts.

use std::time::Duration;

/// Delay between attempts while the deadline is comfortably far away.
pub const NORMAL_DELAY: Duration = Duration::from_secs(4);

/// Delay between attempts once less than [`NORMAL_DELAY`] remains.
pub const MIN_DELAY: Duration = Duration::from_secs(1);

/// Pick the sleep before the next attempt given the time left until the
/// deadline.
///
/// Granularity shrinks as the deadline approaches so the final sleep never
/// carries the loop past it: 4s, then 1s, then nothing.
pub fn next_delay(remaining: Duration) -> Duration {
    if remaining > NORMAL_DELAY {
        NORMAL_DELAY
    } else if remaining > MIN_DELAY {
        MIN_DELAY
    } else {
        Duration::ZERO
    }
}
