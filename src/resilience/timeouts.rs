//! Deadline arithmetic for a polling session.
//!
//! # Responsibilities
//! - Fix the session deadline once, at the start
//! - Derive every "time remaining" value from that single instant
//!
//! # Design Decisions
//! - Uses Tokio's clock so paused-time tests drive it deterministically
//! - Remaining time saturates at zero; an expired deadline is never negative
//! - Timeouts beyond `MAX_HORIZON` are clamped to it

use std::time::Duration;
use tokio::time::Instant;

/// Longest session a deadline represents (about 30 years). Keeps instant
/// arithmetic from overflowing and per-attempt timeouts encodable as a gRPC
/// `grpc-timeout` header.
pub const MAX_HORIZON: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Absolute end of one polling session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// Start a session that ends `timeout` from now.
    pub fn after(timeout: Duration) -> Self {
        let now = Instant::now();
        let at = now
            .checked_add(timeout.min(MAX_HORIZON))
            .or_else(|| now.checked_add(Duration::from_secs(86_400 * 365)))
            .unwrap_or(now);
        Self { at }
    }

    /// Time left before the deadline, zero once it has passed.
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }
}
