//! Terminal outcomes of a polling session that did not end in success.

use std::time::Duration;
use thiserror::Error;

/// Why a wait ended without the stop condition being satisfied.
#[derive(Debug, Error)]
pub enum WaitError {
    /// The most recent attempt failed and the deadline has since passed.
    #[error("health check for {service:?} failed: {source}")]
    Attempt {
        service: String,
        #[source]
        source: tonic::Status,
    },

    /// The deadline passed and the last attempt reported no error.
    #[error("timed out after {timeout:?} waiting for {service:?}")]
    Timeout { service: String, timeout: Duration },

    /// The caller's cancellation token fired first.
    #[error("wait for {service:?} cancelled")]
    Cancelled { service: String },
}

impl WaitError {
    /// Whether the wait ran out of time.
    ///
    /// Covers a synthesized timeout as well as a final attempt that was cut
    /// short by the deadline.
    pub fn is_timeout(&self) -> bool {
        match self {
            WaitError::Timeout { .. } => true,
            WaitError::Attempt { source, .. } => source.code() == tonic::Code::DeadlineExceeded,
            WaitError::Cancelled { .. } => false,
        }
    }

    /// Short label for reporting: `cancelled`, `timeout`, or `error`.
    pub fn kind(&self) -> &'static str {
        if self.is_cancelled() {
            "cancelled"
        } else if self.is_timeout() {
            "timeout"
        } else {
            "error"
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, WaitError::Cancelled { .. })
    }

    /// The gRPC status of the failed attempt, if any.
    pub fn status(&self) -> Option<&tonic::Status> {
        match self {
            WaitError::Attempt { source, .. } => Some(source),
            _ => None,
        }
    }
}
