//! Cancellation coordination for a wait.

use tokio_util::sync::CancellationToken;

/// Coordinator for aborting an in-progress wait.
///
/// Hands out tokens the poller observes; triggering it cancels all of them.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    token: CancellationToken,
}

impl Shutdown {
    /// Create a new, untriggered coordinator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Token to pass to the cancellation-aware wait functions.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Trigger cancellation.
    pub fn trigger(&self) {
        self.token.cancel();
    }

    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }
}
