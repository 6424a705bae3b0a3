//! Health waiting subsystem.
//!
//! # Data Flow
//! ```text
//! wait.rs (wait_for_health / wait_for_healthy):
//!     Select a stop condition (condition.rs)
//!     → poller.rs loop
//!         → client.rs: one grpc.health.v1 Check, bounded by time remaining
//!         → Condition holds: return the response
//!         → Otherwise: back off (resilience::backoff) and retry
//!     → Deadline or cancellation: error.rs
//! ```
//!
//! # Design Decisions
//! - Attempts are strictly sequential; never more than one in flight
//! - `NOT_SERVING` is ordinary polling state, never an error
//! - The caller's client is borrowed, never closed

pub mod client;
pub mod condition;
pub mod error;
pub mod poller;
pub mod wait;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{connect_lazy, HealthCheck};
pub use condition::StopCondition;
pub use error::WaitError;
pub use poller::poll_until;
pub use wait::{
    wait_for_health, wait_for_health_with_cancel, wait_for_healthy, wait_for_healthy_with_cancel,
};
