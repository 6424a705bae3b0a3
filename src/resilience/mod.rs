//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Polling session:
//!     → timeouts.rs (fix the deadline, bound each attempt by time remaining)
//!     → On unsatisfied attempt: backoff.rs (pick 4s / 1s / no delay)
//! ```
//!
//! # Design Decisions
//! - The overall deadline is the single hard ceiling; nothing retries past it
//! - Backoff constants are fixed, not configurable

pub mod backoff;
pub mod timeouts;

pub use backoff::{next_delay, MIN_DELAY, NORMAL_DELAY};
pub use timeouts::Deadline;
