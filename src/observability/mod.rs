//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! poller and entry points emit tracing events
//!     → logging.rs (filter + pretty/JSON formatting)
//!     → stderr
//! ```

pub mod logging;

pub use logging::init_logging;
