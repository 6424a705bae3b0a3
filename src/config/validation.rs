//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, known log levels)
//! - Check the target address is a usable gRPC URI
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: WaitConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::WaitConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("target.address {0:?} must start with http:// or https://")]
    InvalidAddress(String),

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("observability.log_level {0:?} is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &WaitConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let address = config.target.address.as_str();
    if !(address.starts_with("http://") || address.starts_with("https://")) {
        errors.push(ValidationError::InvalidAddress(address.to_string()));
    }

    if config.target.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroDuration("target.connect_timeout_secs"));
    }

    // Zero is legal for the library (fail without an attempt) but useless here.
    if config.wait.timeout_secs == 0 {
        errors.push(ValidationError::ZeroDuration("wait.timeout_secs"));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
