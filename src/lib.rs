//! Bounded waiting on gRPC health endpoints.
//!
//! Polls `grpc.health.v1.Health/Check` until a service becomes reachable
//! ([`wait_for_health`]) or reports `SERVING` ([`wait_for_healthy`]), backing
//! off between attempts and giving up at a fixed deadline.

pub mod config;
pub mod health;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::WaitConfig;
pub use health::{
    poll_until, wait_for_health, wait_for_health_with_cancel, wait_for_healthy,
    wait_for_healthy_with_cancel, HealthCheck, StopCondition, WaitError,
};
pub use lifecycle::Shutdown;
pub use tonic_health::pb::health_check_response::ServingStatus;
pub use tonic_health::pb::{HealthCheckRequest, HealthCheckResponse};
