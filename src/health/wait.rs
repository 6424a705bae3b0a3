//! Public entry points: wait until reachable, or until serving.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tonic_health::pb::HealthCheckResponse;

use crate::health::client::HealthCheck;
use crate::health::condition::{reachable, serving};
use crate::health::error::WaitError;
use crate::health::poller::poll_until;

/// Wait until `service` answers a health check at all, whatever status it
/// reports. Returns the first response.
pub async fn wait_for_health<C: HealthCheck>(
    client: &C,
    service: &str,
    timeout: Duration,
) -> Result<HealthCheckResponse, WaitError> {
    wait_for_health_with_cancel(client, service, timeout, &CancellationToken::new()).await
}

/// Wait until `service` reports `SERVING`.
pub async fn wait_for_healthy<C: HealthCheck>(
    client: &C,
    service: &str,
    timeout: Duration,
) -> Result<(), WaitError> {
    wait_for_healthy_with_cancel(client, service, timeout, &CancellationToken::new()).await
}

/// [`wait_for_health`] that also gives up as soon as `cancel` fires.
pub async fn wait_for_health_with_cancel<C: HealthCheck>(
    client: &C,
    service: &str,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<HealthCheckResponse, WaitError> {
    poll_until(client, service, timeout, cancel, reachable).await
}

/// [`wait_for_healthy`] that also gives up as soon as `cancel` fires.
pub async fn wait_for_healthy_with_cancel<C: HealthCheck>(
    client: &C,
    service: &str,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<(), WaitError> {
    poll_until(client, service, timeout, cancel, serving)
        .await
        .map(|_| ())
}
