//! The polling loop.
//!
//! # Responsibilities
//! - Issue sequential health check attempts against one service
//! - Bound each attempt by the time left until the session deadline
//! - Sleep between unsatisfied attempts with two-tier backoff
//! - Stop on the first satisfying response, deadline expiry, or cancellation

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tonic::Status;
use tonic_health::pb::HealthCheckResponse;

use crate::health::client::HealthCheck;
use crate::health::condition::StopCondition;
use crate::health::error::WaitError;
use crate::resilience::{next_delay, Deadline};

/// Poll `service` through `client` until `stop` holds, `timeout` elapses, or
/// `cancel` fires.
///
/// On expiry the error of the most recent attempt is returned if that attempt
/// failed; otherwise a [`WaitError::Timeout`] is synthesized. A zero timeout
/// fails without issuing any attempt.
pub async fn poll_until<C, S>(
    client: &C,
    service: &str,
    timeout: Duration,
    cancel: &CancellationToken,
    stop: S,
) -> Result<HealthCheckResponse, WaitError>
where
    C: HealthCheck,
    S: StopCondition,
{
    let started = Instant::now();
    let deadline = Deadline::after(timeout);
    let mut last_error: Option<Status> = None;
    let mut attempt: u32 = 0;

    loop {
        let remaining = deadline.remaining();
        if remaining.is_zero() {
            return Err(expired(service, timeout, attempt, last_error));
        }

        attempt += 1;
        tracing::debug!(
            service = %service,
            attempt,
            remaining_ms = remaining.as_millis() as u64,
            "Checking health"
        );

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(cancelled(service, attempt)),
            result = client.check(service, remaining) => result,
        };

        match result {
            Ok(response) => {
                if stop.should_stop(Some(&response)) {
                    tracing::info!(
                        service = %service,
                        attempt,
                        status = response.status().as_str_name(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Health condition satisfied"
                    );
                    return Ok(response);
                }
                tracing::debug!(
                    service = %service,
                    status = response.status().as_str_name(),
                    "Health condition not yet satisfied"
                );
                last_error = None;
            }
            Err(status) => {
                tracing::debug!(
                    service = %service,
                    code = ?status.code(),
                    message = status.message(),
                    "Health check attempt failed"
                );
                last_error = Some(status);
            }
        }

        let delay = next_delay(deadline.remaining());
        if !delay.is_zero() {
            tracing::debug!(service = %service, delay_ms = delay.as_millis() as u64, "Backing off");
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(cancelled(service, attempt)),
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
}

fn expired(service: &str, timeout: Duration, attempts: u32, last_error: Option<Status>) -> WaitError {
    match last_error {
        Some(source) => {
            tracing::warn!(
                service = %service,
                attempts,
                code = ?source.code(),
                "Deadline passed after failed health check"
            );
            WaitError::Attempt {
                service: service.to_string(),
                source,
            }
        }
        None => {
            tracing::warn!(service = %service, attempts, ?timeout, "Timed out waiting for health");
            WaitError::Timeout {
                service: service.to_string(),
                timeout,
            }
        }
    }
}

fn cancelled(service: &str, attempts: u32) -> WaitError {
    tracing::info!(service = %service, attempts, "Health wait cancelled");
    WaitError::Cancelled {
        service: service.to_string(),
    }
}
