//! The single-attempt health check capability the poller drives.
//!
//! # Responsibilities
//! - Define the seam between the poller and the health protocol
//! - Adapt the tonic `grpc.health.v1` client to that seam
//! - Guarantee every attempt returns once its timeout elapses

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tonic::transport::Channel;
use tonic::{Code, Request, Status};
use tonic_health::pb::health_client::HealthClient;
use tonic_health::pb::{HealthCheckRequest, HealthCheckResponse};

/// Anything able to ask a remote endpoint for the health of one service.
///
/// Implementations must return within `timeout`. The poller never mutates or
/// closes the capability, so it is borrowed shared.
pub trait HealthCheck {
    fn check(
        &self,
        service: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<HealthCheckResponse, Status>> + Send;
}

impl HealthCheck for HealthClient<Channel> {
    fn check(
        &self,
        service: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<HealthCheckResponse, Status>> + Send {
        // Clients share one underlying channel, so a clone per attempt is cheap.
        let mut client = self.clone();
        let mut request = Request::new(HealthCheckRequest {
            service: service.to_string(),
        });
        request.set_timeout(timeout);

        async move {
            let started = Instant::now();
            match tokio::time::timeout(timeout, HealthClient::check(&mut client, request)).await {
                Ok(result) => result
                    .map(tonic::Response::into_inner)
                    .map_err(|status| classify_failure(status, started.elapsed(), timeout)),
                Err(_) => Err(attempt_timed_out(timeout)),
            }
        }
    }
}

/// tonic's own client-side timeout reports `CANCELLED`; once the attempt
/// budget is spent that is a deadline, not a cancellation.
fn classify_failure(status: Status, elapsed: Duration, timeout: Duration) -> Status {
    if status.code() == Code::Cancelled && elapsed >= timeout {
        attempt_timed_out(timeout)
    } else {
        status
    }
}

fn attempt_timed_out(timeout: Duration) -> Status {
    Status::deadline_exceeded(format!(
        "health check did not complete within {timeout:?}"
    ))
}

/// Build a health client over a channel that connects on first use.
///
/// Connecting lazily turns "nothing listening yet" into an ordinary failed
/// attempt instead of an error before polling starts.
pub fn connect_lazy(
    address: &str,
    connect_timeout: Duration,
) -> Result<HealthClient<Channel>, tonic::transport::Error> {
    let channel = tonic::transport::Endpoint::from_shared(address.to_string())?
        .connect_timeout(connect_timeout)
        .connect_lazy();
    Ok(HealthClient::new(channel))
}
