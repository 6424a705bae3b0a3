//! Stop conditions evaluated against each attempt's response.

use tonic_health::pb::health_check_response::ServingStatus;
use tonic_health::pb::HealthCheckResponse;

/// Decides whether polling should end.
///
/// `None` means the attempt produced no response. Implementations run on the
/// poller's own path and must be pure and cheap.
pub trait StopCondition {
    fn should_stop(&self, response: Option<&HealthCheckResponse>) -> bool;
}

impl<F> StopCondition for F
where
    F: Fn(Option<&HealthCheckResponse>) -> bool,
{
    fn should_stop(&self, response: Option<&HealthCheckResponse>) -> bool {
        self(response)
    }
}

/// Stops on any response, whatever status it reports.
pub fn reachable(response: Option<&HealthCheckResponse>) -> bool {
    response.is_some()
}

/// Stops only once the service reports `SERVING`.
pub fn serving(response: Option<&HealthCheckResponse>) -> bool {
    response.is_some_and(|r| r.status() == ServingStatus::Serving)
}
