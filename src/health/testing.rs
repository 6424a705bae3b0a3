//! Scripted in-memory health check capability for unit tests.

use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;
use tonic::Status;
use tonic_health::pb::health_check_response::ServingStatus;
use tonic_health::pb::HealthCheckResponse;

use crate::health::client::HealthCheck;

#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Status(ServingStatus),
    /// Connection-level failure.
    Fail,
    /// Never answers; the attempt runs into its timeout.
    Hang,
}

/// Plays back replies in order, repeating the last one once exhausted.
pub struct ScriptedClient {
    replies: Vec<Reply>,
    latency: Duration,
    created: Instant,
    log: Mutex<Vec<(Duration, Duration)>>,
}

impl ScriptedClient {
    pub fn new(replies: Vec<Reply>) -> Self {
        assert!(!replies.is_empty());
        Self {
            replies,
            latency: Duration::ZERO,
            created: Instant::now(),
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn always(reply: Reply) -> Self {
        Self::new(vec![reply])
    }

    /// Simulated round trip per attempt.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> usize {
        self.log.lock().unwrap().len()
    }

    /// Offsets (in ms from creation) at which each attempt started.
    pub fn call_times_ms(&self) -> Vec<u128> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .map(|(at, _)| at.as_millis())
            .collect()
    }

    /// Per-attempt timeouts the poller handed out.
    pub fn timeouts(&self) -> Vec<Duration> {
        self.log.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }
}

impl HealthCheck for ScriptedClient {
    async fn check(
        &self,
        _service: &str,
        timeout: Duration,
    ) -> Result<HealthCheckResponse, Status> {
        let reply = {
            let mut log = self.log.lock().unwrap();
            log.push((self.created.elapsed(), timeout));
            self.replies[(log.len() - 1).min(self.replies.len() - 1)]
        };

        match reply {
            Reply::Hang => {
                tokio::time::sleep(timeout).await;
                Err(Status::deadline_exceeded("scripted attempt timed out"))
            }
            // A refused connection comes back within the attempt timeout.
            Reply::Fail => {
                tokio::time::sleep(self.latency.min(timeout)).await;
                Err(Status::unavailable("connection refused"))
            }
            Reply::Status(_) if self.latency > timeout => {
                tokio::time::sleep(timeout).await;
                Err(Status::deadline_exceeded("scripted attempt timed out"))
            }
            Reply::Status(status) => {
                tokio::time::sleep(self.latency).await;
                Ok(HealthCheckResponse {
                    status: status as i32,
                })
            }
        }
    }
}

/// Paused-clock sleeps land on millisecond ticks, so allow a little slack.
const SLACK_MS: u128 = 10;

pub fn assert_elapsed(start: Instant, expected: Duration) {
    let elapsed = start.elapsed();
    assert!(
        elapsed >= expected && elapsed.as_millis() <= expected.as_millis() + SLACK_MS,
        "elapsed {elapsed:?}, expected about {expected:?}"
    );
}

pub fn assert_offsets(actual: &[u128], expected: &[u128]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "attempts at {actual:?}, expected {expected:?}"
    );
    for (a, e) in actual.iter().zip(expected) {
        assert!(
            a >= e && a - e <= SLACK_MS,
            "attempts at {actual:?}, expected {expected:?}"
        );
    }
}
