//! Shared utilities for integration testing against a real health server.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tonic_health::server::HealthReporter;
use tonic_health::ServingStatus;

use health_wait::health::connect_lazy;
use tonic::transport::Channel;
use tonic_health::pb::health_client::HealthClient;

pub const NORMAL_SERVICE: &str = "normal service";
pub const STUCK_SERVICE: &str = "stuck service";

/// A running `grpc.health.v1` server.
pub struct TestServer {
    pub reporter: HealthReporter,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Start a health server with one serving and one stuck service registered,
/// returning once it accepts connections.
pub async fn start_health_server(addr: SocketAddr) -> TestServer {
    let server = spawn_health_server(addr).await;
    for _ in 0..200 {
        if TcpStream::connect(addr).await.is_ok() {
            return server;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("health server on {addr} never came up");
}

/// Start a health server without waiting for it to bind.
pub async fn spawn_health_server(addr: SocketAddr) -> TestServer {
    let (mut reporter, service) = tonic_health::server::health_reporter();
    reporter
        .set_service_status(NORMAL_SERVICE, ServingStatus::Serving)
        .await;
    reporter
        .set_service_status(STUCK_SERVICE, ServingStatus::NotServing)
        .await;

    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let _ = tonic::transport::Server::builder()
            .add_service(service)
            .serve_with_shutdown(addr, async {
                let _ = rx.await;
            })
            .await;
    });

    TestServer {
        reporter,
        shutdown: Some(tx),
    }
}

/// Change `service`'s status at each offset, in order.
pub fn jitter(
    reporter: &HealthReporter,
    service: &'static str,
    steps: Vec<(Duration, ServingStatus)>,
) {
    let mut reporter = reporter.clone();
    tokio::spawn(async move {
        for (after, status) in steps {
            tokio::time::sleep(after).await;
            reporter.set_service_status(service, status).await;
        }
    });
}

pub fn client(addr: SocketAddr) -> HealthClient<Channel> {
    connect_lazy(&format!("http://{addr}"), Duration::from_secs(1)).unwrap()
}
