//! `health-wait`: block until a gRPC service is reachable or serving.
//!
//! Intended for bootstrap scripts and container entrypoints that must not
//! start before a dependency is up.
//!
//! Exit codes: 0 condition met, 1 timed out or failed, 2 bad configuration,
//! 130 cancelled by signal.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde_json::json;

use health_wait::config::{load_config, validate_config, ConfigError, WaitConfig, WaitMode};
use health_wait::health::connect_lazy;
use health_wait::lifecycle::{spawn_signal_listener, Shutdown};
use health_wait::observability::init_logging;
use health_wait::{wait_for_health_with_cancel, wait_for_healthy_with_cancel, WaitError};

#[derive(Parser)]
#[command(name = "health-wait")]
#[command(about = "Wait for a gRPC service to become healthy", long_about = None)]
struct Cli {
    /// TOML configuration file; flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// gRPC endpoint URI.
    #[arg(short, long)]
    addr: Option<String>,

    /// Service name to ask about (empty for the whole server).
    #[arg(short, long)]
    service: Option<String>,

    /// Overall timeout in seconds.
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Wait until reachable, or until serving.
    #[arg(short, long, value_enum)]
    mode: Option<WaitMode>,

    /// Print the outcome as JSON.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn resolve(&self) -> Result<WaitConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => WaitConfig::default(),
        };

        if let Some(addr) = &self.addr {
            config.target.address = addr.clone();
        }
        if let Some(service) = &self.service {
            config.target.service = service.clone();
        }
        if let Some(timeout) = self.timeout {
            config.wait.timeout_secs = timeout;
        }
        if let Some(mode) = self.mode {
            config.wait.mode = mode;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("health-wait: {}", e);
            return Ok(ExitCode::from(2));
        }
    };

    init_logging(&config.observability)?;

    let client = connect_lazy(&config.target.address, config.target.connect_timeout())?;
    let shutdown = Shutdown::new();
    spawn_signal_listener(shutdown.clone());

    tracing::info!(
        address = %config.target.address,
        service = %config.target.service,
        timeout_secs = config.wait.timeout_secs,
        mode = ?config.wait.mode,
        "Waiting for service health"
    );

    let service = config.target.service.as_str();
    let timeout = config.wait.timeout();
    let outcome = match config.wait.mode {
        WaitMode::Reachable => {
            wait_for_health_with_cancel(&client, service, timeout, shutdown.token())
                .await
                .map(|response| response.status())
        }
        WaitMode::Serving => {
            wait_for_healthy_with_cancel(&client, service, timeout, shutdown.token())
                .await
                .map(|()| health_wait::ServingStatus::Serving)
        }
    };

    Ok(report(service, outcome, cli.json))
}

fn report(
    service: &str,
    outcome: Result<health_wait::ServingStatus, WaitError>,
    as_json: bool,
) -> ExitCode {
    let (code, line) = match &outcome {
        Ok(status) => {
            let line = if as_json {
                json!({ "service": service, "outcome": "ok", "status": status.as_str_name() })
                    .to_string()
            } else {
                status.as_str_name().to_string()
            };
            (0, line)
        }
        Err(e) => {
            let kind = e.kind();
            let code = if e.is_cancelled() { 130 } else { 1 };
            let line = if as_json {
                json!({ "service": service, "outcome": kind, "error": e.to_string() }).to_string()
            } else {
                format!("health-wait: {}", e)
            };
            (code, line)
        }
    };

    if code == 0 || as_json {
        println!("{}", line);
    } else {
        eprintln!("{}", line);
    }
    ExitCode::from(code)
}
