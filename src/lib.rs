//! A small HTTP service answering a greeting on `/` and a liveness probe on `/status`.

use std::future::Future;

use tokio::{signal, task::JoinHandle};
use tokio_util::{sync::CancellationToken, task::TaskTracker};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{config::Config, http::HttpServer, types::Result};

pub mod config;
pub mod http;
pub mod types;

/// Process entry point: logging, configuration from the environment, then [`run`].
pub async fn start() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let config = Config::new().inspect_err(|e| tracing::error!("🚫 {e}"))?;
    run(config).await
}

/// Serves until a shutdown signal arrives or the server fails. A server failure is returned.
pub async fn run(config: Config) -> Result<()> {
    let tracker = TaskTracker::new();
    let token = CancellationToken::new();
    tracker.spawn_signal_listener(token.clone());
    let server = tracker.spawn_http_server(token, &config);

    tracker.close();
    tracker.wait().await;
    server.await?
}

/// Runs `task` to completion. On failure the whole service is brought down through `token`.
async fn critical_task<F>(name: &'static str, token: CancellationToken, task: F) -> Result<()>
where
    F: Future<Output = Result<()>> + Send + 'static,
{
    let result = task.await;
    if let Err(e) = &result {
        tracing::error!(task = name, "🚫 Critical task failed: {e}");
        token.cancel();
    }
    result
}

/// Resolves with the name of the first termination signal received.
#[cfg(unix)]
async fn termination_signal() -> &'static str {
    use tokio::signal::unix::{signal as unix_signal, SignalKind};

    match unix_signal(SignalKind::terminate()) {
        Ok(mut sigterm) => tokio::select! {
            _ = signal::ctrl_c() => "SIGINT",
            _ = sigterm.recv() => "SIGTERM",
        },
        Err(e) => {
            tracing::warn!("⚠️ SIGTERM handler unavailable, listening for Ctrl+C only: {e}");
            let _ = signal::ctrl_c().await;
            "SIGINT"
        }
    }
}

#[cfg(not(unix))]
async fn termination_signal() -> &'static str {
    let _ = signal::ctrl_c().await;
    "Ctrl+C"
}

trait ServiceTasks {
    fn spawn_http_server(&self, token: CancellationToken, config: &Config)
        -> JoinHandle<Result<()>>;

    fn spawn_signal_listener(&self, token: CancellationToken);
}

impl ServiceTasks for TaskTracker {
    fn spawn_http_server(
        &self,
        token: CancellationToken,
        config: &Config,
    ) -> JoinHandle<Result<()>> {
        let server = HttpServer::new(config.socket_addr(), config.api_docs);
        self.spawn(critical_task(
            "http_server",
            token.clone(),
            async move { server.serve(token).await },
        ))
    }

    fn spawn_signal_listener(&self, token: CancellationToken) {
        self.spawn(async move {
            tokio::select! {
                signal = termination_signal() => {
                    tracing::info!(signal, "🛑 Shutting down");
                    token.cancel();
                },
                _ = token.cancelled() => {},
            }
        });
    }
}
