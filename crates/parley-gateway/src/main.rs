//! parley gateway
//!
//! - WebSocket endpoint: /v1/ws
//! - Ops endpoints: /healthz, /readyz, /metrics
//! - Config: ./parley.yaml (optional), `PORT` overrides the listen port
//! - Graceful shutdown on Ctrl-C / SIGTERM

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use parley_core::error::{ParleyError, Result};
use parley_gateway::{app_state::AppState, config, router};

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "parley-gateway failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let mut cfg = config::load_or_default(config::DEFAULT_PATH)?;
    config::apply_env(&mut cfg)?;
    let listen = cfg.gateway.listen_addr()?;

    let state = AppState::new(cfg);
    let app = router::build_router(state.clone());

    tracing::info!(%listen, "parley-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| ParleyError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .map_err(|e| ParleyError::Internal(format!("server failed: {e}")))?;

    tracing::info!("parley-gateway stopped");
    Ok(())
}

async fn shutdown_signal(state: AppState) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "ctrl-c handler failed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler failed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    state.begin_draining();
    tracing::info!("shutdown requested, draining");
}
