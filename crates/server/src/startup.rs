use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Resolve when Ctrl+C arrives; in-flight requests finish before `run` returns.
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C, shutting down");
    }
}

/// Public entry: open the stores, build the app and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    common::env::ensure_env(&cfg.frontend.dir, &cfg.storage.data_dir)
        .await
        .map_err(|e| StartupError::Environment(e.to_string()))?;

    let state = ServerState::open(&cfg.storage).await?;
    let app: Router = routes::build_router(state, build_cors(), &cfg.frontend.dir);

    let addr = cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    info!(addr = %listener.local_addr()?, "starting server");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}
