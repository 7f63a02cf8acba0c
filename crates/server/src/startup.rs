use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::auth::token::TokenConfig;
use service::images::HttpImageStore;

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &configs::ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))
}

/// Connect, migrate and assemble the router for `cfg`.
pub async fn build_app(cfg: &configs::AppConfig) -> Result<Router, StartupError> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if cfg.database.run_migrations {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Database(format!("migrations failed: {e}")))?;
        info!("migrations applied");
    }

    service::metrics::init();
    let state = ServerState {
        db,
        tokens: TokenConfig::from(&cfg.auth),
        images: Arc::new(HttpImageStore::from_config(&cfg.images)),
    };
    Ok(routes::build_router(state, build_cors()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "ctrl_c listener failed; shutting down");
    }
    info!("shutdown signal received, draining in-flight requests");
}

/// Serve the app for an already loaded and validated `cfg` until Ctrl+C.
/// In-flight requests (and their transactions) finish before this returns.
pub async fn run(cfg: configs::AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting dinehub server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    serve_until(listener, app, shutdown_signal()).await
}

async fn serve_until<F>(listener: tokio::net::TcpListener, app: Router, signal: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(signal).await?;
    info!("server drained");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn memory_config() -> configs::AppConfig {
        let mut cfg = configs::AppConfig::default();
        cfg.database.url = "sqlite::memory:".into();
        cfg.database.max_connections = 1;
        cfg.database.min_connections = 1;
        cfg.auth.jwt_secret = "startup-test".into();
        cfg
    }

    #[test]
    fn bind_addr_rejects_garbage_host() {
        let cfg = configs::ServerConfig { host: "not a host".into(), port: 8080, worker_threads: None };
        assert!(matches!(bind_addr(&cfg), Err(StartupError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn build_app_migrates_and_serves_health() -> anyhow::Result<()> {
        let app = build_app(&memory_config()).await?;
        let resp = app.oneshot(Request::builder().uri("/health").body(Body::empty())?).await?;
        assert_eq!(resp.status(), StatusCode::OK);
        Ok(())
    }

    #[tokio::test]
    async fn shutdown_signal_stops_serving() -> anyhow::Result<()> {
        let app = build_app(&memory_config()).await?;
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let server = tokio::spawn(serve_until(listener, app, async {
            let _ = rx.await;
        }));
        let _ = tx.send(());
        let joined = tokio::time::timeout(std::time::Duration::from_secs(5), server).await??;
        assert!(joined.is_ok());
        Ok(())
    }
}
