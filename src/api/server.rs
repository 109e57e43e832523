//! Registry server lifecycle: starts and stops the axum HTTP server.
//!
//! bind → spawn background task → return handle with shutdown channel.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::api::router::build_router;
use crate::api::types::AppContext;
use crate::config::ServerConfig;
use crate::store::{Registry, StoreError};

// ═══════════════════════════════════════════════════════════
// Public types
// ═══════════════════════════════════════════════════════════

/// Session metadata for a running server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSession {
    pub session_id: String,
    pub server_addr: String,
    pub port: u16,
    pub started_at: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to open registry: {0}")]
    Registry(#[from] StoreError),
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to get server address: {0}")]
    LocalAddr(std::io::Error),
}

/// Handle to a running server.
pub struct RegistryServer {
    pub session: ServerSession,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl RegistryServer {
    /// Signal a graceful shutdown. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Registry server shutdown signal sent");
        }
    }

    /// Wait for the server task to finish after `shutdown`.
    pub async fn stopped(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!("Registry server task failed: {e}");
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Server lifecycle
// ═══════════════════════════════════════════════════════════

/// Open the registry in `config.data_dir` and serve it on `config.host:config.port`.
pub async fn start_server(config: &ServerConfig) -> Result<RegistryServer, ServerError> {
    let registry = Registry::open(&config.data_dir)?;
    let ctx = AppContext::new(registry);
    start_server_on(ctx, SocketAddr::new(config.host, config.port)).await
}

/// Serve an already opened registry on `addr`. Port 0 picks a free port.
pub async fn start_server_on(
    ctx: AppContext,
    addr: SocketAddr,
) -> Result<RegistryServer, ServerError> {
    // 1. Bind
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    let addr = listener.local_addr().map_err(ServerError::LocalAddr)?;

    // 2. Build the router
    let app = build_router(ctx);

    // 3. Create session metadata
    let session = ServerSession {
        session_id: Uuid::new_v4().to_string(),
        server_addr: addr.to_string(),
        port: addr.port(),
        started_at: chrono::Utc::now().to_rfc3339(),
    };

    // 4. Set up shutdown signal
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    // 5. Spawn server in background task
    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Registry server received shutdown signal");
        };

        tracing::info!(%addr, "Registry server listening on http://{addr}");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Registry server error: {e}");
        }

        tracing::info!("Registry server stopped");
    });

    Ok(RegistryServer {
        session,
        shutdown_tx: Some(shutdown_tx),
        task: Some(task),
    })
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DOCTOR_FILE, PATIENT_FILE};
    use std::net::{IpAddr, Ipv4Addr};

    fn localhost() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0)
    }

    fn test_ctx() -> (AppContext, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = AppContext::new(Registry::open(tmp.path()).unwrap());
        (ctx, tmp)
    }

    #[tokio::test]
    async fn start_and_stop_server() {
        let (ctx, _tmp) = test_ctx();
        let mut server = start_server_on(ctx, localhost())
            .await
            .expect("server should start");

        assert!(!server.session.session_id.is_empty());
        assert!(server.session.port > 0);

        let url = format!("http://127.0.0.1:{}/health", server.session.port);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert_eq!(resp.headers().get("cache-control").unwrap(), "no-store");

        server.shutdown();
        server.stopped().await;
    }

    #[tokio::test]
    async fn server_serves_pages_and_api() {
        let (ctx, _tmp) = test_ctx();
        let mut server = start_server_on(ctx, localhost())
            .await
            .expect("server should start");
        let port = server.session.port;

        let resp = reqwest::get(format!("http://127.0.0.1:{port}/doctors"))
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert!(resp.text().await.unwrap().contains("Doctor Registration"));

        let resp = reqwest::get(format!("http://127.0.0.1:{port}/api/patients/search?q=x"))
            .await
            .unwrap();
        let hits: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(hits, serde_json::json!({ "patients": [] }));

        let resp = reqwest::get(format!("http://127.0.0.1:{port}/nonexistent"))
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

        server.shutdown();
    }

    #[tokio::test]
    async fn start_server_creates_sheets() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            data_dir: tmp.path().to_path_buf(),
        };
        let mut server = start_server(&config).await.expect("server should start");
        assert!(config.data_dir.join(PATIENT_FILE).exists());
        assert!(config.data_dir.join(DOCTOR_FILE).exists());
        server.shutdown();
    }

    #[tokio::test]
    async fn bind_failure_is_reported() {
        let (ctx, _tmp) = test_ctx();
        let taken = tokio::net::TcpListener::bind(localhost()).await.unwrap();
        let addr = taken.local_addr().unwrap();
        let err = start_server_on(ctx, addr).await.err().unwrap();
        assert!(matches!(err, ServerError::Bind { .. }));
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let (ctx, _tmp) = test_ctx();
        let mut server = start_server_on(ctx, localhost())
            .await
            .expect("server should start");

        server.shutdown();
        server.shutdown();
        server.stopped().await;
        server.stopped().await;
    }
}
