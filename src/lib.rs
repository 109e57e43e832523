pub mod api;
pub mod config;
pub mod forms; // field catalog, validation, age
pub mod models;
pub mod registration; // register / edit controller
pub mod search;
pub mod store; // CSV sheets
pub mod views;

use tracing_subscriber::EnvFilter;

use crate::api::ServerError;

/// Start the registry server and run until Ctrl-C.
pub async fn run() -> Result<(), ServerError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = config::ServerConfig::from_env();
    let mut server = api::start_server(&config).await?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        session = %server.session.session_id,
        "Serving http://{}",
        server.session.server_addr
    );

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for Ctrl-C: {e}");
    }
    server.shutdown();
    server.stopped().await;
    Ok(())
}
