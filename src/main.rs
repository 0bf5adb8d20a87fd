use anyhow::{Context, Result};
use live_translate::config::Config;
use live_translate::server::{self, AppState};
use live_translate::translate::Provider;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("live_translate=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    let config = Config::from_env();
    let port = config.port;

    if config.deepl_api_key.is_some() {
        info!("DeepL API key: ✓ configured");
    } else {
        warn!("DeepL API key: ✗ missing (DEEPL_API_KEY), DeepL requests will fail");
    }

    let state = AppState::new(config)?;
    let app = server::router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Backend server running on http://localhost:{}", port);
    info!("  GET  /api/health");
    for provider in Provider::ALL {
        info!("  POST {:<26} ({})", provider.endpoint_path(), provider.display_name());
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
