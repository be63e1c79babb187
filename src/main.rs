use anyhow::{Context, Result};
use restaurant_contact::{
    config::Config,
    db::PgMessageStore,
    endpoint::{router, AppState},
    notify::Notifier,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("restaurant_contact=info".parse()?),
        )
        .init();

    info!("Starting contact endpoint");

    let config = Config::from_env()?;

    let store = PgMessageStore::new(&config.database_url).await?;
    info!("Database ready");

    let notifier = Notifier::from_config(&config)?;
    if notifier.is_none() {
        info!("NOTIFY_WEBHOOK_URL not set, staff notifications disabled");
    }
    if config.anon_key.is_none() {
        info!("CONTACT_ANON_KEY not set, accepting unauthenticated requests");
    }

    let state = AppState::new(Arc::new(store))
        .with_anon_key(config.anon_key.clone())
        .with_notifier(notifier);

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Listening on {}", address);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
}
