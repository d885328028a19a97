use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use headless_bridge::config::Config;
use headless_bridge::revalidation::HttpNotifier;
use headless_bridge::server::{AppState, build_router};
use headless_bridge::transition::TransitionListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "headless_bridge=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("failed to read configuration")?;
    tracing::debug!(?config, "Loaded configuration");

    if !config.revalidation.is_enabled() {
        tracing::warn!("Frontend URL or revalidation secret unset; revalidation is disabled");
    }

    let listener = TransitionListener::new(
        config.slug_resolver(),
        HttpNotifier::new(config.revalidation.clone()),
    );
    let app = build_router(AppState::new(
        config.webhook_secret.clone(),
        listener,
        config.links.clone(),
    ));

    let tcp = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!("listening on {}", config.listen_addr);

    axum::serve(tcp, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
