//! Main entry point for the Creative Gateway services

use anyhow::Context;
use axum::Router;
use creative_gateway::{
    api,
    backend::{create_image_backend, create_text_backend},
    config::{LoggingConfig, Settings},
    AppState,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = Settings::load().context("failed to load configuration")?;
    settings.validate().context("invalid configuration")?;

    init_logging(&settings.logging);
    info!("Starting Creative Gateway");

    let settings = Arc::new(settings);

    let image = async {
        if !settings.image_service.enabled {
            info!("Image service disabled");
            return anyhow::Ok(());
        }
        let upstream = create_image_backend(&settings.image_service.upstream)?;
        info!(
            upstream = %upstream.name(),
            protocol = %upstream.protocol(),
            timeout_ms = settings.image_service.upstream.timeout_ms,
            "Image upstream configured"
        );
        let state = Arc::new(AppState::new(settings.clone(), upstream));
        serve("image", &settings.image_service.server.address(), api::create_image_router(state)).await
    };

    let text = async {
        if !settings.text_service.enabled {
            info!("Text service disabled");
            return anyhow::Ok(());
        }
        let upstream = create_text_backend(&settings.text_service.upstream)?;
        info!(
            upstream = %upstream.name(),
            protocol = %upstream.protocol(),
            timeout_ms = settings.text_service.upstream.timeout_ms,
            "Text upstream configured"
        );
        let state = Arc::new(AppState::new(settings.clone(), upstream));
        serve("text", &settings.text_service.server.address(), api::create_text_router(state)).await
    };

    tokio::try_join!(image, text)?;

    info!("Creative Gateway stopped");
    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

async fn serve(service: &str, addr: &str, app: Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {} service to {}", service, addr))?;

    info!(service = service, addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(service = service, "Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
