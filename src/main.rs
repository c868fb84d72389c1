#![allow(dead_code)]

mod analytics;
mod config;
mod errors;
mod handlers;
mod models;
mod providers;
mod registry;
mod store;

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::handlers::AppState;
use crate::providers::aws::{CloudWatchAlarms, CostExplorerSource, SnsNotifier};
use crate::registry::AlertRegistry;
use crate::store::InMemoryAlertStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "costwatch=info,tower_http=info".into()))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    tracing::info!("Configuration loaded");

    // AWS clients share one resolved SDK config (default credential chain)
    let aws_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.aws.region.clone()))
        .load()
        .await;
    tracing::info!(region = %config.aws.region, "AWS clients initialized");

    let billing: Arc<dyn providers::BillingDataSource> = Arc::new(CostExplorerSource::new(
        aws_sdk_costexplorer::Client::new(&aws_config),
    ));
    let alarms = Arc::new(CloudWatchAlarms::new(
        aws_sdk_cloudwatch::Client::new(&aws_config),
        config.aws.sns_topic_arn.clone(),
    ));
    let notifier = Arc::new(SnsNotifier::new(
        aws_sdk_sns::Client::new(&aws_config),
        config.aws.sns_topic_arn.clone(),
    ));

    let registry = Arc::new(AlertRegistry::new(
        Arc::new(InMemoryAlertStore::new()),
        alarms,
        notifier,
    ));

    // Create shared state
    let state = AppState {
        billing,
        registry,
        forecast: config.forecast.clone(),
    };

    // CORS configuration for the dashboard frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/alerts/create", post(handlers::alerts::create))
        .route("/alerts", get(handlers::alerts::list))
        .route("/alerts/:alarm_name", delete(handlers::alerts::delete))
        .route("/suggestions", get(handlers::suggestions::get_suggestions))
        .route("/suggestions/billing", get(handlers::suggestions::get_billing_data))
        .route("/forecast", get(handlers::dashboard::get_forecast))
        .route("/dashboard-data", get(handlers::dashboard::get_dashboard_data))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Starting costwatch server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
