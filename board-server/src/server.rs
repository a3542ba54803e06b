use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::{Router, middleware};
use tokio::net::TcpListener;
use tokio::signal;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tracing::{error, info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::data::Repositories;
use crate::infrastructure::database::{create_pool, run_migrations};
use crate::infrastructure::settings::{Settings, StorageBackend};
use crate::presentation::AppState;
use crate::presentation::http;
use crate::presentation::http::middleware::cors::apply_cors;
use crate::presentation::http::middleware::layer_errors::envelope_layer_errors;
use crate::presentation::http::middleware::trace::apply_trace;
use crate::presentation::http::openapi::ApiDoc;

pub async fn run_http(settings: &Settings) -> Result<()> {
    let app = build_app(settings).await?;

    let listener = TcpListener::bind(&settings.http_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.http_addr))?;

    info!("HTTP server listening on {}", settings.http_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

/// Connects the configured storage and assembles the full application router.
pub async fn build_app(settings: &Settings) -> Result<Router> {
    let repos = match settings.storage_backend {
        StorageBackend::Postgres => {
            let database_url = settings
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres backend")?;
            let pool = create_pool(database_url, settings.database_max_connections).await?;
            run_migrations(&pool).await?;
            Repositories::postgres(pool)
        }
        StorageBackend::Memory => {
            warn!("using in-memory storage, data is lost on restart");
            Repositories::in_memory()
        }
    };

    build_router(AppState::new(repos, settings), settings)
}

pub(crate) fn build_router(state: AppState, settings: &Settings) -> Result<Router> {
    let app = http::routes(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    let app = apply_protection(app, settings);
    let app = apply_trace(app);
    apply_cors(app, settings)
}

fn apply_protection(router: Router, settings: &Settings) -> Router {
    router
        .layer(DefaultBodyLimit::max(settings.http_request_body_limit_bytes))
        .layer(RequestBodyLimitLayer::new(
            settings.http_request_body_limit_bytes,
        ))
        .layer(GlobalConcurrencyLimitLayer::new(
            settings.http_concurrency_limit,
        ))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(settings.http_request_timeout_secs),
        ))
        .layer(middleware::map_response(envelope_layer_errors))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(err) => {
                error!(error = %err, "failed to install terminate handler");
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
}
