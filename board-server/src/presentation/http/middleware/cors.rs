use anyhow::{Result, anyhow};
use axum::Router;
use axum::http::{Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::infrastructure::settings::Settings;

/// `*` mirrors the request origin: a literal wildcard cannot be combined with
/// credentials.
pub(crate) fn build_cors_layer(settings: &Settings) -> Result<CorsLayer> {
    let layer = if settings.cors_origins.iter().any(|origin| origin == "*") {
        CorsLayer::new().allow_origin(AllowOrigin::mirror_request())
    } else {
        let origins = settings
            .cors_origins
            .iter()
            .map(|origin| origin.parse())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| anyhow!("invalid CORS origin: {err}"))?;

        CorsLayer::new().allow_origin(origins)
    };

    Ok(layer
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::COOKIE]))
}

pub(crate) fn apply_cors(router: Router, settings: &Settings) -> Result<Router> {
    let cors = build_cors_layer(settings)?;
    Ok(router.layer(cors))
}
