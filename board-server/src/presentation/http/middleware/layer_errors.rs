use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::presentation::http::app_error::AppError;

/// The body-limit and timeout layers answer with plain-text or empty bodies;
/// those are rewritten into the usual `{code, message}` error body.
pub(crate) async fn envelope_layer_errors(response: Response) -> Response {
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .is_some_and(|value| value.as_bytes().starts_with(b"application/json"));
    if is_json {
        return response;
    }

    match response.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge.into_response(),
        StatusCode::REQUEST_TIMEOUT => AppError::RequestTimeout.into_response(),
        _ => response,
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use serde_json::Value;

    use super::envelope_layer_errors;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body must be readable");
        serde_json::from_slice(&bytes).expect("body must be JSON")
    }

    #[tokio::test]
    async fn bare_timeout_gets_error_body() {
        let response = envelope_layer_errors(StatusCode::REQUEST_TIMEOUT.into_response()).await;
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body_json(response).await["code"], "REQUEST_TIMEOUT");
    }

    #[tokio::test]
    async fn other_responses_pass_through() {
        let response = envelope_layer_errors(
            (StatusCode::METHOD_NOT_ALLOWED, Body::empty()).into_response(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
