use crate::presentation::http::envelope::{ApiReply, ok};

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up, code OK and null data")
    )
)]
pub(crate) async fn health() -> ApiReply<()> {
    ok("OK", ())
}
