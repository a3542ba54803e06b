use axum::{
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::error::{DomainError, ValidationError};
use crate::domain::file::{StoredFile, UploadRequest};
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppError, AppResult, ErrorBody};
use crate::presentation::http::envelope::{ApiReply, ApiResponse, created};
use crate::presentation::http::extract::ApiPath;

const FILE_FIELD: &str = "file";

/// Multipart form accepted by the upload endpoint, for the API docs only.
#[allow(dead_code)]
#[derive(Debug, ToSchema)]
pub(crate) struct UploadFormDto {
    #[schema(value_type = String, format = Binary)]
    pub(crate) file: Vec<u8>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UploadedFileDto {
    pub(crate) file_id: String,
    pub(crate) file_url: String,
}

fn multipart_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge;
    }
    AppError::BadRequest(format!("{context}: {err}"))
}

async fn parse_upload(mut multipart: Multipart) -> AppResult<UploadRequest> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| multipart_error("invalid multipart payload", err))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        // Raw header: `content_type()` silently drops values it cannot parse.
        let mime_type = field
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
        let data = field
            .bytes()
            .await
            .map_err(|err| multipart_error("failed to read upload", err))?;

        return Ok(UploadRequest {
            mime_type,
            data: data.to_vec(),
        });
    }

    Err(AppError::Domain(ValidationError::FileRequired.into()))
}

#[utoipa::path(
    post,
    path = "/v1/files",
    tag = "files",
    request_body(content = UploadFormDto, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "FILE_UPLOADED", body = ApiResponse<UploadedFileDto>),
        (status = 400, description = "Missing or empty file part", body = ErrorBody),
        (status = 413, description = "Payload too large", body = ErrorBody)
    )
)]
pub(crate) async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<ApiReply<UploadedFileDto>> {
    let multipart = multipart.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let upload = parse_upload(multipart).await?;

    let file = state.file_service.upload(upload).await?;
    Ok(created(
        "FILE_UPLOADED",
        UploadedFileDto {
            file_url: file.public_url(),
            file_id: file.id,
        },
    ))
}

#[utoipa::path(
    get,
    path = "/public/files/{fileId}",
    tag = "files",
    params(
        ("fileId" = String, Path, description = "File id")
    ),
    responses(
        (status = 200, description = "Raw file bytes with the stored content type; non-images are served as attachments"),
        (status = 404, description = "File not found", body = ErrorBody)
    )
)]
pub(crate) async fn serve_file(
    State(state): State<AppState>,
    ApiPath(file_id): ApiPath<String>,
) -> AppResult<Response> {
    let file = state.file_service.get_file(&file_id).await?;
    let headers = file_headers(&file)?;

    Ok((StatusCode::OK, headers, file.data).into_response())
}

/// Uploads are anonymous, so stored content is never rendered as active
/// content on this origin: no sniffing, a sandbox CSP, and anything that is
/// not an image is offered as a download.
fn file_headers(file: &StoredFile) -> AppResult<HeaderMap> {
    let content_type = HeaderValue::from_str(&file.mime_type).map_err(|err| {
        DomainError::Unexpected(format!("stored content type of {}: {err}", file.id))
    })?;
    let last_modified = file
        .created_at
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string();

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, content_type);
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("sandbox"),
    );
    if !file.mime_type.starts_with("image/") {
        headers.insert(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_static("attachment"),
        );
    }
    if let Ok(value) = HeaderValue::from_str(&last_modified) {
        headers.insert(header::LAST_MODIFIED, value);
    }
    Ok(headers)
}
