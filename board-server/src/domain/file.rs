use chrono::{DateTime, Utc};
use mime::Mime;

use super::error::{DomainError, ValidationError};

pub(crate) const DEFAULT_MIME_TYPE: &str = "application/octet-stream";
pub(crate) const PUBLIC_FILES_PATH: &str = "/public/files";

#[derive(Debug, Clone)]
pub(crate) struct StoredFile {
    pub(crate) id: String,
    pub(crate) mime_type: String,
    pub(crate) data: Vec<u8>,
    pub(crate) created_at: DateTime<Utc>,
}

impl StoredFile {
    pub(crate) fn public_url(&self) -> String {
        public_file_url(&self.id)
    }
}

pub(crate) fn public_file_url(file_id: &str) -> String {
    format!("{PUBLIC_FILES_PATH}/{file_id}")
}

#[derive(Debug, Clone)]
pub(crate) struct UploadRequest {
    pub(crate) mime_type: Option<String>,
    pub(crate) data: Vec<u8>,
}

impl UploadRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        if self.data.is_empty() {
            return Err(ValidationError::FileRequired.into());
        }

        let mime_type = match self.mime_type.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_MIME_TYPE.to_string(),
            Some(raw) => parse_mime(raw)?,
        };

        Ok(Self {
            mime_type: Some(mime_type),
            data: self.data,
        })
    }
}

/// `mime` accepts an empty subtype such as `image/`, so that is checked here.
fn parse_mime(raw: &str) -> Result<String, ValidationError> {
    match raw.parse::<Mime>() {
        Ok(mime) if !mime.subtype().as_str().is_empty() => Ok(mime.to_string()),
        _ => Err(ValidationError::InvalidField {
            field: "file",
            message: "content type must be type/subtype",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_MIME_TYPE, UploadRequest, public_file_url};
    use crate::domain::error::{DomainError, ValidationError};

    fn upload(mime: Option<&str>, data: &[u8]) -> UploadRequest {
        UploadRequest {
            mime_type: mime.map(str::to_string),
            data: data.to_vec(),
        }
    }

    #[test]
    fn empty_payload_is_rejected() {
        let err = upload(Some("image/png"), b"").validate().expect_err("must fail");
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::FileRequired)
        ));
    }

    #[test]
    fn missing_mime_falls_back_to_octet_stream() {
        let req = upload(None, b"abc").validate().expect("must validate");
        assert_eq!(req.mime_type.as_deref(), Some(DEFAULT_MIME_TYPE));
    }

    #[test]
    fn mime_parameters_are_kept() {
        let req = upload(Some("Text/Plain; charset=utf-8"), b"abc")
            .validate()
            .expect("must validate");
        let mime = req.mime_type.expect("mime must be set");
        let lowered = mime.to_ascii_lowercase();
        assert!(lowered.starts_with("text/plain"), "{mime}");
        assert!(lowered.contains("charset=utf-8"), "{mime}");
    }

    #[test]
    fn malformed_mime_is_rejected() {
        for mime in ["png", "image/", "/png", "image/png/x", "image\n/png"] {
            assert!(upload(Some(mime), b"abc").validate().is_err(), "{mime}");
        }
    }

    #[test]
    fn public_url_is_id_based() {
        assert_eq!(public_file_url("abc"), "/public/files/abc");
    }
}
