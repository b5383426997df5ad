use axum::body::Body;
use axum::http::{StatusCode, header};
use axum::response::Response;

use crate::error::AppError;

/// Build an inline file response for bytes read from media storage.
///
/// When `content_type` is `None` it is guessed from `filename`.
pub fn file_response(
    bytes: Vec<u8>,
    filename: &str,
    content_type: Option<&str>,
) -> Result<Response, AppError> {
    let content_type = match content_type {
        Some(ct) => ct.to_string(),
        None => mime_guess::from_path(filename)
            .first_or_octet_stream()
            .to_string(),
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, bytes.len().to_string())
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_value(filename),
        )
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

/// Build a safe `Content-Disposition` header value.
fn content_disposition_value(filename: &str) -> String {
    let ascii_safe: String = filename
        .chars()
        .filter(|c| c.is_ascii_graphic() && !matches!(c, '"' | ';' | '\\'))
        .collect();
    let ascii_name = if ascii_safe.is_empty() {
        "download".to_string()
    } else {
        ascii_safe
    };

    // RFC 5987 percent-encoding for filename*.
    let encoded: String = filename
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                String::from(b as char)
            }
            _ => format!("%{b:02X}"),
        })
        .collect();

    format!("inline; filename=\"{ascii_name}\"; filename*=UTF-8''{encoded}")
}
