use reqwest::{Response, StatusCode};
use serde::Deserialize;

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Extracts the human-readable reason from a failed response body.
///
/// A structured `{"detail": ...}` body wins: string details are used as-is,
/// any other JSON value is rendered compactly (validation errors arrive as
/// arrays). Without one, the status line (`"404 Not Found"`) is used.
#[must_use]
pub fn detail_from_body(status: StatusCode, body: &[u8]) -> String {
    let detail = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.detail);
    match detail {
        Some(serde_json::Value::String(text)) if !text.trim().is_empty() => text,
        Some(serde_json::Value::Null | serde_json::Value::String(_)) | None => status.to_string(),
        Some(other) => other.to_string(),
    }
}

pub(super) async fn rejection(response: Response) -> (u16, String) {
    let status = response.status();
    let body = response.bytes().await.unwrap_or_default();
    (status.as_u16(), detail_from_body(status, &body))
}
