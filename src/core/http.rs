use std::time::Duration;

use reqwest::{
    Client,
    Response,
    Url,
};
use serde::Deserialize;

use crate::core::NoteAppError;

const USER_AGENT: &str = concat!("noteapp/", env!("CARGO_PKG_VERSION"), " (+reqwest)");

pub fn http_client(timeout: Duration) -> Result<Client, NoteAppError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| NoteAppError::Config(format!("HTTP client build failed: {e}")))
}

/// Appends path segments to `base`, keeping whatever path prefix it already has.
pub fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, NoteAppError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| NoteAppError::Config(format!("{base} cannot be used as a base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

pub fn ensure_success(resp: Response) -> Result<Response, NoteAppError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(NoteAppError::Status { status, url: resp.url().to_string() });
    }
    Ok(resp)
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Pulls the service's `{"error": "..."}` message out of a rejection body.
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body).ok().map(|b| b.error).filter(|m| !m.is_empty())
}

/// Best human-readable reason for a rejected request. Consumes the response.
pub async fn rejection_reason(resp: Response) -> String {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    error_message(&body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request rejected").to_string())
}
