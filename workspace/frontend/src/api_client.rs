pub mod weather;

use common::ApiReply;
use gloo_net::http::Request;
use serde::Deserialize;
use thiserror::Error;

/// Failure to obtain a parsed reply at all. A reply carrying `{error}` is not a
/// `FetchError`; it is an [`ApiReply::Failure`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to parse response (HTTP {status}): {message}")]
    Parse { status: u16, message: String },
}

/// GET handler for endpoints that answer with either a payload or `{error}`.
///
/// The body is parsed whatever the HTTP status: the weather API reports its
/// failures as JSON with 4xx/5xx codes.
pub async fn get_reply<T>(url: &str) -> Result<ApiReply<T>, FetchError>
where
    T: for<'de> Deserialize<'de>,
{
    log::debug!("GET request to: {}", url);

    let response = Request::get(url).send().await.map_err(|e| {
        let error = FetchError::Request(e.to_string());
        log::error!("GET {} - {}", url, error);
        error
    })?;

    let status = response.status();
    if !response.ok() {
        log::warn!("GET {} - Non-OK response: {}", url, status);
    }

    log::trace!("GET {} - Response received, parsing JSON", url);
    let reply: ApiReply<T> = response.json().await.map_err(|e| {
        let error = FetchError::Parse {
            status,
            message: e.to_string(),
        };
        log::error!("GET {} - {}", url, error);
        error
    })?;

    match &reply {
        ApiReply::Success(_) => log::info!("GET {} - Success", url),
        ApiReply::Failure(failure) => log::warn!("GET {} - API error: {}", url, failure.error),
    }

    Ok(reply)
}
