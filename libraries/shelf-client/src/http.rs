//! Request plumbing shared by the list client and the providers.

use crate::error::{ClientError, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Build the HTTP client with reasonable defaults.
pub(crate) fn build_http_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(format!("Shelf/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ClientError::Request)
}

/// Validate and normalize a base URL (no trailing slash).
pub(crate) fn normalize_base_url(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let url = raw.trim_end_matches('/');
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    Url::parse(url).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", url, e)))?;

    Ok(url.to_string())
}

/// Append path segments to a base URL, percent-encoding each one.
pub(crate) fn endpoint(base_url: &str, segments: &[&str]) -> Result<Url> {
    let mut url =
        Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;

    url.path_segments_mut()
        .map_err(|()| ClientError::InvalidUrl(format!("{} cannot be a base", base_url)))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

/// Send a request, classifying transport failures.
pub(crate) async fn send(request: RequestBuilder) -> Result<Response> {
    request.send().await.map_err(|e| {
        if e.is_connect() || e.is_timeout() {
            ClientError::ServerUnreachable(e.to_string())
        } else {
            ClientError::Request(e)
        }
    })
}

/// Race a request future against a cancellation token.
pub(crate) async fn cancellable<T, F>(cancel: &CancellationToken, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(ClientError::Cancelled),
        result = fut => result,
    }
}

/// Map a non-success status to the matching error.
///
/// `what` names the requested resource for not-found messages.
pub(crate) async fn check_status(response: Response, what: &str) -> Result<Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::UNAUTHORIZED => Err(ClientError::AuthRequired),
        StatusCode::NOT_FOUND => Err(ClientError::NotFound(what.to_string())),
        StatusCode::CONFLICT => {
            let error_text = response.text().await.unwrap_or_default();
            Err(ClientError::Conflict(if error_text.is_empty() {
                what.to_string()
            } else {
                error_text
            }))
        }
        _ => {
            let error_text = response.text().await.unwrap_or_default();
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}

/// Decode a JSON body.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse {}: {}", what, e)))
}
