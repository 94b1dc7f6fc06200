//! Request and response handling shared by the resource clients.
//!
//! Reads go through [`fetch`] / [`fetch_optional`], which retry connection
//! failures and timeouts with doubling backoff. Mutations are sent once by
//! the caller: a status update that reached the server but lost its
//! response must not be replayed.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use bfx_core::Timestamp;

use crate::config::ConfigError;
use crate::error::ApiError;

/// Attempts per read, the first included.
const READ_ATTEMPTS: u32 = 4;

/// Wait before the first retry; doubles after each.
const FIRST_RETRY_DELAY: Duration = Duration::from_millis(200);

/// Map a transport error for `endpoint`.
pub(crate) fn transport(endpoint: &str) -> impl FnOnce(reqwest::Error) -> ApiError + '_ {
    move |source| ApiError::Http {
        endpoint: endpoint.to_string(),
        source,
    }
}

/// Reject non-2xx responses, capturing the body for the log.
pub(crate) async fn ensure_success(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<reqwest::Response, ApiError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    tracing::debug!(endpoint, status, "API call rejected");
    Err(ApiError::Status {
        endpoint: endpoint.to_string(),
        status,
        body,
    })
}

/// Check the status and decode the JSON body.
pub(crate) async fn decode<T: DeserializeOwned>(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<T, ApiError> {
    ensure_success(endpoint, resp)
        .await?
        .json()
        .await
        .map_err(|source| ApiError::Deserialization {
            endpoint: endpoint.to_string(),
            source,
        })
}

/// Like [`decode`], but a 404 is `Ok(None)`.
pub(crate) async fn decode_optional<T: DeserializeOwned>(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<Option<T>, ApiError> {
    if resp.status() == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }
    decode(endpoint, resp).await.map(Some)
}

/// Send the GET built by `request`, retrying connection failures and
/// timeouts. Any response, whatever its status, ends the loop.
pub(crate) async fn get_with_retry<F>(endpoint: &str, request: F) -> Result<reqwest::Response, ApiError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut delay = FIRST_RETRY_DELAY;
    let mut attempt = 1;
    loop {
        match request().send().await {
            Ok(resp) => return Ok(resp),
            Err(e) if attempt < READ_ATTEMPTS && (e.is_connect() || e.is_timeout()) => {
                tracing::warn!(endpoint, attempt, "read failed, retrying in {delay:?}: {e}");
                tokio::time::sleep(delay).await;
                delay *= 2;
                attempt += 1;
            }
            Err(e) => return Err(transport(endpoint)(e)),
        }
    }
}

/// GET with retry, then decode the JSON body.
pub(crate) async fn fetch<T, F>(endpoint: &str, request: F) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    F: Fn() -> reqwest::RequestBuilder,
{
    let resp = get_with_retry(endpoint, request).await?;
    decode(endpoint, resp).await
}

/// Like [`fetch`], but a 404 is `Ok(None)`.
pub(crate) async fn fetch_optional<T, F>(endpoint: &str, request: F) -> Result<Option<T>, ApiError>
where
    T: DeserializeOwned,
    F: Fn() -> reqwest::RequestBuilder,
{
    let resp = get_with_retry(endpoint, request).await?;
    decode_optional(endpoint, resp).await
}

/// Decode an optional record timestamp. A value that does not parse reads
/// as `None` instead of failing the record.
pub(crate) fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => None,
        Some(serde_json::Value::String(s)) => match Timestamp::parse_lenient(&s) {
            Ok(ts) => Some(ts),
            Err(e) => {
                tracing::warn!("ignoring record timestamp: {e}");
                None
            }
        },
        Some(other) => {
            tracing::warn!(value = %other, "ignoring non-string record timestamp");
            None
        }
    })
}

/// Append percent-encoded path segments to the base URL.
pub(crate) fn url_for(base: &url::Url, segments: &[&str]) -> Result<url::Url, ApiError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| {
            ConfigError::InvalidUrl(base.to_string(), "cannot be a base URL".to_string())
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_for_appends_and_encodes_segments() {
        let base = url::Url::parse("http://127.0.0.1:9000/app/").unwrap();
        let url = url_for(&base, &["api", "contracts", "BFX 1/2"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/app/api/contracts/BFX%201%2F2");
    }

    #[derive(Debug, Deserialize)]
    struct Audited {
        #[serde(default, deserialize_with = "lenient_timestamp")]
        at: Option<Timestamp>,
    }

    fn audited(value: serde_json::Value) -> Option<Timestamp> {
        serde_json::from_value::<Audited>(value).unwrap().at
    }

    #[test]
    fn lenient_timestamp_drops_unparseable_values() {
        assert!(audited(serde_json::json!({})).is_none());
        assert!(audited(serde_json::json!({ "at": null })).is_none());
        assert!(audited(serde_json::json!({ "at": "" })).is_none());
        assert!(audited(serde_json::json!({ "at": "next tuesday" })).is_none());
        assert!(audited(serde_json::json!({ "at": 1700000000 })).is_none());
        assert_eq!(
            audited(serde_json::json!({ "at": "2024-01-15" })).map(|t| t.to_iso8601()),
            Some("2024-01-15T00:00:00Z".to_string())
        );
    }

    #[tokio::test]
    async fn get_with_retry_gives_up_after_every_attempt() {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();
        let attempts = std::sync::atomic::AtomicU32::new(0);

        let result = get_with_retry("GET /unreachable", || {
            attempts.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            http.get("http://127.0.0.1:1/")
        })
        .await;

        assert!(matches!(result, Err(ApiError::Http { .. })));
        assert_eq!(attempts.into_inner(), READ_ATTEMPTS);
    }
}
