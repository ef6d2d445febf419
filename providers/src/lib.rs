//! Lookup clients for the two external services Horae depends on.
//!
//! # Architecture
//!
//! - [`geolocation`] - resolves the viewer's [`Coordinates`], either from configuration
//!   or from an IP-geolocation endpoint
//! - [`sunrise_sunset`] - fetches the day's sunrise and sunset from a sunrise-sunset.org
//!   compatible endpoint
//!
//! Both clients make exactly one request per call and never retry. Failures are
//! reported as [`LookupError`]; substituting fallback values is the caller's job.
//!
//! # HTTP
//!
//! All requests share one [`reqwest::Client`] built by [`http_client`] with a connect
//! timeout, a total request timeout and a bounded redirect policy. Response bodies are
//! capped at [`MAX_BODY_BYTES`] before JSON decoding.

pub mod geolocation;
pub mod sunrise_sunset;

use std::time::Duration;

use reqwest::{Response, StatusCode, Url};
use thiserror::Error;

pub use geolocation::{DEFAULT_GEOLOCATION_URL, IpLocator, LocationSource};
pub use horae_types::{self, Coordinates, SolarTimes};
pub use sunrise_sunset::{DEFAULT_SUNRISE_SUNSET_URL, SolarClient};

const CONNECT_TIMEOUT_SECS: u64 = 5;
/// Total request timeout applied when the caller doesn't configure one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
const MAX_REDIRECTS: usize = 5;

/// Responses larger than this are rejected rather than decoded.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

const USER_AGENT: &str = concat!("horae/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("invalid service URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("service returned HTTP {0}")]
    Status(StatusCode),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("service reported failure: {0}")]
    Service(String),
    #[error("geolocation is unsupported in this configuration")]
    Unsupported,
}

fn base_client_builder() -> reqwest::ClientBuilder {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
}

/// Build the shared client with a total request timeout.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    base_client_builder().timeout(timeout).build()
}

pub(crate) fn parse_url(raw: &str) -> Result<Url, LookupError> {
    Url::parse(raw).map_err(|e| LookupError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Reject non-2xx responses, then read at most [`MAX_BODY_BYTES`] of body.
pub(crate) async fn read_json_body<T>(response: Response) -> Result<T, LookupError>
where
    T: serde::de::DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        return Err(LookupError::Status(status));
    }
    if response
        .content_length()
        .is_some_and(|len| len > MAX_BODY_BYTES as u64)
    {
        return Err(LookupError::Decode(format!(
            "body exceeds {MAX_BODY_BYTES} bytes"
        )));
    }

    let bytes = response.bytes().await?;
    if bytes.len() > MAX_BODY_BYTES {
        return Err(LookupError::Decode(format!(
            "body exceeds {MAX_BODY_BYTES} bytes"
        )));
    }
    serde_json::from_slice(&bytes).map_err(|e| LookupError::Decode(e.to_string()))
}
