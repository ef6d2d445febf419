//! Viewer location lookup.

use reqwest::Url;
use serde::Deserialize;

use crate::{Coordinates, LookupError, parse_url, read_json_body};

/// IP-geolocation endpoint used when none is configured.
pub const DEFAULT_GEOLOCATION_URL: &str = "https://ipapi.co/json/";

/// Where the viewer's coordinates come from.
#[derive(Debug, Clone)]
pub enum LocationSource {
    /// Coordinates pinned in configuration; never fails.
    Fixed(Coordinates),
    /// Ask an IP-geolocation service.
    IpLookup(IpLocator),
    /// No location service available.
    Disabled,
}

impl LocationSource {
    pub async fn locate(&self) -> Result<Coordinates, LookupError> {
        match self {
            Self::Fixed(coordinates) => Ok(*coordinates),
            Self::IpLookup(locator) => locator.locate().await,
            Self::Disabled => Err(LookupError::Unsupported),
        }
    }
}

/// Client for `ipapi.co`-style JSON endpoints.
///
/// Accepts both `latitude`/`longitude` (ipapi.co) and `lat`/`lon` (ip-api.com)
/// field names, and both providers' in-band error shapes.
#[derive(Debug, Clone)]
pub struct IpLocator {
    client: reqwest::Client,
    url: Url,
}

#[derive(Debug, Deserialize)]
struct IpLocationResponse {
    #[serde(default, alias = "lat")]
    latitude: Option<f64>,
    #[serde(default, alias = "lon")]
    longitude: Option<f64>,
    // ipapi.co: {"error": true, "reason": "..."}
    #[serde(default)]
    error: bool,
    #[serde(default)]
    reason: Option<String>,
    // ip-api.com: {"status": "fail", "message": "..."}
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl IpLocationResponse {
    fn into_coordinates(self) -> Result<Coordinates, LookupError> {
        if self.error {
            return Err(LookupError::Service(
                self.reason.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        if self.status.as_deref() == Some("fail") {
            return Err(LookupError::Service(
                self.message.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
            return Err(LookupError::Decode(
                "response has no latitude/longitude".to_string(),
            ));
        };
        Coordinates::new(latitude, longitude).map_err(|e| LookupError::Decode(e.to_string()))
    }
}

impl IpLocator {
    pub fn new(client: reqwest::Client, url: &str) -> Result<Self, LookupError> {
        Ok(Self {
            client,
            url: parse_url(url)?,
        })
    }

    pub async fn locate(&self) -> Result<Coordinates, LookupError> {
        tracing::debug!(url = %self.url, "Requesting IP geolocation");
        let response = self.client.get(self.url.clone()).send().await?;
        let body: IpLocationResponse = read_json_body(response).await?;
        let coordinates = body.into_coordinates()?;
        tracing::info!(%coordinates, "Resolved viewer location");
        Ok(coordinates)
    }
}
