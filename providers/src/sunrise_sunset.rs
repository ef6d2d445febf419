//! sunrise-sunset.org client.
//!
//! `GET {base}/json?lat=..&lng=..&formatted=0&date=YYYY-MM-DD` answers with
//! RFC 3339 UTC instants:
//!
//! ```json
//! {"results": {"sunrise": "2024-03-20T00:58:12+00:00", "sunset": "2024-03-20T13:05:41+00:00"},
//!  "status": "OK"}
//! ```
//!
//! Any other `status` (`INVALID_REQUEST`, `INVALID_DATE`, `UNKNOWN_ERROR`, ...) is a failure.

use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Url;
use serde::Deserialize;

use crate::{Coordinates, LookupError, SolarTimes, parse_url, read_json_body};

/// Public sunrise-sunset.org API.
pub const DEFAULT_SUNRISE_SUNSET_URL: &str = "https://api.sunrise-sunset.org";

const STATUS_OK: &str = "OK";

#[derive(Debug, Clone)]
pub struct SolarClient {
    client: reqwest::Client,
    endpoint: Url,
}

#[derive(Debug, Deserialize)]
struct SunriseSunsetResponse {
    status: String,
    // An empty string rather than an object when `status` is not OK.
    #[serde(default)]
    results: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct SunriseSunsetResults {
    sunrise: String,
    sunset: String,
}

impl SolarClient {
    /// `base_url` is the service root; `json` is resolved against it.
    pub fn new(client: reqwest::Client, base_url: &str) -> Result<Self, LookupError> {
        let mut base = parse_url(base_url)?;
        // Without a trailing slash, join() would replace the last path segment.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join("json").map_err(|e| LookupError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { client, endpoint })
    }

    /// Sunrise and sunset at `coordinates` on `date`.
    pub async fn fetch(
        &self,
        coordinates: Coordinates,
        date: NaiveDate,
    ) -> Result<SolarTimes, LookupError> {
        let url = self.request_url(coordinates, date);
        tracing::debug!(%url, "Requesting sunrise/sunset");

        let response = self.client.get(url).send().await?;
        let body: SunriseSunsetResponse = read_json_body(response).await?;
        let times = body.into_solar_times()?;

        tracing::info!(
            sunrise = %times.sunrise(),
            sunset = %times.sunset(),
            "Resolved solar times"
        );
        Ok(times)
    }

    fn request_url(&self, coordinates: Coordinates, date: NaiveDate) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("lat", &coordinates.latitude().to_string())
            .append_pair("lng", &coordinates.longitude().to_string())
            .append_pair("formatted", "0")
            .append_pair("date", &date.format("%Y-%m-%d").to_string());
        url
    }
}

impl SunriseSunsetResponse {
    fn into_solar_times(self) -> Result<SolarTimes, LookupError> {
        if self.status != STATUS_OK {
            return Err(LookupError::Service(self.status));
        }
        let results: SunriseSunsetResults =
            serde_json::from_value(self.results).map_err(|e| LookupError::Decode(e.to_string()))?;

        let sunrise = parse_instant("sunrise", &results.sunrise)?;
        let sunset = parse_instant("sunset", &results.sunset)?;
        Ok(SolarTimes::from_utc_day(sunrise, sunset))
    }
}

fn parse_instant(field: &str, raw: &str) -> Result<DateTime<Utc>, LookupError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| LookupError::Decode(format!("{field} {raw:?}: {e}")))
}
