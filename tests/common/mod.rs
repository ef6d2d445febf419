//! Shared test utilities and fixtures
//!
//! Mock geolocation and sunrise-sunset services plus helpers for driving an
//! [`App`] frame by frame.

#![allow(dead_code)]

use std::time::Duration;

use chrono::{DateTime, Utc};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use horae_engine::{App, Fallback, LocationSource, Lookups, ResolverPhase, SolarClient};
use horae_providers::{IpLocator, http_client};
use horae_types::UiOptions;

pub const GEO_PATH: &str = "/json/";
pub const SOLAR_PATH: &str = "/json";

pub fn utc(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .expect("valid RFC 3339")
        .with_timezone(&Utc)
}

/// Mount an ipapi.co-style location answer.
pub async fn mount_ip_location(server: &MockServer, latitude: f64, longitude: f64) {
    Mock::given(method("GET"))
        .and(path(GEO_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ip": "198.51.100.4",
            "city": "Somewhere",
            "latitude": latitude,
            "longitude": longitude
        })))
        .mount(server)
        .await;
}

/// Mount a sunrise-sunset.org answer with RFC 3339 instants.
pub async fn mount_solar_times(server: &MockServer, sunrise: &str, sunset: &str) {
    Mock::given(method("GET"))
        .and(path(SOLAR_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": {
                "sunrise": sunrise,
                "sunset": sunset
            },
            "status": "OK"
        })))
        .mount(server)
        .await;
}

/// Answer every request to `route` with a bare status code.
pub async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub fn ip_location(server: &MockServer) -> LocationSource {
    let client = http_client(Duration::from_secs(5)).expect("client builds");
    LocationSource::IpLookup(
        IpLocator::new(client, &format!("{}{GEO_PATH}", server.uri())).expect("valid url"),
    )
}

pub fn lookups(location: LocationSource, solar_server: &MockServer) -> Lookups {
    let client = http_client(Duration::from_secs(5)).expect("client builds");
    Lookups {
        location,
        solar: SolarClient::new(client, &solar_server.uri()).expect("valid url"),
        fallback: Fallback::default(),
    }
}

pub fn app_with(location: LocationSource, solar_server: &MockServer) -> App {
    App::with_lookups(lookups(location, solar_server), UiOptions::default())
}

/// Tick `app` until the resolver settles, or panic after five seconds.
pub async fn run_until_ready(app: &mut App) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while app.phase() != ResolverPhase::Ready {
        assert!(
            tokio::time::Instant::now() < deadline,
            "resolver stuck in {:?}",
            app.phase()
        );
        app.tick();
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
