//! Configuration files driving a full resolution against mock services.

use std::fs;

use tempfile::TempDir;
use wiremock::MockServer;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use horae_engine::{App, HoraeConfig, LookupMode};
use horae_types::{Advisory, Coordinates};

use crate::common::{GEO_PATH, SOLAR_PATH, mount_ip_location, run_until_ready, utc};

fn write_config(dir: &TempDir, body: &str) -> HoraeConfig {
    let path = dir.path().join("config.toml");
    fs::write(&path, body).unwrap();
    HoraeConfig::load_from(&path).unwrap().unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn pinned_location_skips_geolocation() {
    let geo = MockServer::start().await;
    let solar = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEO_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&geo)
        .await;
    Mock::given(method("GET"))
        .and(path(SOLAR_PATH))
        .and(query_param("lat", "51.4779"))
        .and(query_param("lng", "-0.0015"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": {
                "sunrise": "2024-03-20T06:02:00+00:00",
                "sunset": "2024-03-20T18:14:00+00:00"
            },
            "status": "OK"
        })))
        .expect(1)
        .mount(&solar)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(
        &dir,
        &format!(
            r#"
[location]
latitude = 51.4779
longitude = -0.0015

[services]
geolocation_url = "{}{GEO_PATH}"
sunrise_sunset_url = "{}"
timeout_seconds = 5
"#,
            geo.uri(),
            solar.uri()
        ),
    );

    let mut app = App::new(Some(&config)).unwrap();
    app.start();
    run_until_ready(&mut app).await;

    let clock = app.clock();
    assert_eq!(
        clock.coordinates(),
        Some(Coordinates::new(51.4779, -0.0015).unwrap())
    );
    assert_eq!(clock.solar().unwrap().sunrise(), utc("2024-03-20T06:02:00Z"));
    assert_eq!(clock.advisory(), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn ip_lookup_from_configured_endpoint() {
    let geo = MockServer::start().await;
    let solar = MockServer::start().await;
    mount_ip_location(&geo, -33.8688, 151.2093).await;
    Mock::given(method("GET"))
        .and(path(SOLAR_PATH))
        .and(query_param("lat", "-33.8688"))
        .and(query_param("lng", "151.2093"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": {
                "sunrise": "2024-03-19T20:03:00+00:00",
                "sunset": "2024-03-20T08:12:00+00:00"
            },
            "status": "OK"
        })))
        .expect(1)
        .mount(&solar)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(
        &dir,
        &format!(
            r#"
[location]
lookup = "ip"

[services]
geolocation_url = "{}{GEO_PATH}"
sunrise_sunset_url = "{}"
"#,
            geo.uri(),
            solar.uri()
        ),
    );

    let mut app = App::new(Some(&config)).unwrap();
    app.start();
    run_until_ready(&mut app).await;

    assert_eq!(
        app.clock().coordinates(),
        Some(Coordinates::new(-33.8688, 151.2093).unwrap())
    );
    assert!(!app.is_loading());
    assert_eq!(app.clock().advisory(), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn disabled_lookup_uses_named_fallback() {
    let solar = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SOLAR_PATH))
        .and(query_param("lat", "38.7223"))
        .and(query_param("lng", "-9.1393"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": {
                "sunrise": "2024-03-20T06:27:00+00:00",
                "sunset": "2024-03-20T18:36:00+00:00"
            },
            "status": "OK"
        })))
        .expect(1)
        .mount(&solar)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(
        &dir,
        &format!(
            r#"
[location]
lookup = "none"
fallback_latitude = 38.7223
fallback_longitude = -9.1393
fallback_name = "Lisbon"

[services]
sunrise_sunset_url = "{}"
"#,
            solar.uri()
        ),
    );
    assert_eq!(config.location.as_ref().unwrap().lookup, LookupMode::None);

    let mut app = App::new(Some(&config)).unwrap();
    app.start();
    run_until_ready(&mut app).await;

    let clock = app.clock();
    assert_eq!(
        clock.coordinates(),
        Some(Coordinates::new(38.7223, -9.1393).unwrap())
    );
    assert_eq!(
        clock.advisory(),
        Some(&Advisory::location_unavailable("Lisbon"))
    );
    assert_eq!(
        clock.advisory().unwrap().message(),
        "Unable to get your location. Using default location (Lisbon)."
    );
}

#[test]
fn malformed_config_reports_its_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[location\nlatitude = ").unwrap();

    let err = HoraeConfig::load_from(&path).unwrap_err();
    assert_eq!(err.path(), &path);
}
