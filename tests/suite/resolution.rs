//! End-to-end resolution: location, then solar times, with every failure path.

use chrono::Local;
use wiremock::MockServer;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use horae_engine::{LocationSource, ResolverPhase};
use horae_types::{Advisory, Coordinates, SolarTimes};

use crate::common::{
    GEO_PATH, SOLAR_PATH, app_with, ip_location, mount_ip_location, mount_solar_times,
    mount_status, run_until_ready, utc,
};

#[tokio::test(flavor = "multi_thread")]
async fn located_viewer_gets_live_solar_times() {
    let geo = MockServer::start().await;
    let solar = MockServer::start().await;
    mount_ip_location(&geo, 40.7128, -74.006).await;
    mount_solar_times(
        &solar,
        "2024-03-20T11:02:00+00:00",
        "2024-03-20T23:14:00+00:00",
    )
    .await;

    let mut app = app_with(ip_location(&geo), &solar);
    assert!(app.is_loading());
    app.start();
    run_until_ready(&mut app).await;

    let clock = app.clock();
    assert!(!clock.is_loading());
    assert_eq!(
        clock.coordinates(),
        Some(Coordinates::new(40.7128, -74.006).unwrap())
    );
    assert_eq!(
        clock.solar(),
        Some(SolarTimes::new(
            utc("2024-03-20T11:02:00Z"),
            utc("2024-03-20T23:14:00Z")
        ))
    );
    assert_eq!(clock.advisory(), None);
    assert!(app.position().is_some());
    assert!(app.hands().is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn location_failure_falls_back_and_still_fetches() {
    let geo = MockServer::start().await;
    let solar = MockServer::start().await;
    mount_status(&geo, GEO_PATH, 403).await;
    Mock::given(method("GET"))
        .and(path(SOLAR_PATH))
        .and(query_param("lat", "21.17613002631575"))
        .and(query_param("lng", "72.83302877520299"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": {
                "sunrise": "2024-03-20T00:58:12+00:00",
                "sunset": "2024-03-20T13:05:41+00:00"
            },
            "status": "OK"
        })))
        .expect(1)
        .mount(&solar)
        .await;

    let mut app = app_with(ip_location(&geo), &solar);
    app.start();
    run_until_ready(&mut app).await;

    let clock = app.clock();
    assert_eq!(clock.coordinates(), Some(Coordinates::DEFAULT));
    assert_eq!(
        clock.advisory().map(Advisory::message).as_deref(),
        Some("Unable to get your location. Using default location (Surat).")
    );
    assert_eq!(clock.solar().unwrap().sunrise(), utc("2024-03-20T00:58:12Z"));
}

#[tokio::test(flavor = "multi_thread")]
async fn solar_failure_uses_six_to_six_approximation() {
    let solar = MockServer::start().await;
    mount_status(&solar, SOLAR_PATH, 500).await;

    let pinned = Coordinates::new(35.6762, 139.6503).unwrap();
    let mut app = app_with(LocationSource::Fixed(pinned), &solar);
    app.start();
    run_until_ready(&mut app).await;

    let clock = app.clock();
    assert!(!clock.is_loading());
    assert_eq!(clock.coordinates(), Some(pinned));
    assert_eq!(clock.advisory(), Some(&Advisory::SolarTimeLookupFailed));

    let date = clock.now().with_timezone(&Local).date_naive();
    assert_eq!(clock.solar(), Some(SolarTimes::approximate(date, &Local)));
}

#[tokio::test(flavor = "multi_thread")]
async fn non_ok_service_status_is_a_failure() {
    let solar = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SOLAR_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": "",
            "status": "INVALID_DATE"
        })))
        .mount(&solar)
        .await;

    let mut app = app_with(LocationSource::Fixed(Coordinates::DEFAULT), &solar);
    app.start();
    run_until_ready(&mut app).await;

    assert_eq!(
        app.clock().advisory(),
        Some(&Advisory::SolarTimeLookupFailed)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn both_failures_leave_the_latest_advisory() {
    let solar = MockServer::start().await;
    mount_status(&solar, SOLAR_PATH, 502).await;

    let mut app = app_with(LocationSource::Disabled, &solar);
    app.start();
    run_until_ready(&mut app).await;

    let clock = app.clock();
    assert_eq!(clock.coordinates(), Some(Coordinates::DEFAULT));
    assert_eq!(clock.advisory(), Some(&Advisory::SolarTimeLookupFailed));
    assert!(clock.solar().is_some());
    assert!(!clock.is_loading());
}

#[tokio::test(flavor = "multi_thread")]
async fn shutdown_before_answers_discards_them() {
    let solar = MockServer::start().await;
    mount_solar_times(
        &solar,
        "2024-03-20T06:00:00+00:00",
        "2024-03-20T18:00:00+00:00",
    )
    .await;

    let mut app = app_with(LocationSource::Fixed(Coordinates::DEFAULT), &solar);
    app.start();
    app.shutdown();
    assert_eq!(app.phase(), ResolverPhase::Stopped);

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    app.tick();

    assert_eq!(app.phase(), ResolverPhase::Stopped);
    assert!(app.is_loading());
    assert_eq!(app.clock().solar(), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn ticking_advances_the_clock() {
    let solar = MockServer::start().await;
    mount_solar_times(
        &solar,
        "2024-03-20T06:00:00+00:00",
        "2024-03-20T18:00:00+00:00",
    )
    .await;

    let mut app = app_with(LocationSource::Fixed(Coordinates::DEFAULT), &solar);
    app.start();
    let first = app.clock().now();
    tokio::time::sleep(std::time::Duration::from_millis(1200)).await;
    app.tick();
    assert!(app.clock().now() > first);
    app.shutdown();
    assert!(!app.is_ticking());
}
