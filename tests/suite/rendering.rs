//! Full frames through a virtual terminal.

use chrono::{DateTime, Utc};
use ratatui::Terminal;

use horae_engine::{App, AppConfig, HoraeConfig};
use horae_tui::{LOADING_MESSAGE, Starfield, draw, format_local_time};
use horae_types::{Advisory, Coordinates, SolarTimes};

use crate::common::utc;
use crate::vt100_backend::VT100Backend;

const WIDTH: u16 = 80;
const HEIGHT: u16 = 32;

fn render(app: &App) -> Terminal<VT100Backend> {
    let mut terminal = Terminal::new(VT100Backend::new(WIDTH, HEIGHT)).unwrap();
    let starfield = Starfield::random();
    terminal.draw(|frame| draw(frame, app, &starfield)).unwrap();
    terminal
}

fn resolve(app: &mut App, now: DateTime<Utc>, sunrise: &str, sunset: &str) {
    let clock = app.clock_mut();
    clock.observe(now);
    clock.set_coordinates(Coordinates::DEFAULT);
    clock.set_solar_times(SolarTimes::new(utc(sunrise), utc(sunset)));
}

fn equinox_app(now: &str) -> App {
    let mut app = App::new(None).unwrap();
    resolve(
        &mut app,
        utc(now),
        "2024-03-20T06:00:00Z",
        "2024-03-20T18:00:00Z",
    );
    app
}

#[test]
fn loading_frame() {
    let app = App::new(None).unwrap();
    let terminal = render(&app);
    let screen = terminal.backend();

    let row = screen.row_of(LOADING_MESSAGE).expect("loading message shown");
    assert_eq!(row, usize::from(HEIGHT / 2));
    assert!(screen.row_of("Sunrise:").is_none());
}

#[test]
fn noon_on_the_equinox_is_seventh_hour_of_day() {
    let app = equinox_app("2024-03-20T12:00:00Z");
    let terminal = render(&app);
    let screen = terminal.backend();

    let time_row = screen.row_of("7:00:00 Day").expect("time readout shown");
    let sun_row = screen.row_of("Sunrise:").expect("sunrise line shown");
    let place_row = screen
        .row_of("21.1761°, 72.8330°")
        .expect("coordinates shown");
    assert_eq!(sun_row, time_row + 1);
    assert_eq!(place_row, sun_row + 1);

    let sun_line = &screen.rows()[sun_row];
    assert!(sun_line.contains(&format!(
        "Sunrise: {}",
        format_local_time(utc("2024-03-20T06:00:00Z"))
    )));
    assert!(sun_line.contains(&format!(
        "Sunset: {}",
        format_local_time(utc("2024-03-20T18:00:00Z"))
    )));

    let col = screen.rows()[time_row].find('7').unwrap();
    assert!(screen.is_bold(time_row as u16, col as u16));
    assert!(screen.contents().contains('☀'));
    assert!(!screen.contents().contains('☾'));
}

#[test]
fn midnight_is_seventh_hour_of_night() {
    let app = equinox_app("2024-03-21T00:00:00Z");
    let terminal = render(&app);
    let screen = terminal.backend();

    assert!(screen.row_of("7:00:00 Night").is_some());
    assert!(screen.contents().contains('☾'));
}

#[test]
fn advisory_sits_above_the_dial() {
    let mut app = equinox_app("2024-03-20T09:30:00Z");
    app.clock_mut()
        .set_advisory(Advisory::location_unavailable("Surat"));
    let terminal = render(&app);
    let screen = terminal.backend();

    let banner = screen
        .row_of("Unable to get your location. Using default location (Surat).")
        .expect("advisory shown");
    let time_row = screen.row_of("4:30:00 Day").expect("time readout shown");
    assert!(banner < time_row);
    assert!(screen.rows()[banner].contains('⚠'));
}

#[test]
fn ascii_high_contrast_frame() {
    let config = HoraeConfig {
        app: Some(AppConfig {
            ascii_only: true,
            high_contrast: true,
            reduced_motion: true,
        }),
        ..Default::default()
    };
    let mut app = App::new(Some(&config)).unwrap();
    resolve(
        &mut app,
        utc("2024-03-20T15:00:00Z"),
        "2024-03-20T06:00:00Z",
        "2024-03-20T18:00:00Z",
    );
    app.clock_mut()
        .set_advisory(Advisory::SolarTimeLookupFailed);

    let terminal = render(&app);
    let screen = terminal.backend();

    assert!(screen.row_of("10:00:00 Day").is_some());
    assert!(screen.row_of("! Failed to fetch sunrise and sunset times.").is_some());
    assert!(screen.row_of("@ 21.1761°, 72.8330°").is_some());
    for glyph in ['☀', '☾', '⚠', '⌖', '✦'] {
        assert!(!screen.contents().contains(glyph), "{glyph} in ascii frame");
    }
}

#[test]
fn small_terminal_still_renders_readout() {
    let app = equinox_app("2024-03-20T12:00:00Z");
    let mut terminal = Terminal::new(VT100Backend::new(50, 10)).unwrap();
    let starfield = Starfield::random();
    terminal
        .draw(|frame| draw(frame, &app, &starfield))
        .unwrap();
    assert!(terminal.backend().row_of("7:00:00 Day").is_some());
}
