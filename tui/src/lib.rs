//! TUI rendering for Horae using ratatui.

mod clock_face;
mod input;
mod starfield;
mod theme;

pub use clock_face::{ClockFace, dial_area, polar};
pub use input::{InputPump, handle_events, is_quit_event};
pub use starfield::{STAR_COUNT, Star, Starfield};
pub use theme::{Glyphs, Palette, glyphs, palette, spinner_frame, styles};

use std::fmt::Display;
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone, Utc};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
};

use horae_engine::App;
use horae_types::{Advisory, Coordinates, SolarTimes, VariableHourPosition};

pub const LOADING_MESSAGE: &str = "Loading your celestial timepiece...";

/// `6:00:00 AM` style wall-clock time of `instant` in `tz`.
#[must_use]
pub fn format_time_in<Tz>(instant: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    instant.with_timezone(tz).format("%-I:%M:%S %p").to_string()
}

/// [`format_time_in`] the viewer's local zone.
#[must_use]
pub fn format_local_time(instant: DateTime<Utc>) -> String {
    format_time_in(instant, &Local)
}

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App, starfield: &Starfield) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    // Clear with background color
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let clock = app.clock();
    let (false, Some(position), Some(solar)) =
        (app.is_loading(), clock.position(), clock.solar())
    else {
        draw_loading(frame, app, &palette);
        return;
    };

    let advisory_height = if clock.advisory().is_some() { 2 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(advisory_height), // Advisory
            Constraint::Min(3),                  // Clock face
            Constraint::Length(3),               // Readout
            Constraint::Length(1),               // Key hints
        ])
        .split(frame.area());

    if let Some(advisory) = clock.advisory() {
        draw_advisory(frame, advisory, chunks[0], &palette, &glyphs);
    }

    let elapsed = if options.reduced_motion {
        Duration::ZERO
    } else {
        starfield.elapsed()
    };
    let face = ClockFace::new(
        position.hands(),
        position.is_daytime(),
        starfield,
        &palette,
        &glyphs,
    )
    .twinkle_at(elapsed);
    frame.render_widget(face, dial_area(chunks[1]));

    draw_readout(
        frame,
        &position,
        &solar,
        clock.coordinates(),
        chunks[2],
        &palette,
        &glyphs,
    );
    draw_key_hints(frame, chunks[3], &palette);
}

fn draw_loading(frame: &mut Frame, app: &App, palette: &Palette) {
    let area = frame.area();
    let spinner = spinner_frame(app.tick_count(), app.ui_options());
    let line = Line::from(vec![
        Span::styled(spinner, Style::default().fg(palette.accent)),
        Span::raw(" "),
        Span::styled(LOADING_MESSAGE, Style::default().fg(palette.text_primary)),
    ]);
    let y = area.y + area.height / 2;
    let row = Rect {
        x: area.x,
        y,
        width: area.width,
        height: 1.min(area.height),
    };
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), row);
}

fn draw_advisory(
    frame: &mut Frame,
    advisory: &Advisory,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let style = styles::advisory(palette);
    let line = Line::from(vec![
        Span::styled(glyphs.warning, style),
        Span::raw(" "),
        Span::styled(advisory.message(), style),
    ]);
    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_readout(
    frame: &mut Frame,
    position: &VariableHourPosition,
    solar: &SolarTimes,
    coordinates: Option<Coordinates>,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let detail = styles::detail(palette);
    let mut lines = vec![
        Line::styled(position.to_string(), styles::time_readout(palette)),
        Line::from(vec![
            Span::styled(
                format!("Sunrise: {}", format_local_time(solar.sunrise())),
                detail,
            ),
            Span::styled(format!(" {} ", glyphs.separator), styles::key_hint(palette)),
            Span::styled(
                format!("Sunset: {}", format_local_time(solar.sunset())),
                detail,
            ),
        ]),
    ];
    if let Some(coordinates) = coordinates {
        lines.push(Line::from(vec![
            Span::styled(glyphs.location, Style::default().fg(palette.accent)),
            Span::raw(" "),
            Span::styled(coordinates.to_string(), detail),
        ]));
    }
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_key_hints(frame: &mut Frame, area: Rect, palette: &Palette) {
    let hint = Line::from(vec![
        Span::styled("q", styles::key_hint(palette).fg(palette.text_secondary)),
        Span::styled(" quit", styles::key_hint(palette)),
    ]);
    frame.render_widget(Paragraph::new(hint).alignment(Alignment::Right), area);
}
