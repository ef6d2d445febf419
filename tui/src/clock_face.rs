//! Analog dial for the variable-hour clock, drawn on a braille canvas.

use std::f64::consts::PI;
use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::{
        Widget,
        canvas::{Canvas, Circle, Context, Line, Points},
    },
};

use horae_types::{HOURS_PER_PERIOD, HandAngles};

use crate::starfield::Starfield;
use crate::theme::{Glyphs, Palette};

/// Canvas extent on both axes; the dial has radius 1.
const BOUND: f64 = 1.2;

const DIAL_RADIUS: f64 = 1.0;
const TICK_OUTER: f64 = 0.96;
const TICK_INNER: f64 = 0.88;
const TICK_INNER_MAJOR: f64 = 0.80;

const HOUR_HAND: f64 = 0.6;
const MINUTE_HAND: f64 = 0.8;
const SECOND_HAND: f64 = 0.9;
const CENTER_DOT: f64 = 0.04;

/// The sun or moon sits a quarter of the way down the face.
const BODY_Y: f64 = 0.5;
const BODY_RADIUS: f64 = 0.1;

/// Point at `radius` along a hand rotated `degrees` clockwise from 12 o'clock.
#[must_use]
pub fn polar(degrees: f64, radius: f64) -> (f64, f64) {
    let radians = degrees * PI / 180.0;
    (radius * radians.sin(), radius * radians.cos())
}

/// Largest rect inside `area` that renders the dial round.
///
/// Terminal cells are about twice as tall as they are wide.
#[must_use]
pub fn dial_area(area: Rect) -> Rect {
    let height = area.height.min(area.width / 2);
    let width = height.saturating_mul(2).min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub struct ClockFace<'a> {
    hands: HandAngles,
    daytime: bool,
    starfield: &'a Starfield,
    elapsed: Duration,
    palette: &'a Palette,
    glyphs: &'a Glyphs,
}

impl<'a> ClockFace<'a> {
    #[must_use]
    pub fn new(
        hands: HandAngles,
        daytime: bool,
        starfield: &'a Starfield,
        palette: &'a Palette,
        glyphs: &'a Glyphs,
    ) -> Self {
        Self {
            hands,
            daytime,
            starfield,
            elapsed: Duration::ZERO,
            palette,
            glyphs,
        }
    }

    /// Point in the twinkle cycle; left at zero the stars hold still.
    #[must_use]
    pub fn twinkle_at(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    fn paint_stars(&self, ctx: &mut Context<'_>) {
        for star in self.starfield.stars() {
            let x = -BOUND + star.x * 2.0 * BOUND;
            let y = -BOUND + star.y * 2.0 * BOUND;
            // Stars stay off the dial itself.
            if x.hypot(y) < DIAL_RADIUS {
                continue;
            }
            let color = self.palette.star_at(star.brightness(self.elapsed));
            ctx.print(
                x,
                y,
                Span::styled(self.glyphs.star(star.size), Style::default().fg(color)),
            );
        }
    }

    fn paint_dial(&self, ctx: &mut Context<'_>) {
        ctx.draw(&Circle {
            x: 0.0,
            y: 0.0,
            radius: DIAL_RADIUS,
            color: self.palette.bg_border,
        });

        let step = 360.0 / f64::from(HOURS_PER_PERIOD);
        for i in 0..HOURS_PER_PERIOD {
            let inner = if i % 3 == 0 {
                TICK_INNER_MAJOR
            } else {
                TICK_INNER
            };
            let angle = f64::from(i) * step;
            let (x1, y1) = polar(angle, inner);
            let (x2, y2) = polar(angle, TICK_OUTER);
            ctx.draw(&Line {
                x1,
                y1,
                x2,
                y2,
                color: self.palette.text_secondary,
            });
        }
    }

    fn paint_body(&self, ctx: &mut Context<'_>) {
        let (glyph, color) = if self.daytime {
            (self.glyphs.sun, self.palette.sun)
        } else {
            (self.glyphs.moon, self.palette.moon)
        };
        ctx.draw(&Circle {
            x: 0.0,
            y: BODY_Y,
            radius: BODY_RADIUS,
            color,
        });
        ctx.print(0.0, BODY_Y, Span::styled(glyph, Style::default().fg(color)));
    }

    fn paint_hands(&self, ctx: &mut Context<'_>) {
        let hands = [
            (self.hands.hour, HOUR_HAND, self.palette.hour_hand),
            (self.hands.minute, MINUTE_HAND, self.palette.minute_hand),
            (self.hands.second, SECOND_HAND, self.palette.second_hand),
        ];
        for (angle, length, color) in hands {
            let (x2, y2) = polar(angle, length);
            ctx.draw(&Line {
                x1: 0.0,
                y1: 0.0,
                x2,
                y2,
                color,
            });
        }

        ctx.draw(&Circle {
            x: 0.0,
            y: 0.0,
            radius: CENTER_DOT,
            color: self.palette.text_primary,
        });
        ctx.draw(&Points {
            coords: &[(0.0, 0.0)],
            color: self.palette.text_primary,
        });
    }
}

impl Widget for ClockFace<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Canvas::default()
            .marker(Marker::Braille)
            .background_color(self.palette.bg_dark)
            .x_bounds([-BOUND, BOUND])
            .y_bounds([-BOUND, BOUND])
            .paint(|ctx| {
                self.paint_stars(ctx);
                ctx.layer();
                self.paint_dial(ctx);
                ctx.layer();
                self.paint_body(ctx);
                ctx.layer();
                self.paint_hands(ctx);
            })
            .render(area, buf);
    }
}
