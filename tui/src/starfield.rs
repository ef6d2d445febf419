//! Twinkling background stars behind the clock face.

use std::time::{Duration, Instant};

/// Stars scattered behind the dial.
pub const STAR_COUNT: usize = 50;

/// One fade from dim to bright; the next fades back.
const TWINKLE_HALF_PERIOD_SECS: f64 = 2.0;
const MIN_BRIGHTNESS: f64 = 0.2;
const STAR_SIZES: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    /// Horizontal position in `[0, 1)`, left to right.
    pub x: f64,
    /// Vertical position in `[0, 1)`, bottom to top.
    pub y: f64,
    /// Glyph weight, `0` smallest.
    pub size: u8,
    /// Offset into the twinkle cycle so stars do not pulse in unison.
    pub delay: Duration,
}

impl Star {
    /// Brightness in `[MIN_BRIGHTNESS, 1]` after `elapsed`.
    ///
    /// Triangle wave: ramps up over one half period, back down over the next.
    #[must_use]
    pub fn brightness(&self, elapsed: Duration) -> f64 {
        let t = elapsed.as_secs_f64() + self.delay.as_secs_f64();
        let phase = (t / TWINKLE_HALF_PERIOD_SECS).rem_euclid(2.0);
        let ramp = if phase < 1.0 { phase } else { 2.0 - phase };
        MIN_BRIGHTNESS + (1.0 - MIN_BRIGHTNESS) * ramp
    }
}

#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<Star>,
    epoch: Instant,
}

impl Starfield {
    /// [`STAR_COUNT`] stars at random positions, sizes and phases.
    #[must_use]
    pub fn random() -> Self {
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                x: rand::random::<f64>(),
                y: rand::random::<f64>(),
                size: (rand::random::<f64>() * f64::from(STAR_SIZES)) as u8,
                delay: Duration::from_secs_f64(rand::random::<f64>() * TWINKLE_HALF_PERIOD_SECS),
            })
            .collect();
        Self::from_stars(stars)
    }

    #[must_use]
    pub fn from_stars(stars: Vec<Star>) -> Self {
        Self {
            stars,
            epoch: Instant::now(),
        }
    }

    #[must_use]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Time since the field was created; drives the twinkle.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.epoch.elapsed()
    }
}

impl Default for Starfield {
    fn default() -> Self {
        Self::random()
    }
}
