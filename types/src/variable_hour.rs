//! Variable (temporal) hours.
//!
//! Daytime `[sunrise, sunset)` and nighttime `[sunset, sunrise + 24h)` are each
//! divided into twelve equal hours. The following sunrise is approximated as
//! today's sunrise plus 24 hours; near the solstices or at high latitudes the
//! true next sunrise drifts from that by a few minutes.

use std::fmt;

use chrono::{DateTime, Utc};

/// Number of variable hours in each of the day and night periods.
pub const HOURS_PER_PERIOD: u8 = 12;

const MILLIS_PER_DAY: i64 = 86_400_000;
const SCALE: i128 = HOURS_PER_PERIOD as i128;

/// Where an instant falls on the variable-hour dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableHourPosition {
    hour_index: u8,
    minutes_into_hour: u8,
    seconds_into_hour: u8,
    is_daytime: bool,
}

impl VariableHourPosition {
    /// Polar day, polar night, or an inverted pair: no usable period to divide.
    const DEGENERATE: Self = Self {
        hour_index: 1,
        minutes_into_hour: 0,
        seconds_into_hour: 0,
        is_daytime: true,
    };

    /// 1..=12
    #[must_use]
    pub const fn hour_index(&self) -> u8 {
        self.hour_index
    }

    /// 0..=59
    #[must_use]
    pub const fn minutes_into_hour(&self) -> u8 {
        self.minutes_into_hour
    }

    /// 0..=59
    #[must_use]
    pub const fn seconds_into_hour(&self) -> u8 {
        self.seconds_into_hour
    }

    #[must_use]
    pub const fn is_daytime(&self) -> bool {
        self.is_daytime
    }

    #[must_use]
    pub const fn period_label(&self) -> &'static str {
        if self.is_daytime { "Day" } else { "Night" }
    }

    #[must_use]
    pub fn hands(&self) -> HandAngles {
        HandAngles::from_position(self)
    }
}

impl fmt::Display for VariableHourPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{:02}:{:02} {}",
            self.hour_index,
            self.minutes_into_hour,
            self.seconds_into_hour,
            self.period_label()
        )
    }
}

/// Clockwise hand rotations in degrees, 0 at twelve o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

impl HandAngles {
    #[must_use]
    pub fn from_position(position: &VariableHourPosition) -> Self {
        Self {
            hour: rotation(position.hour_index, HOURS_PER_PERIOD),
            minute: rotation(position.minutes_into_hour, 60),
            second: rotation(position.seconds_into_hour, 60),
        }
    }
}

fn rotation(component: u8, scale: u8) -> f64 {
    f64::from(component) * 360.0 / f64::from(scale)
}

/// Map `now` onto the variable-hour dial defined by `sunrise` and `sunset`.
///
/// `now` is placed on the 24-hour cycle that starts at `sunrise`, so instants
/// before today's sunrise belong to the previous night and instants several
/// days later still resolve. Boundary instants start the new period.
///
/// A day that is empty, inverted, or 24 hours or longer leaves one of the two
/// periods without length; it resolves to hour 1 of a permanent day.
#[must_use]
pub fn variable_hour(
    now: DateTime<Utc>,
    sunrise: DateTime<Utc>,
    sunset: DateTime<Utc>,
) -> VariableHourPosition {
    let day = (sunset - sunrise).num_milliseconds();
    if day <= 0 || day >= MILLIS_PER_DAY {
        return VariableHourPosition::DEGENERATE;
    }

    let offset = (now - sunrise).num_milliseconds().rem_euclid(MILLIS_PER_DAY);
    let (is_daytime, elapsed, period) = if offset < day {
        (true, offset, day)
    } else {
        (false, offset - day, MILLIS_PER_DAY - day)
    };

    // Work in twelfths of the period so every division below is exact:
    // `scaled / period` counts whole hours, `rem / period` is the fraction
    // of the current hour.
    let period = i128::from(period);
    let scaled = i128::from(elapsed) * SCALE;
    let hour = scaled / period;
    let rem = scaled % period;

    VariableHourPosition {
        hour_index: (hour + 1) as u8,
        minutes_into_hour: (rem * 60 / period) as u8,
        seconds_into_hour: ((rem * 3600 / period) % 60) as u8,
        is_daytime,
    }
}
