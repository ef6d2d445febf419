use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};

use crate::variable_hour::{VariableHourPosition, variable_hour};

const APPROXIMATE_SUNRISE_HOUR: i64 = 6;
const APPROXIMATE_SUNSET_HOUR: i64 = 18;

/// Sunrise and sunset instants for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolarTimes {
    sunrise: DateTime<Utc>,
    sunset: DateTime<Utc>,
}

impl SolarTimes {
    #[must_use]
    pub const fn new(sunrise: DateTime<Utc>, sunset: DateTime<Utc>) -> Self {
        Self { sunrise, sunset }
    }

    /// Build from instants reported for a UTC calendar date.
    ///
    /// West of Greenwich the local day straddles UTC midnight, so a service
    /// answering for one UTC date can report a sunset that precedes the
    /// sunrise. Such a sunset belongs to the following UTC day.
    #[must_use]
    pub fn from_utc_day(sunrise: DateTime<Utc>, sunset: DateTime<Utc>) -> Self {
        let sunset = if sunset < sunrise {
            sunset + TimeDelta::days(1)
        } else {
            sunset
        };
        Self { sunrise, sunset }
    }

    /// 06:00 and 18:00 local time on `date`, used when the lookup fails.
    #[must_use]
    pub fn approximate<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Self {
        Self {
            sunrise: local_hour(date, APPROXIMATE_SUNRISE_HOUR, tz),
            sunset: local_hour(date, APPROXIMATE_SUNSET_HOUR, tz),
        }
    }

    #[must_use]
    pub const fn sunrise(&self) -> DateTime<Utc> {
        self.sunrise
    }

    #[must_use]
    pub const fn sunset(&self) -> DateTime<Utc> {
        self.sunset
    }

    #[must_use]
    pub fn position_at(&self, now: DateTime<Utc>) -> VariableHourPosition {
        variable_hour(now, self.sunrise, self.sunset)
    }
}

fn local_hour<Tz: TimeZone>(date: NaiveDate, hour: i64, tz: &Tz) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN) + TimeDelta::hours(hour);
    // A DST gap can swallow the wall-clock hour; take the first valid instant after it.
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(naive + TimeDelta::hours(1)))
                .earliest()
        })
        .map_or_else(|| Utc.from_utc_datetime(&naive), |dt| dt.with_timezone(&Utc))
}
