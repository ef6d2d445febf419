//! Session state owned by the view.

use chrono::{DateTime, Utc};

use horae_types::{Advisory, Coordinates, HandAngles, SolarTimes, VariableHourPosition};

/// Everything the render pass reads, in one place.
///
/// Written only by the frame loop: the ticker's latest instant through
/// [`ClockState::observe`], lookup results through the resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockState {
    now: DateTime<Utc>,
    coordinates: Option<Coordinates>,
    solar: Option<SolarTimes>,
    loading: bool,
    advisory: Option<Advisory>,
}

impl ClockState {
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            coordinates: None,
            solar: None,
            loading: true,
            advisory: None,
        }
    }

    pub fn observe(&mut self, now: DateTime<Utc>) {
        self.now = now;
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    #[must_use]
    pub fn solar(&self) -> Option<SolarTimes> {
        self.solar
    }

    /// True until solar times (real or approximate) are known.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn advisory(&self) -> Option<&Advisory> {
        self.advisory.as_ref()
    }

    /// `None` until solar times are known.
    #[must_use]
    pub fn position(&self) -> Option<VariableHourPosition> {
        self.solar.map(|solar| solar.position_at(self.now))
    }

    #[must_use]
    pub fn hands(&self) -> Option<HandAngles> {
        self.position().map(|position| position.hands())
    }

    pub fn set_coordinates(&mut self, coordinates: Coordinates) {
        self.coordinates = Some(coordinates);
    }

    pub fn set_solar_times(&mut self, times: SolarTimes) {
        self.solar = Some(times);
        self.loading = false;
    }

    /// Replaces any earlier advisory.
    pub fn set_advisory(&mut self, advisory: Advisory) {
        self.advisory = Some(advisory);
    }
}
