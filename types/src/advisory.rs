use std::fmt;

/// User-visible notice that a fallback value is standing in for a lookup.
///
/// Only the most recent advisory is shown; a new one replaces the old.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// Geolocation failed; the named fallback location is in use.
    LocationUnavailable { fallback: String },
    /// The sunrise/sunset lookup failed; 06:00 and 18:00 local are in use.
    SolarTimeLookupFailed,
}

impl Advisory {
    #[must_use]
    pub fn location_unavailable(fallback: impl Into<String>) -> Self {
        Self::LocationUnavailable {
            fallback: fallback.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::LocationUnavailable { fallback } => {
                format!("Unable to get your location. Using default location ({fallback}).")
            }
            Self::SolarTimeLookupFailed => {
                "Failed to fetch sunrise and sunset times. Using approximations.".to_string()
            }
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
