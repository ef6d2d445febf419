use serde::Deserialize;
use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

use horae_providers::{
    Coordinates, DEFAULT_GEOLOCATION_URL, DEFAULT_SUNRISE_SUNSET_URL, DEFAULT_TIMEOUT_SECS,
    IpLocator, LocationSource, LookupError, SolarClient,
};
use horae_types::UiOptions;

use crate::resolver::{Fallback, Lookups};

/// Contents of `~/.horae/config.toml`. Every section is optional.
///
/// ```toml
/// [app]
/// ascii_only = false
/// high_contrast = false
/// reduced_motion = false
///
/// [location]
/// latitude = 51.4779
/// longitude = -0.0015
/// lookup = "ip"
/// fallback_latitude = 21.17613002631575
/// fallback_longitude = 72.83302877520299
/// fallback_name = "Surat"
///
/// [services]
/// geolocation_url = "https://ipapi.co/json/"
/// sunrise_sunset_url = "https://api.sunrise-sunset.org"
/// timeout_seconds = 10
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct HoraeConfig {
    pub app: Option<AppConfig>,
    pub location: Option<LocationConfig>,
    pub services: Option<ServicesConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for the sun, moon, stars and markers.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Disable the star twinkle animation.
    #[serde(default)]
    pub reduced_motion: bool,
}

/// How to find the viewer when no fixed coordinates are configured.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LookupMode {
    /// Ask the IP-geolocation service.
    #[default]
    Ip,
    /// Skip geolocation; the fallback location is used with an advisory.
    None,
}

#[derive(Debug, Default, Deserialize)]
pub struct LocationConfig {
    /// Fixed latitude. Used only together with `longitude`.
    pub latitude: Option<f64>,
    /// Fixed longitude. Used only together with `latitude`.
    pub longitude: Option<f64>,
    #[serde(default)]
    pub lookup: LookupMode,
    pub fallback_latitude: Option<f64>,
    pub fallback_longitude: Option<f64>,
    pub fallback_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ServicesConfig {
    /// Supports `${VAR}` expansion.
    pub geolocation_url: Option<String>,
    /// Supports `${VAR}` expansion.
    pub sunrise_sunset_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let var = &after[..end];
                if !var.is_empty() {
                    out.push_str(&env::var(var).unwrap_or_default());
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

impl HoraeConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    /// Load from an explicit path. A missing file is `Ok(None)`.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.app
            .as_ref()
            .map(|app| UiOptions {
                ascii_only: app.ascii_only,
                high_contrast: app.high_contrast,
                reduced_motion: app.reduced_motion,
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        let secs = self
            .services
            .as_ref()
            .and_then(|s| s.timeout_seconds)
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    #[must_use]
    pub fn geolocation_url(&self) -> String {
        self.services
            .as_ref()
            .and_then(|s| s.geolocation_url.as_deref())
            .map_or_else(|| DEFAULT_GEOLOCATION_URL.to_string(), expand_env_vars)
    }

    #[must_use]
    pub fn sunrise_sunset_url(&self) -> String {
        self.services
            .as_ref()
            .and_then(|s| s.sunrise_sunset_url.as_deref())
            .map_or_else(|| DEFAULT_SUNRISE_SUNSET_URL.to_string(), expand_env_vars)
    }

    /// Coordinates pinned in `[location]`, if both halves are present and valid.
    #[must_use]
    pub fn fixed_coordinates(&self) -> Option<Coordinates> {
        let location = self.location.as_ref()?;
        match (location.latitude, location.longitude) {
            (Some(lat), Some(lon)) => match Coordinates::new(lat, lon) {
                Ok(coordinates) => Some(coordinates),
                Err(e) => {
                    tracing::warn!("Ignoring configured location: {e}");
                    None
                }
            },
            (None, None) => None,
            _ => {
                tracing::warn!("Ignoring configured location: latitude and longitude must both be set");
                None
            }
        }
    }

    #[must_use]
    pub fn fallback(&self) -> Fallback {
        let Some(location) = self.location.as_ref() else {
            return Fallback::default();
        };

        let coordinates = match (location.fallback_latitude, location.fallback_longitude) {
            (Some(lat), Some(lon)) => Coordinates::new(lat, lon)
                .inspect_err(|e| tracing::warn!("Ignoring configured fallback location: {e}"))
                .ok(),
            _ => None,
        };

        match coordinates {
            Some(coordinates) => Fallback {
                coordinates,
                name: location
                    .fallback_name
                    .clone()
                    .unwrap_or_else(|| coordinates.to_string()),
            },
            None => Fallback::default(),
        }
    }

    /// Resolve the configured sources into ready-to-run lookups.
    pub fn lookups(&self) -> Result<Lookups, LookupError> {
        let client = horae_providers::http_client(self.request_timeout())?;

        let location = if let Some(coordinates) = self.fixed_coordinates() {
            LocationSource::Fixed(coordinates)
        } else {
            let mode = self
                .location
                .as_ref()
                .map(|l| l.lookup)
                .unwrap_or_default();
            match mode {
                LookupMode::Ip => {
                    LocationSource::IpLookup(IpLocator::new(client.clone(), &self.geolocation_url())?)
                }
                LookupMode::None => LocationSource::Disabled,
            }
        };

        let solar = SolarClient::new(client, &self.sunrise_sunset_url())?;

        Ok(Lookups {
            location,
            solar,
            fallback: self.fallback(),
        })
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".horae").join("config.toml"))
}
