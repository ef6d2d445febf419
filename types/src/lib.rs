//! Core domain types for Horae.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod advisory;
mod coordinates;
mod solar;
pub mod ui;
mod variable_hour;

pub use advisory::Advisory;
pub use coordinates::{
    Coordinates, CoordinatesError, DEFAULT_LATITUDE, DEFAULT_LOCATION_NAME, DEFAULT_LONGITUDE,
};
pub use solar::SolarTimes;
pub use ui::UiOptions;
pub use variable_hour::{HOURS_PER_PERIOD, HandAngles, VariableHourPosition, variable_hour};
