//! Core engine for Horae - clock state and lookup orchestration.
//!
//! This crate contains the [`App`] state object without TUI dependencies. The
//! frame loop owns the `App` and calls [`App::tick`] once per frame; rendering
//! reads it by reference.

use chrono::Utc;

use horae_types::{HandAngles, UiOptions, VariableHourPosition};

// Re-export from crates for public API
pub use horae_providers::{self, LocationSource, LookupError, SolarClient};
pub use horae_types::{self, Advisory, Coordinates, SolarTimes};

// Config types - passed in from caller
mod config;
pub use config::{
    AppConfig, ConfigError, HoraeConfig, LocationConfig, LookupMode, ServicesConfig, config_path,
    expand_env_vars,
};

mod resolver;
pub use resolver::{Fallback, Lookups, Resolver, ResolverPhase};

mod state;
pub use state::ClockState;

mod ticker;
pub use ticker::{ClockTicker, TICK_PERIOD};

/// The variable-hour clock view.
pub struct App {
    clock: ClockState,
    resolver: Resolver,
    ticker: Option<ClockTicker>,
    ui_options: UiOptions,
    tick: usize,
}

impl App {
    /// Build from optional config. Nothing is spawned until [`App::start`].
    pub fn new(config: Option<&HoraeConfig>) -> anyhow::Result<Self> {
        let default_config;
        let config = match config {
            Some(config) => config,
            None => {
                default_config = HoraeConfig::default();
                &default_config
            }
        };
        let lookups = config.lookups()?;
        Ok(Self::with_lookups(lookups, config.ui_options()))
    }

    #[must_use]
    pub fn with_lookups(lookups: Lookups, ui_options: UiOptions) -> Self {
        Self {
            clock: ClockState::new(Utc::now()),
            resolver: Resolver::new(lookups),
            ticker: None,
            ui_options,
            tick: 0,
        }
    }

    /// Start the one-second ticker and the location lookup.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        if self.ticker.is_none() {
            self.ticker = Some(ClockTicker::spawn());
        }
        self.resolver.start();
    }

    /// Advance one frame: pick up the latest tick and any finished lookup.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        if let Some(ticker) = &self.ticker {
            self.clock.observe(ticker.latest());
        }
        self.resolver.poll(&mut self.clock);
    }

    /// Stop the ticker and abandon in-flight lookups.
    pub fn shutdown(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
        self.resolver.stop();
        tracing::debug!("Clock view shut down");
    }

    #[must_use]
    pub fn clock(&self) -> &ClockState {
        &self.clock
    }

    /// Mutable access for driving the clock by hand (tests, demos).
    pub fn clock_mut(&mut self) -> &mut ClockState {
        &mut self.clock
    }

    #[must_use]
    pub fn phase(&self) -> ResolverPhase {
        self.resolver.phase()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.clock.is_loading()
    }

    #[must_use]
    pub fn position(&self) -> Option<VariableHourPosition> {
        self.clock.position()
    }

    #[must_use]
    pub fn hands(&self) -> Option<HandAngles> {
        self.clock.hands()
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.ui_options
    }

    #[must_use]
    pub fn tick_count(&self) -> usize {
        self.tick
    }

    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}
