//! Location and solar-time resolution as an explicit state machine.
//!
//! ```text
//! Init -> AwaitingLocation -> AwaitingSolarTimes -> Ready
//!              |                     |
//!              +---------------------+--> Stopped (shutdown)
//! ```
//!
//! Each awaiting state owns the `JoinHandle` of its one-shot request. The frame
//! loop calls [`Resolver::poll`], which never blocks: it only inspects handles
//! that have already finished. Failures substitute fallback values and record an
//! [`Advisory`]; nothing is retried.

use chrono::{Local, NaiveDate};
use futures_util::future::FutureExt;
use tokio::task::{JoinError, JoinHandle};

use horae_providers::{Coordinates, LocationSource, LookupError, SolarClient, SolarTimes};
use horae_types::{Advisory, DEFAULT_LOCATION_NAME};

use crate::state::ClockState;

/// Location used when geolocation fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Fallback {
    pub coordinates: Coordinates,
    /// Shown in the advisory ("Using default location (Surat).").
    pub name: String,
}

impl Default for Fallback {
    fn default() -> Self {
        Self {
            coordinates: Coordinates::DEFAULT,
            name: DEFAULT_LOCATION_NAME.to_string(),
        }
    }
}

/// The two lookups plus the fallback location.
#[derive(Debug, Clone)]
pub struct Lookups {
    pub location: LocationSource,
    pub solar: SolarClient,
    pub fallback: Fallback,
}

/// Observable phase of the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverPhase {
    Init,
    AwaitingLocation,
    AwaitingSolarTimes,
    Ready,
    Stopped,
}

type LookupTask<T> = JoinHandle<Result<T, LookupError>>;

enum ResolverState {
    Init,
    AwaitingLocation(LookupTask<Coordinates>),
    AwaitingSolarTimes {
        coordinates: Coordinates,
        date: NaiveDate,
        task: LookupTask<SolarTimes>,
    },
    Ready,
    Stopped,
}

pub struct Resolver {
    lookups: Lookups,
    state: ResolverState,
}

impl Resolver {
    #[must_use]
    pub fn new(lookups: Lookups) -> Self {
        Self {
            lookups,
            state: ResolverState::Init,
        }
    }

    #[must_use]
    pub fn phase(&self) -> ResolverPhase {
        match self.state {
            ResolverState::Init => ResolverPhase::Init,
            ResolverState::AwaitingLocation(_) => ResolverPhase::AwaitingLocation,
            ResolverState::AwaitingSolarTimes { .. } => ResolverPhase::AwaitingSolarTimes,
            ResolverState::Ready => ResolverPhase::Ready,
            ResolverState::Stopped => ResolverPhase::Stopped,
        }
    }

    /// Spawn the location request. Only the first call in `Init` has any effect.
    pub fn start(&mut self) {
        if !matches!(self.state, ResolverState::Init) {
            return;
        }
        let source = self.lookups.location.clone();
        tracing::debug!("Starting location lookup");
        let task = tokio::spawn(async move { source.locate().await });
        self.state = ResolverState::AwaitingLocation(task);
    }

    /// Advance past any finished request, writing results into `clock`.
    pub fn poll(&mut self, clock: &mut ClockState) {
        let finished = match &self.state {
            ResolverState::AwaitingLocation(task) => task.is_finished(),
            ResolverState::AwaitingSolarTimes { task, .. } => task.is_finished(),
            _ => false,
        };
        if !finished {
            return;
        }

        match std::mem::replace(&mut self.state, ResolverState::Ready) {
            ResolverState::AwaitingLocation(mut task) => {
                let Some(result) = take_result(&mut task) else {
                    // is_finished() was true but the handle isn't ready yet; retry next poll.
                    self.state = ResolverState::AwaitingLocation(task);
                    return;
                };
                let coordinates = match result {
                    Ok(coordinates) => coordinates,
                    Err(e) => {
                        let fallback = &self.lookups.fallback;
                        tracing::warn!(
                            error = %e,
                            fallback = %fallback.name,
                            "Location unavailable, using fallback"
                        );
                        clock.set_advisory(Advisory::location_unavailable(fallback.name.clone()));
                        fallback.coordinates
                    }
                };
                clock.set_coordinates(coordinates);
                self.request_solar_times(coordinates, local_date(clock));
            }
            ResolverState::AwaitingSolarTimes {
                coordinates,
                date,
                mut task,
            } => {
                let Some(result) = take_result(&mut task) else {
                    self.state = ResolverState::AwaitingSolarTimes {
                        coordinates,
                        date,
                        task,
                    };
                    return;
                };
                let times = match result {
                    Ok(times) => times,
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            %coordinates,
                            "Sunrise/sunset lookup failed, using approximations"
                        );
                        clock.set_advisory(Advisory::SolarTimeLookupFailed);
                        SolarTimes::approximate(date, &Local)
                    }
                };
                clock.set_solar_times(times);
            }
            other => self.state = other,
        }
    }

    /// Abort any in-flight request. Later completions are discarded.
    pub fn stop(&mut self) {
        match std::mem::replace(&mut self.state, ResolverState::Stopped) {
            ResolverState::AwaitingLocation(task) => task.abort(),
            ResolverState::AwaitingSolarTimes { task, .. } => task.abort(),
            _ => {}
        }
    }

    fn request_solar_times(&mut self, coordinates: Coordinates, date: NaiveDate) {
        let client = self.lookups.solar.clone();
        tracing::debug!(%coordinates, %date, "Starting sunrise/sunset lookup");
        let task = tokio::spawn(async move { client.fetch(coordinates, date).await });
        self.state = ResolverState::AwaitingSolarTimes {
            coordinates,
            date,
            task,
        };
    }
}

impl Drop for Resolver {
    fn drop(&mut self) {
        self.stop();
    }
}

#[derive(Debug, thiserror::Error)]
enum TaskFailure {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("lookup task ended abnormally: {0}")]
    Join(#[from] JoinError),
}

/// `None` while the handle cannot yield yet, even after `is_finished()`.
fn take_result<T>(task: &mut LookupTask<T>) -> Option<Result<T, TaskFailure>> {
    let joined = task.now_or_never()?;
    Some(match joined {
        Ok(result) => result.map_err(TaskFailure::from),
        Err(e) => Err(TaskFailure::from(e)),
    })
}

fn local_date(clock: &ClockState) -> NaiveDate {
    clock.now().with_timezone(&Local).date_naive()
}
