//! Location acquisition.
//!
//! A [`LocationProvider`] is the boundary to whatever actually knows where
//! the user is (a device API, a manual entry, a fixed test value). A
//! [`LocationSession`] owns one provider and the session's
//! [`LocationState`], and enforces the acquisition rules:
//!
//! - at most one request in flight; a second request while `Acquiring` is
//!   rejected with [`RequestError::Pending`]
//! - every request is bounded by a timeout (10 s by default) and a timeout
//!   leaves the state `Unavailable`
//! - [`LocationSession::cancel`] abandons the pending request; if its result
//!   arrives later it is discarded, so the newest request always wins
//! - dropping a `request()` future before it settles abandons it the same way
//!
//! State lives in a `tokio::sync::watch` channel: the session is its only
//! writer and observers can [`subscribe`](LocationSession::subscribe).

use crate::catalog::Catalog;
use crate::ranker::{rank, Ranking};
use crate::GeoCoordinate;
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info};

/// Default bound on a single acquisition.
pub const DEFAULT_ACQUISITION_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the session stands on knowing the user's location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum LocationState {
    /// Nothing requested yet
    Unknown,
    /// A request is in flight
    Acquiring,
    /// Location known
    Acquired(GeoCoordinate),
    /// The user or platform refused access
    Denied(String),
    /// No fix could be obtained, including timeouts and cancellation
    Unavailable,
}

impl LocationState {
    /// The acquired coordinate, if any.
    pub fn reference(&self) -> Option<GeoCoordinate> {
        match self {
            LocationState::Acquired(coord) => Some(*coord),
            _ => None,
        }
    }

    /// Returns true while a request is in flight.
    pub fn is_acquiring(&self) -> bool {
        matches!(self, LocationState::Acquiring)
    }
}

/// Failure reported by a provider, or a timeout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcquisitionError {
    /// Access refused
    #[error("Location permission denied: {0}")]
    PermissionDenied(String),

    /// No position available
    #[error("Location unavailable: {0}")]
    Unavailable(String),

    /// Provider did not answer in time
    #[error("Location request timed out after {0:?}")]
    Timeout(Duration),
}

impl AcquisitionError {
    fn to_state(&self) -> LocationState {
        match self {
            AcquisitionError::PermissionDenied(reason) => LocationState::Denied(reason.clone()),
            AcquisitionError::Unavailable(_) | AcquisitionError::Timeout(_) => {
                LocationState::Unavailable
            }
        }
    }
}

/// Outcome of [`LocationSession::request`] when no coordinate is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Another request is already in flight
    #[error("A location request is already in progress")]
    Pending,

    /// The request was cancelled or replaced before it finished
    #[error("Location request was superseded by a newer one")]
    Superseded,

    /// The provider failed
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),
}

/// Source of the user's current coordinate.
pub trait LocationProvider: Send + Sync {
    /// Resolves once with a coordinate or a typed failure.
    fn acquire(&self) -> impl Future<Output = Result<GeoCoordinate, AcquisitionError>> + Send;
}

/// Provider that always answers with the same coordinate.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub GeoCoordinate);

impl LocationProvider for FixedLocation {
    fn acquire(&self) -> impl Future<Output = Result<GeoCoordinate, AcquisitionError>> + Send {
        std::future::ready(Ok(self.0))
    }
}

/// Provider that always fails.
#[derive(Debug, Clone)]
pub struct NoLocation(pub AcquisitionError);

impl NoLocation {
    /// Fails with `PermissionDenied`.
    pub fn denied(reason: impl Into<String>) -> Self {
        Self(AcquisitionError::PermissionDenied(reason.into()))
    }

    /// Fails with `Unavailable`.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self(AcquisitionError::Unavailable(reason.into()))
    }
}

impl LocationProvider for NoLocation {
    fn acquire(&self) -> impl Future<Output = Result<GeoCoordinate, AcquisitionError>> + Send {
        std::future::ready(Err(self.0.clone()))
    }
}

/// Per-session location context.
pub struct LocationSession<P> {
    provider: P,
    timeout: Duration,
    state: watch::Sender<LocationState>,
    generation: AtomicU64,
}

impl<P: LocationProvider> LocationSession<P> {
    /// Creates a session with the default timeout.
    pub fn new(provider: P) -> Self {
        Self::with_timeout(provider, DEFAULT_ACQUISITION_TIMEOUT)
    }

    /// Creates a session with a custom timeout.
    pub fn with_timeout(provider: P, timeout: Duration) -> Self {
        let (state, _) = watch::channel(LocationState::Unknown);
        Self {
            provider,
            timeout,
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> LocationState {
        self.state.borrow().clone()
    }

    /// Observe state transitions.
    pub fn subscribe(&self) -> watch::Receiver<LocationState> {
        self.state.subscribe()
    }

    /// The acquired coordinate, if any.
    pub fn reference(&self) -> Option<GeoCoordinate> {
        self.state.borrow().reference()
    }

    /// Configured acquisition timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Ranks the catalog against the current state.
    pub fn rank(&self, catalog: &Catalog) -> Ranking {
        rank(self.reference().as_ref(), catalog.all())
    }

    /// Requests the current location.
    ///
    /// # Errors
    /// - [`RequestError::Pending`] if a request is already in flight
    /// - [`RequestError::Superseded`] if this request was cancelled meanwhile
    /// - [`RequestError::Acquisition`] if the provider failed or timed out
    pub async fn request(&self) -> Result<GeoCoordinate, RequestError> {
        let ticket = self.begin()?;
        let mut in_flight = InFlight {
            session: self,
            ticket: Some(ticket),
        };

        let outcome = match tokio::time::timeout(self.timeout, self.provider.acquire()).await {
            Ok(result) => result,
            Err(_) => Err(AcquisitionError::Timeout(self.timeout)),
        };

        in_flight.ticket = None;
        self.complete(ticket, outcome)
    }

    /// Abandons the in-flight request, leaving the state `Unavailable`.
    ///
    /// Returns false when nothing was in flight.
    pub fn cancel(&self) -> bool {
        let cancelled = self.state.send_if_modified(|state| {
            if !state.is_acquiring() {
                return false;
            }
            self.generation.fetch_add(1, Ordering::AcqRel);
            *state = LocationState::Unavailable;
            true
        });
        if cancelled {
            info!("Location request cancelled");
        }
        cancelled
    }

    fn begin(&self) -> Result<u64, RequestError> {
        let mut ticket = None;
        self.state.send_if_modified(|state| {
            if state.is_acquiring() {
                return false;
            }
            ticket = Some(self.generation.fetch_add(1, Ordering::AcqRel) + 1);
            *state = LocationState::Acquiring;
            true
        });

        match ticket {
            Some(ticket) => {
                debug!(ticket, timeout_ms = self.timeout.as_millis(), "Acquiring location");
                Ok(ticket)
            }
            None => {
                debug!("Rejecting location request, one is already pending");
                Err(RequestError::Pending)
            }
        }
    }

    fn complete(
        &self,
        ticket: u64,
        outcome: Result<GeoCoordinate, AcquisitionError>,
    ) -> Result<GeoCoordinate, RequestError> {
        let next = match &outcome {
            Ok(coord) => LocationState::Acquired(*coord),
            Err(e) => e.to_state(),
        };

        let applied = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::Acquire) != ticket {
                return false;
            }
            *state = next;
            true
        });

        if !applied {
            debug!(ticket, "Discarding stale location result");
            return Err(RequestError::Superseded);
        }

        match &outcome {
            Ok(coord) => info!(ticket, location = %coord, "Location acquired"),
            Err(e) => info!(ticket, error = %e, "Location acquisition failed"),
        }

        outcome.map_err(RequestError::from)
    }
}

impl<P> LocationSession<P> {
    /// Moves `Acquiring` to `Unavailable` if `ticket` is still the live request.
    fn abandon(&self, ticket: u64) {
        let abandoned = self.state.send_if_modified(|state| {
            if !state.is_acquiring() || self.generation.load(Ordering::Acquire) != ticket {
                return false;
            }
            self.generation.fetch_add(1, Ordering::AcqRel);
            *state = LocationState::Unavailable;
            true
        });
        if abandoned {
            info!(ticket, "Location request dropped before it settled");
        }
    }
}

/// Abandons the request it tracks unless disarmed before drop.
struct InFlight<'a, P> {
    session: &'a LocationSession<P>,
    ticket: Option<u64>,
}

impl<P> Drop for InFlight<'_, P> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            self.session.abandon(ticket);
        }
    }
}
