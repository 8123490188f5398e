//! Widget state and the controller that owns it.
//!
//! Input changes go through [`WeatherController::set_query`], which hands back
//! a [`LookupTicket`] when a lookup should run. Results come back through
//! [`WeatherController::apply`] tagged with the ticket's sequence number.
//! The `*_session` variants do the same against a [`SessionStore`].

use funcy_core::StalePolicy;

use crate::pipeline::LookupOutcome;
use crate::session::SessionStore;
use crate::types::{ForecastSet, Place, Query};

/// Everything the widget displays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetState {
    pub query: String,
    pub loading: bool,
    pub place: Option<Place>,
    pub forecast: Option<ForecastSet>,
}

impl WidgetState {
    fn clear_display(&mut self) {
        self.place = None;
        self.forecast = None;
    }
}

/// Permission to run one lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub seq: u64,
    pub query: Query,
}

/// A settled lookup, routed back to the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupResult {
    pub seq: u64,
    pub query: Query,
    pub outcome: LookupOutcome,
}

/// What [`WeatherController::apply`] did with a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// A newer lookup was issued after this one; state untouched.
    Stale,
    /// State updated; nothing to persist.
    Updated,
    /// State updated with a full resolution; the query should be persisted.
    Persist(String),
}

#[derive(Debug, Default)]
pub struct WeatherController {
    state: WidgetState,
    policy: StalePolicy,
    latest_seq: u64,
}

impl WeatherController {
    pub fn new(policy: StalePolicy) -> Self {
        Self {
            state: WidgetState::default(),
            policy,
            latest_seq: 0,
        }
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Record a new input value.
    ///
    /// Short input clears the display and issues nothing. Otherwise a new
    /// sequence number is allocated and the state enters loading.
    pub fn set_query(&mut self, raw: impl Into<String>) -> Option<LookupTicket> {
        let raw = raw.into();
        let query = Query::parse(&raw);
        self.state.query = raw;

        let Some(query) = query else {
            tracing::debug!("Query too short, clearing display");
            self.state.clear_display();
            if self.policy == StalePolicy::Discard {
                // In-flight lookups belong to older input now.
                self.latest_seq += 1;
                self.state.loading = false;
            }
            return None;
        };

        self.latest_seq += 1;
        self.state.loading = true;
        tracing::debug!("Issuing lookup #{} for {:?}", self.latest_seq, query.as_str());

        Some(LookupTicket {
            seq: self.latest_seq,
            query,
        })
    }

    pub fn apply(&mut self, result: LookupResult) -> Applied {
        if self.policy == StalePolicy::Discard && result.seq < self.latest_seq {
            tracing::debug!(
                "Dropping stale lookup #{} (latest is #{})",
                result.seq,
                self.latest_seq
            );
            return Applied::Stale;
        }

        self.state.loading = false;

        match result.outcome {
            LookupOutcome::Resolved { place, forecast } => {
                self.state.place = Some(place);
                self.state.forecast = Some(forecast);
                Applied::Persist(result.query.as_str().to_string())
            }
            LookupOutcome::ForecastUnavailable { place } => {
                self.state.place = Some(place);
                self.state.forecast = None;
                Applied::Updated
            }
            LookupOutcome::Failed => {
                self.state.clear_display();
                Applied::Updated
            }
        }
    }

    /// [`apply`](Self::apply), then store the query if it fully resolved.
    ///
    /// A failed write is logged; the display is updated either way.
    pub fn apply_with_session(&mut self, result: LookupResult, store: &SessionStore) -> Applied {
        let applied = self.apply(result);
        if let Applied::Persist(location) = &applied {
            if let Err(e) = store.save(location) {
                tracing::error!("Failed to persist location: {:#}", e);
            }
        }
        applied
    }

    /// Replay the stored location as input, as if it had just been typed.
    pub fn restore_session(&mut self, store: &SessionStore) -> Option<LookupTicket> {
        let saved = store.load()?;
        tracing::info!("Restoring last location {:?}", saved);
        self.set_query(saved)
    }
}
