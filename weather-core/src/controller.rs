//! Interaction state for the city search box.
//!
//! `SearchController` owns one [`QueryState`] and drives it from user events:
//! typing (`on_query_changed`), picking a suggestion (`on_suggestion_selected`)
//! and submitting (`on_submit`). Client failures never propagate out of the
//! controller; they are logged, recorded in `last_error`, and the previously
//! displayed data stays as it was.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    condition::BackgroundKey,
    error::ClientError,
    model::{CityCandidate, WeatherReport},
    provider::WeatherApi,
};

/// Queries shorter than this (in characters) never hit the provider.
pub const MIN_SUGGESTION_CHARS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryState {
    pub text: String,
    pub suggestions: Vec<String>,
    pub current_report: Option<WeatherReport>,
    pub background: BackgroundKey,
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPhase {
    #[default]
    Idle,
    Typing,
    Suggesting,
    Resolved,
}

/// Handle for one outstanding suggestion request.
///
/// Only the most recently issued ticket may write suggestions; submitting or
/// shortening the query below the threshold retires every outstanding one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct SuggestionTicket {
    seq: u64,
    query: String,
}

impl SuggestionTicket {
    pub fn query(&self) -> &str {
        &self.query
    }
}

#[derive(Debug)]
pub struct SearchController<C> {
    client: C,
    state: QueryState,
    phase: SearchPhase,
    latest_ticket: u64,
}

impl<C: WeatherApi> SearchController<C> {
    pub fn new(client: C) -> Self {
        Self::with_state(client, QueryState::default())
    }

    pub fn with_state(client: C, state: QueryState) -> Self {
        let phase = if state.current_report.is_some() {
            SearchPhase::Resolved
        } else {
            SearchPhase::Idle
        };

        Self {
            client,
            state,
            phase,
            latest_ticket: 0,
        }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn into_state(self) -> QueryState {
        self.state
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn last_error(&self) -> Option<&str> {
        self.state.last_error.as_deref()
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// The query text changed: refresh suggestions if it is long enough.
    pub async fn on_query_changed(&mut self, text: impl Into<String>) {
        if let Some(ticket) = self.begin_suggestions(text) {
            let result = self.client.get_city_suggestions(ticket.query()).await;
            self.apply_suggestions(ticket, result);
        }
    }

    /// First half of `on_query_changed` for front ends that run requests
    /// concurrently. Returns `None` when no request should be made.
    pub fn begin_suggestions(&mut self, text: impl Into<String>) -> Option<SuggestionTicket> {
        self.state.text = text.into();
        self.state.last_error = None;

        if self.state.text.chars().count() < MIN_SUGGESTION_CHARS {
            self.retire_tickets();
            self.state.suggestions.clear();
            self.phase = if self.state.text.is_empty() && self.state.current_report.is_none() {
                SearchPhase::Idle
            } else {
                SearchPhase::Typing
            };
            return None;
        }

        self.latest_ticket += 1;
        self.phase = SearchPhase::Suggesting;
        Some(SuggestionTicket {
            seq: self.latest_ticket,
            query: self.state.text.clone(),
        })
    }

    /// Second half of `on_query_changed`. Returns `false` if the response was
    /// stale and therefore dropped.
    pub fn apply_suggestions(
        &mut self,
        ticket: SuggestionTicket,
        result: Result<Vec<CityCandidate>, ClientError>,
    ) -> bool {
        if ticket.seq != self.latest_ticket {
            debug!(
                query = %ticket.query,
                seq = ticket.seq,
                latest = self.latest_ticket,
                "dropping stale suggestion response"
            );
            return false;
        }

        match result {
            Ok(candidates) => {
                debug!(query = %ticket.query, count = candidates.len(), "suggestions updated");
                self.state.suggestions = candidates.iter().map(CityCandidate::display_name).collect();
                self.state.last_error = None;
            }
            Err(err) => {
                warn!(query = %ticket.query, error = %err, "error fetching city suggestions");
                self.state.last_error = Some(err.to_string());
            }
        }
        true
    }

    /// A suggestion was picked from the list.
    pub async fn on_suggestion_selected(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.state.text.clone_from(&name);
        self.state.suggestions.clear();
        self.on_submit(name).await;
    }

    /// Submit whatever is currently typed.
    pub async fn submit_current(&mut self) {
        let city = self.state.text.clone();
        self.on_submit(city).await;
    }

    /// Fetch the weather for `city` and, on success, make it the current report.
    pub async fn on_submit(&mut self, city: impl Into<String>) {
        self.retire_tickets();
        self.state.suggestions.clear();
        self.state.last_error = None;
        self.state.text = city.into();

        match self.client.get_weather(&self.state.text).await {
            Ok(report) => {
                let background = BackgroundKey::from_condition(report.condition_main.as_deref());
                info!(
                    city = %self.state.text,
                    location = %report.location_name,
                    %background,
                    "weather updated"
                );
                self.state.background = background;
                self.state.current_report = Some(report);
                self.phase = SearchPhase::Resolved;
            }
            Err(err) => {
                warn!(city = %self.state.text, error = %err, "error fetching weather data");
                self.state.last_error = Some(err.to_string());
            }
        }
    }

    fn retire_tickets(&mut self) {
        self.latest_ticket += 1;
    }
}
