//! Client state as plain data plus a pure transition function.

use serde::Serialize;

use crate::model::{City, WeatherReport};

/// Message shown for any weather fetch failure. The cause is only logged.
pub const GENERIC_ERROR: &str = "Could not load weather data. Please try again.";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppState {
    pub query: String,
    pub candidates: Vec<City>,
    pub selected: Option<City>,
    pub weather: Option<WeatherReport>,
    pub loading: bool,
    pub error: Option<String>,
}

impl AppState {
    /// A weather fetch for the selected city is pending.
    pub fn needs_fetch(&self) -> bool {
        self.loading && self.selected.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    QueryChanged(String),
    CandidatesLoaded(Vec<City>),
    SearchFailed,
    CitySelected(City),
    RefreshRequested,
    WeatherLoaded(WeatherReport),
    WeatherFailed,
}

/// Compute the next state. Fields are replaced, never merged.
///
/// Search results are applied in arrival order; a late response for an older
/// query simply overwrites the list.
pub fn reduce(state: AppState, event: Event) -> AppState {
    match event {
        Event::QueryChanged(query) => {
            let candidates = if query.trim().is_empty() { Vec::new() } else { state.candidates };
            AppState { query, candidates, ..state }
        }
        Event::CandidatesLoaded(candidates) => AppState { candidates, ..state },
        Event::SearchFailed => AppState { candidates: Vec::new(), ..state },
        Event::CitySelected(city) => AppState {
            query: String::new(),
            candidates: Vec::new(),
            selected: Some(city),
            loading: true,
            error: None,
            ..state
        },
        Event::RefreshRequested if state.selected.is_some() => {
            AppState { loading: true, error: None, ..state }
        }
        Event::RefreshRequested => state,
        Event::WeatherLoaded(report) => AppState {
            weather: Some(report),
            loading: false,
            error: None,
            ..state
        },
        Event::WeatherFailed => AppState {
            weather: None,
            loading: false,
            error: Some(GENERIC_ERROR.to_string()),
            ..state
        },
    }
}
