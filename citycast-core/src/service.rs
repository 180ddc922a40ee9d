//! Fetch orchestration on top of a [`WeatherProvider`].

use tracing::{error, info, warn};

use crate::{
    aggregate::summarize,
    error::WeatherError,
    model::{City, WeatherReport},
    provider::WeatherProvider,
    state::{AppState, Event, reduce},
};

/// Geocode a query. Failures are logged and reported as "no candidates".
pub async fn search(provider: &dyn WeatherProvider, query: &str, limit: u8) -> Vec<City> {
    logged_search(provider, query, limit).await.unwrap_or_default()
}

async fn logged_search(
    provider: &dyn WeatherProvider,
    query: &str,
    limit: u8,
) -> Result<Vec<City>, WeatherError> {
    provider
        .search_cities(query, limit)
        .await
        .inspect_err(|err| warn!(error = %err, query, "city search failed"))
}

/// Fetch current conditions and forecast concurrently; both must succeed.
pub async fn fetch_weather(
    provider: &dyn WeatherProvider,
    city: &City,
) -> Result<WeatherReport, WeatherError> {
    let (current, forecast) = tokio::try_join!(
        provider.current(city.lat, city.lon),
        provider.forecast(city.lat, city.lon),
    )?;

    let daily = summarize(&forecast.samples);
    info!(city = %city.name, days = daily.len(), "weather loaded");

    Ok(WeatherReport {
        city: city.clone(),
        current,
        forecast,
        daily,
    })
}

/// Drives [`AppState`] through user actions.
#[derive(Debug)]
pub struct Session {
    provider: Box<dyn WeatherProvider>,
    search_limit: u8,
    state: AppState,
}

impl Session {
    pub fn new(provider: Box<dyn WeatherProvider>, search_limit: u8) -> Self {
        Self {
            provider,
            search_limit,
            state: AppState::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn apply(&mut self, event: Event) {
        self.state = reduce(std::mem::take(&mut self.state), event);
    }

    /// Update the query and load matching candidates.
    pub async fn search(&mut self, query: &str) -> &AppState {
        self.apply(Event::QueryChanged(query.to_string()));
        if query.trim().is_empty() {
            return &self.state;
        }

        let event = match logged_search(self.provider.as_ref(), query, self.search_limit).await {
            Ok(cities) => Event::CandidatesLoaded(cities),
            Err(_) => Event::SearchFailed,
        };
        self.apply(event);

        &self.state
    }

    /// Select a city and load its weather.
    pub async fn select(&mut self, city: City) -> &AppState {
        self.apply(Event::CitySelected(city));
        self.load().await;
        &self.state
    }

    /// Re-fetch weather for the selected city, if any.
    pub async fn refresh(&mut self) -> &AppState {
        self.apply(Event::RefreshRequested);
        self.load().await;
        &self.state
    }

    async fn load(&mut self) {
        let Some(city) = self.state.selected.clone().filter(|_| self.state.needs_fetch()) else {
            return;
        };

        let event = match fetch_weather(self.provider.as_ref(), &city).await {
            Ok(report) => Event::WeatherLoaded(report),
            Err(err) => {
                error!(error = %err, city = %city.name, "weather fetch failed");
                Event::WeatherFailed
            }
        };
        self.apply(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, CurrentConditions, Forecast, ForecastCity, ForecastSample};
    use crate::state::GENERIC_ERROR;
    use async_trait::async_trait;
    use chrono::{NaiveDateTime, TimeZone, Utc};

    /// Canned responses; `fail_*` switches an endpoint to a 500.
    #[derive(Debug, Default)]
    struct StubProvider {
        fail_search: bool,
        fail_current: bool,
        fail_forecast: bool,
    }

    fn server_error(endpoint: &'static str) -> WeatherError {
        WeatherError::Status {
            endpoint,
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".into(),
        }
    }

    fn condition(icon: &str) -> Condition {
        Condition {
            main: "Clear".into(),
            description: "clear sky".into(),
            icon: icon.into(),
        }
    }

    fn sample(at: &str, min: f64, max: f64) -> ForecastSample {
        let local_time = NaiveDateTime::parse_from_str(at, "%Y-%m-%d %H:%M:%S").unwrap();
        ForecastSample {
            timestamp: Utc.from_utc_datetime(&local_time),
            local_time,
            temp: min,
            temp_min: min,
            temp_max: max,
            humidity: 50,
            wind_speed: 2.0,
            condition: condition("01d"),
        }
    }

    fn paris() -> City {
        City {
            name: "Paris".into(),
            country: "FR".into(),
            state: Some("Ile-de-France".into()),
            lat: 48.8589,
            lon: 2.32,
        }
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn search_cities(&self, query: &str, _limit: u8) -> Result<Vec<City>, WeatherError> {
            if self.fail_search {
                return Err(server_error("geocoding"));
            }
            Ok(if query.starts_with("Par") { vec![paris()] } else { Vec::new() })
        }

        async fn current(&self, _lat: f64, _lon: f64) -> Result<CurrentConditions, WeatherError> {
            if self.fail_current {
                return Err(server_error("current weather"));
            }
            Ok(CurrentConditions {
                temp: 18.0,
                feels_like: 17.5,
                humidity: 60,
                temp_min: 16.0,
                temp_max: 20.0,
                wind_speed: 3.0,
                condition: condition("01d"),
                observed_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            })
        }

        async fn forecast(&self, _lat: f64, _lon: f64) -> Result<Forecast, WeatherError> {
            if self.fail_forecast {
                return Err(server_error("forecast"));
            }
            Ok(Forecast {
                samples: vec![
                    sample("2024-05-01 12:00:00", 15.0, 19.0),
                    sample("2024-05-01 15:00:00", 16.0, 21.0),
                    sample("2024-05-02 00:00:00", 9.0, 11.0),
                ],
                city: ForecastCity {
                    name: "Paris".into(),
                    country: "FR".into(),
                    timezone: 7200,
                    sunrise: None,
                    sunset: None,
                },
            })
        }
    }

    #[tokio::test]
    async fn fetch_weather_joins_both_and_summarizes() {
        let report = fetch_weather(&StubProvider::default(), &paris()).await.unwrap();

        assert_eq!(report.city, paris());
        assert_eq!(report.current.temp, 18.0);
        assert_eq!(report.daily.len(), 2);
        assert_eq!((report.daily[0].temp_min, report.daily[0].temp_max), (15.0, 21.0));
    }

    #[tokio::test]
    async fn fetch_weather_fails_when_either_request_fails() {
        let current_down = StubProvider { fail_current: true, ..Default::default() };
        let forecast_down = StubProvider { fail_forecast: true, ..Default::default() };

        assert!(fetch_weather(&current_down, &paris()).await.is_err());
        assert!(fetch_weather(&forecast_down, &paris()).await.is_err());
    }

    #[tokio::test]
    async fn search_swallows_errors() {
        let provider = StubProvider { fail_search: true, ..Default::default() };
        assert!(search(&provider, "Paris", 5).await.is_empty());
    }

    #[tokio::test]
    async fn session_search_then_select() {
        let mut session = Session::new(Box::new(StubProvider::default()), 5);

        let state = session.search("Par").await;
        assert_eq!(state.candidates, vec![paris()]);

        let state = session.select(paris()).await;
        assert!(!state.loading);
        assert!(state.candidates.is_empty());
        assert_eq!(state.weather.as_ref().map(|w| w.daily.len()), Some(2));
    }

    #[tokio::test]
    async fn session_failure_clears_weather() {
        let mut session = Session::new(
            Box::new(StubProvider { fail_forecast: true, ..Default::default() }),
            5,
        );

        let state = session.select(paris()).await;

        assert_eq!(state.weather, None);
        assert_eq!(state.error.as_deref(), Some(GENERIC_ERROR));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn session_search_failure_shows_no_error() {
        let mut session =
            Session::new(Box::new(StubProvider { fail_search: true, ..Default::default() }), 5);

        let state = session.search("Paris").await;

        assert!(state.candidates.is_empty());
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn refresh_without_selection_does_nothing() {
        let mut session = Session::new(Box::new(StubProvider::default()), 5);
        assert_eq!(session.refresh().await, &AppState::default());
    }
}
