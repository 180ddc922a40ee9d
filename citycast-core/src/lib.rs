//! Core library for the `citycast` weather client.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider (geocoding, current weather, forecast)
//! - Shared domain models and the per-day forecast aggregation
//! - Client state transitions and fetch orchestration
//!
//! It is used by `citycast-cli`, but can also be reused by other front ends.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod format;
pub mod icon;
pub mod model;
pub mod provider;
pub mod service;
pub mod state;

pub use aggregate::summarize;
pub use config::Config;
pub use error::WeatherError;
pub use model::{
    City, Condition, CurrentConditions, DailySummary, Forecast, ForecastCity, ForecastSample,
    WeatherReport,
};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use service::{Session, fetch_weather, search};
pub use state::{AppState, Event, reduce};
