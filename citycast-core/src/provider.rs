use crate::{
    Config,
    error::WeatherError,
    model::{City, CurrentConditions, Forecast},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// The three provider endpoints the client needs.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Resolve a free-text place name into at most `limit` candidate cities.
    async fn search_cities(&self, query: &str, limit: u8) -> Result<Vec<City>, WeatherError>;

    /// Current conditions at the given coordinates, metric units.
    async fn current(&self, lat: f64, lon: f64) -> Result<CurrentConditions, WeatherError>;

    /// 5-day / 3-hour forecast at the given coordinates, metric units.
    async fn forecast(&self, lat: f64, lon: f64) -> Result<Forecast, WeatherError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.resolved_api_key()?;
    let provider = OpenWeatherProvider::new(api_key, config)?;

    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_works_when_key_is_stored() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        let provider = provider_from_config(&cfg);
        assert!(provider.is_ok());
    }
}
