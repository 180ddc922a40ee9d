use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use tracing::{debug, instrument};

use crate::{
    Config,
    error::WeatherError,
    model::{City, Condition, CurrentConditions, Forecast, ForecastCity, ForecastSample},
};

use super::WeatherProvider;

/// Layout of the forecast list's `dt_txt` field.
const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const UNITS: &str = "metric";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    geo_base_url: String,
    data_base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, config: &Config) -> Result<Self, WeatherError> {
        if api_key.trim().is_empty() {
            return Err(WeatherError::MissingApiKey);
        }

        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            api_key,
            geo_base_url: config.geo_base_url.trim_end_matches('/').to_string(),
            data_base_url: config.data_base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        debug!(endpoint, url, "sending OpenWeather request");

        let res = self
            .http
            .get(url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| WeatherError::Parse { endpoint, source })
    }

    fn coordinates(lat: f64, lon: f64) -> [(&'static str, String); 3] {
        [
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("units", UNITS.to_string()),
        ]
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self))]
    async fn search_cities(&self, query: &str, limit: u8) -> Result<Vec<City>, WeatherError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/geo/1.0/direct", self.geo_base_url);
        let cities: Vec<City> = self
            .get_json(
                "geocoding",
                &url,
                &[("q", query.to_string()), ("limit", limit.to_string())],
            )
            .await?;

        debug!(count = cities.len(), "geocoding returned candidates");
        Ok(cities)
    }

    #[instrument(skip(self))]
    async fn current(&self, lat: f64, lon: f64) -> Result<CurrentConditions, WeatherError> {
        let url = format!("{}/data/2.5/weather", self.data_base_url);
        let parsed: OwCurrentResponse = self
            .get_json("current weather", &url, &Self::coordinates(lat, lon))
            .await?;

        let condition = parsed.weather.into_iter().next().ok_or(WeatherError::Incomplete {
            endpoint: "current weather",
            what: "weather conditions",
        })?;

        Ok(CurrentConditions {
            temp: parsed.main.temp,
            feels_like: parsed.main.feels_like,
            humidity: parsed.main.humidity,
            temp_min: parsed.main.temp_min,
            temp_max: parsed.main.temp_max,
            wind_speed: parsed.wind.speed,
            condition,
            observed_at: parsed.dt,
        })
    }

    #[instrument(skip(self))]
    async fn forecast(&self, lat: f64, lon: f64) -> Result<Forecast, WeatherError> {
        let url = format!("{}/data/2.5/forecast", self.data_base_url);
        let parsed: OwForecastResponse = self
            .get_json("forecast", &url, &Self::coordinates(lat, lon))
            .await?;

        let samples = parsed
            .list
            .into_iter()
            .map(|entry| -> Result<ForecastSample, WeatherError> {
                let condition = entry.weather.into_iter().next().ok_or(WeatherError::Incomplete {
                    endpoint: "forecast",
                    what: "weather conditions for a forecast entry",
                })?;

                Ok(ForecastSample {
                    timestamp: entry.dt,
                    local_time: entry.dt_txt,
                    temp: entry.main.temp,
                    temp_min: entry.main.temp_min,
                    temp_max: entry.main.temp_max,
                    humidity: entry.main.humidity,
                    wind_speed: entry.wind.speed,
                    condition,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(samples = samples.len(), "forecast received");

        Ok(Forecast {
            samples,
            city: ForecastCity {
                name: parsed.city.name,
                country: parsed.city.country,
                timezone: parsed.city.timezone,
                sunrise: parsed.city.sunrise,
                sunset: parsed.city.sunset,
            },
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(with = "chrono::serde::ts_seconds")]
    dt: DateTime<Utc>,
    main: OwMain,
    weather: Vec<Condition>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    #[serde(with = "chrono::serde::ts_seconds")]
    dt: DateTime<Utc>,
    main: OwMain,
    weather: Vec<Condition>,
    wind: OwWind,
    #[serde(deserialize_with = "deserialize_dt_txt")]
    dt_txt: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
struct OwForecastCity {
    name: String,
    country: String,
    #[serde(default)]
    timezone: i32,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    sunrise: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    sunset: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwForecastCity,
    list: Vec<OwForecastEntry>,
}

fn deserialize_dt_txt<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, DT_TXT_FORMAT).map_err(serde::de::Error::custom)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
