use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A place returned by the geocoding endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    /// ISO 3166 country code, e.g. "GB".
    pub country: String,
    /// Administrative region, when the provider knows one.
    #[serde(default)]
    pub state: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

/// Primary weather descriptor attached to every reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Group name, e.g. "Rain".
    pub main: String,
    /// Longer text, e.g. "light rain".
    pub description: String,
    /// Opaque icon identifier, e.g. "10d". See [`crate::icon::icon_url`].
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub temp_min: f64,
    pub temp_max: f64,
    pub wind_speed: f64,
    pub condition: Condition,
    pub observed_at: DateTime<Utc>,
}

/// One 3-hour forecast window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    /// Provider's textual timestamp, parsed as-is. No timezone is applied.
    pub local_time: NaiveDateTime,
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub condition: Condition,
}

impl ForecastSample {
    /// Calendar day this sample belongs to.
    pub fn date(&self) -> NaiveDate {
        self.local_time.date()
    }
}

/// City metadata sent alongside the forecast list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastCity {
    pub name: String,
    pub country: String,
    /// Shift from UTC in seconds.
    pub timezone: i32,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub samples: Vec<ForecastSample>,
    pub city: ForecastCity,
}

/// Per-day aggregate produced by [`crate::aggregate::summarize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Taken from the first sample of the day.
    pub condition: Condition,
    /// Taken from the first sample of the day.
    pub humidity: u8,
    /// Taken from the first sample of the day.
    pub wind_speed: f64,
}

/// Everything shown for a selected city after one fetch cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: City,
    pub current: CurrentConditions,
    pub forecast: Forecast,
    pub daily: Vec<DailySummary>,
}
