use thiserror::Error;

/// Failures at the provider boundary.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(
        "No OpenWeather API key configured.\n\
         Hint: run `citycast configure` or set OPENWEATHER_API_KEY."
    )]
    MissingApiKey,

    #[error("Request to OpenWeather failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("OpenWeather {endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse OpenWeather {endpoint} response: {source}")]
    Parse {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("OpenWeather {endpoint} response is missing {what}")]
    Incomplete {
        endpoint: &'static str,
        what: &'static str,
    },
}
