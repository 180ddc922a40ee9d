use std::fmt::{self, Write};

use chrono::Local;
use citycast_core::{
    WeatherReport, format,
    icon::{IconSize, icon_url},
};

/// Plain-text rendering of a report.
pub fn report(report: &WeatherReport, icon_base_url: &str) -> String {
    let mut out = String::new();
    write_report(&mut out, report, icon_base_url).map(|()| out).unwrap_or_default()
}

fn write_report(out: &mut impl Write, report: &WeatherReport, icon_base_url: &str) -> fmt::Result {
    let current = &report.current;

    writeln!(out, "{}", format::city_label(&report.city))?;
    writeln!(
        out,
        "  {}  {} (feels like {})",
        format::capitalize(&current.condition.description),
        format::temperature(current.temp),
        format::temperature(current.feels_like),
    )?;
    writeln!(
        out,
        "  H {} / L {}  humidity {}%  wind {}",
        format::temperature(current.temp_max),
        format::temperature(current.temp_min),
        current.humidity,
        format::wind(current.wind_speed),
    )?;
    writeln!(
        out,
        "  updated {}  {}",
        current.observed_at.with_timezone(&Local).format("%H:%M"),
        icon_url(icon_base_url, &current.condition.icon, IconSize::Double),
    )?;

    if !report.daily.is_empty() {
        writeln!(out)?;
        writeln!(out, "Forecast")?;
    }
    for day in &report.daily {
        writeln!(
            out,
            "  {:<12} {:>6} / {:<6} {:<18} {:>3}%  {:>8}  {}",
            format::weekday_label(day.date),
            format::temperature(day.temp_max),
            format::temperature(day.temp_min),
            format::capitalize(&day.condition.description),
            day.humidity,
            format::wind(day.wind_speed),
            icon_url(icon_base_url, &day.condition.icon, IconSize::Double),
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use citycast_core::{
        City, Condition, CurrentConditions, DailySummary, Forecast, ForecastCity,
        icon::DEFAULT_ICON_BASE_URL,
    };

    fn condition(description: &str, icon: &str) -> Condition {
        Condition {
            main: "Rain".into(),
            description: description.into(),
            icon: icon.into(),
        }
    }

    fn sample_report() -> WeatherReport {
        WeatherReport {
            city: City {
                name: "Oslo".into(),
                country: "NO".into(),
                state: None,
                lat: 59.91,
                lon: 10.75,
            },
            current: CurrentConditions {
                temp: -2.4,
                feels_like: -6.1,
                humidity: 85,
                temp_min: -3.0,
                temp_max: -1.2,
                wind_speed: 4.26,
                condition: condition("light snow", "13d"),
                observed_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            },
            forecast: Forecast {
                samples: Vec::new(),
                city: ForecastCity {
                    name: "Oslo".into(),
                    country: "NO".into(),
                    timezone: 3600,
                    sunrise: None,
                    sunset: None,
                },
            },
            daily: vec![DailySummary {
                date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                temp_min: -5.0,
                temp_max: 0.4,
                condition: condition("snow", "13n"),
                humidity: 90,
                wind_speed: 2.0,
            }],
        }
    }

    #[test]
    fn renders_current_and_daily_rows() {
        let text = report(&sample_report(), DEFAULT_ICON_BASE_URL);

        assert!(text.starts_with("Oslo, NO\n"));
        assert!(text.contains("Light Snow  -2°C (feels like -6°C)"));
        assert!(text.contains("humidity 85%  wind 4.3 m/s"));
        assert!(text.contains("Tue, Jan 2"));
        assert!(text.contains("https://openweathermap.org/img/wn/13n@2x.png"));
    }

    #[test]
    fn no_forecast_section_without_days() {
        let mut r = sample_report();
        r.daily.clear();

        assert!(!report(&r, DEFAULT_ICON_BASE_URL).contains("Forecast"));
    }
}
