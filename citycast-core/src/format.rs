//! Human-readable rendering of model values.

use chrono::NaiveDate;

use crate::model::City;

/// "London, England, GB"; the region is skipped when the provider has none.
pub fn city_label(city: &City) -> String {
    match city.state.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(state) => format!("{}, {}, {}", city.name, state, city.country),
        None => format!("{}, {}", city.name, city.country),
    }
}

/// Rounded Celsius reading, e.g. "21°C".
pub fn temperature(celsius: f64) -> String {
    let rounded = celsius.round();
    // avoid "-0°C"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.0}°C")
}

pub fn wind(speed_mps: f64) -> String {
    format!("{speed_mps:.1} m/s")
}

/// "Mon, Jan 1"
pub fn weekday_label(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// Upper-case the first letter of every word: "light rain" -> "Light Rain".
pub fn capitalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;

    for ch in text.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = ch.is_whitespace();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(state: Option<&str>) -> City {
        City {
            name: "London".into(),
            country: "GB".into(),
            state: state.map(str::to_string),
            lat: 51.5073,
            lon: -0.1276,
        }
    }

    #[test]
    fn city_label_with_and_without_state() {
        assert_eq!(city_label(&city(Some("England"))), "London, England, GB");
        assert_eq!(city_label(&city(None)), "London, GB");
        assert_eq!(city_label(&city(Some(""))), "London, GB");
    }

    #[test]
    fn temperature_rounds_and_hides_negative_zero() {
        assert_eq!(temperature(21.49), "21°C");
        assert_eq!(temperature(-3.6), "-4°C");
        assert_eq!(temperature(-0.3), "0°C");
    }

    #[test]
    fn weekday_label_is_short_form() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        assert_eq!(weekday_label(date), "Mon, Jan 1");
    }

    #[test]
    fn capitalize_each_word() {
        assert_eq!(capitalize("light rain"), "Light Rain");
        assert_eq!(capitalize("overcast clouds"), "Overcast Clouds");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn wind_has_one_decimal() {
        assert_eq!(wind(3.61), "3.6 m/s");
    }
}
