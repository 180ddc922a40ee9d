//! Day bucketing of the 3-hour forecast list.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::model::{DailySummary, ForecastSample};

/// Collapse an ordered list of forecast samples into one summary per calendar day.
///
/// Days come out in the order they are first seen; the input is never re-sorted.
/// Only `temp_min`/`temp_max` are aggregated. Condition, humidity and wind stay
/// pinned to the first sample of each day.
pub fn summarize(samples: &[ForecastSample]) -> Vec<DailySummary> {
    let mut days: Vec<DailySummary> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for sample in samples {
        let date = sample.date();

        match index.get(&date) {
            Some(&i) => {
                let day = &mut days[i];
                day.temp_min = day.temp_min.min(sample.temp_min);
                day.temp_max = day.temp_max.max(sample.temp_max);
            }
            None => {
                index.insert(date, days.len());
                days.push(DailySummary {
                    date,
                    temp_min: sample.temp_min,
                    temp_max: sample.temp_max,
                    condition: sample.condition.clone(),
                    humidity: sample.humidity,
                    wind_speed: sample.wind_speed,
                });
            }
        }
    }

    days
}
