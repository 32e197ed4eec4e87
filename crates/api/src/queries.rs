//! Filtered reads and aggregates over a [`RecordStore`].
//!
//! Every function here is a pure read of the snapshot. Windows are expected to
//! be validated already; an empty match is a normal result, never an error.

use serde::Serialize;
use std::collections::HashMap;
use time::Date;
use utoipa::ToSchema;

use crate::{
    date_window::{serialize_date, DateWindow},
    db::{Measurement, RecordStore},
};

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PrecipitationReading {
    #[serde(serialize_with = "serialize_date")]
    #[schema(value_type = String, example = "2017-08-23")]
    pub date: Date,
    pub prcp: Option<f64>,
}

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct TemperatureReading {
    #[serde(serialize_with = "serialize_date")]
    #[schema(value_type = String, example = "2017-08-23")]
    pub date: Date,
    pub tobs: Option<f64>,
}

/// Minimum, mean and maximum temperature. All fields are null when nothing matched.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Default, ToSchema)]
pub struct TemperatureSummary {
    #[serde(rename = "TMIN")]
    pub minimum: Option<f64>,
    #[serde(rename = "TAVG")]
    pub average: Option<f64>,
    #[serde(rename = "TMAX")]
    pub maximum: Option<f64>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct StationActivity {
    pub station: String,
    pub observations: usize,
}

fn matching<'a>(
    store: &'a dyn RecordStore,
    window: &'a DateWindow,
    station: Option<&'a str>,
) -> impl Iterator<Item = &'a Measurement> + 'a {
    store.all_measurements().iter().filter(move |m| {
        window.contains(m.date) && station.map_or(true, |id| m.station == id)
    })
}

/// Precipitation for every measurement in `window`, in store order.
pub fn precipitation_series(
    store: &dyn RecordStore,
    window: &DateWindow,
) -> Vec<PrecipitationReading> {
    matching(store, window, None)
        .map(|m| PrecipitationReading {
            date: m.date,
            prcp: m.precipitation,
        })
        .collect()
}

/// Station identifiers in store order. Duplicates in the source are kept.
pub fn station_list(store: &dyn RecordStore) -> Vec<String> {
    store
        .all_stations()
        .iter()
        .map(|s| s.station.clone())
        .collect()
}

pub fn temperature_series(
    store: &dyn RecordStore,
    window: &DateWindow,
    station: Option<&str>,
) -> Vec<TemperatureReading> {
    matching(store, window, station)
        .map(|m| TemperatureReading {
            date: m.date,
            tobs: m.temperature,
        })
        .collect()
}

/// Min, mean and max of the present temperatures in `window`. Missing values are skipped.
pub fn temperature_aggregate(
    store: &dyn RecordStore,
    window: &DateWindow,
    station: Option<&str>,
) -> TemperatureSummary {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut minimum: Option<f64> = None;
    let mut maximum: Option<f64> = None;

    for value in matching(store, window, station).filter_map(|m| m.temperature) {
        count += 1;
        sum += value;
        minimum = Some(minimum.map_or(value, |current| min_total(current, value)));
        maximum = Some(maximum.map_or(value, |current| max_total(current, value)));
    }

    if count == 0 {
        return TemperatureSummary::default();
    }

    TemperatureSummary {
        minimum,
        average: Some(sum / count as f64),
        maximum,
    }
}

/// Measurement counts per station, busiest first. Ties keep first-seen order.
pub fn station_activity(store: &dyn RecordStore) -> Vec<StationActivity> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut activity: Vec<StationActivity> = Vec::new();

    for measurement in store.all_measurements() {
        match index.get(measurement.station.as_str()) {
            Some(&position) => activity[position].observations += 1,
            None => {
                index.insert(measurement.station.as_str(), activity.len());
                activity.push(StationActivity {
                    station: measurement.station.clone(),
                    observations: 1,
                });
            }
        }
    }

    // stable sort keeps first-seen order for equal counts
    activity.sort_by(|a, b| b.observations.cmp(&a.observations));
    activity
}

fn min_total(a: f64, b: f64) -> f64 {
    if b.total_cmp(&a).is_lt() {
        b
    } else {
        a
    }
}

fn max_total(a: f64, b: f64) -> f64 {
    if b.total_cmp(&a).is_gt() {
        b
    } else {
        a
    }
}
