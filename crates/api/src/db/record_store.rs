use serde::Deserialize;
use time::Date;

use super::Error;

/// One row of the measurement table.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub station: String,
    pub date: Date,
    pub precipitation: Option<f64>,
    pub temperature: Option<f64>,
}

/// One row of the station table. Everything but the identifier is optional metadata.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Station {
    pub station: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

/// Read-only view over the measurement dataset.
///
/// Implementations are immutable once built, so they can be shared between
/// request handlers without any locking.
pub trait RecordStore: Send + Sync {
    /// All measurements in the order they were loaded.
    fn all_measurements(&self) -> &[Measurement];

    /// All stations in the order they were loaded, duplicates included.
    fn all_stations(&self) -> &[Station];

    /// Latest measurement date, or [`Error::EmptyDataset`] when there are no measurements.
    fn most_recent_date(&self) -> Result<Date, Error>;
}

/// In-memory snapshot of the dataset.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    measurements: Vec<Measurement>,
    stations: Vec<Station>,
    most_recent: Option<Date>,
}

impl MemoryStore {
    pub fn new(measurements: Vec<Measurement>, stations: Vec<Station>) -> Self {
        // the snapshot never changes, so the latest date only needs computing once
        let most_recent = measurements.iter().map(|m| m.date).max();
        Self {
            measurements,
            stations,
            most_recent,
        }
    }
}

impl RecordStore for MemoryStore {
    fn all_measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    fn all_stations(&self) -> &[Station] {
        &self.stations
    }

    fn most_recent_date(&self) -> Result<Date, Error> {
        self.most_recent.ok_or(Error::EmptyDataset)
    }
}
