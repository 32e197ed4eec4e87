use async_trait::async_trait;
use log::info;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use time::Date;

use super::{DatasetSource, Error, Measurement, MemoryStore, Station};
use crate::date_window::DATE_FORMAT;

pub const MEASUREMENTS_CSV: &str = "hawaii_measurements.csv";
pub const STATIONS_CSV: &str = "hawaii_stations.csv";

#[derive(Deserialize)]
struct MeasurementRow {
    station: String,
    date: String,
    prcp: Option<f64>,
    tobs: Option<f64>,
}

impl TryFrom<MeasurementRow> for Measurement {
    type Error = Error;

    fn try_from(row: MeasurementRow) -> Result<Self, Self::Error> {
        let date = Date::parse(&row.date, DATE_FORMAT).map_err(|source| Error::InvalidDate {
            station: row.station.clone(),
            value: row.date.clone(),
            source,
        })?;
        Ok(Measurement {
            station: row.station,
            date,
            precipitation: row.prcp,
            temperature: row.tobs,
        })
    }
}

/// Directory export of the dataset: `hawaii_measurements.csv` next to `hawaii_stations.csv`.
/// Empty cells are read as missing values.
pub struct CsvDataset {
    dir: PathBuf,
}

impl CsvDataset {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    fn read(dir: &Path) -> Result<MemoryStore, Error> {
        let measurements_path = dir.join(MEASUREMENTS_CSV);
        let stations_path = dir.join(STATIONS_CSV);
        for path in [&measurements_path, &stations_path] {
            if !path.is_file() {
                return Err(Error::NotFound(path.display().to_string()));
            }
        }

        let measurements = csv::Reader::from_path(&measurements_path)?
            .deserialize::<MeasurementRow>()
            .map(|row| Measurement::try_from(row?))
            .collect::<Result<Vec<_>, Error>>()?;

        let stations = csv::Reader::from_path(&stations_path)?
            .deserialize::<Station>()
            .collect::<Result<Vec<_>, csv::Error>>()?;

        info!(
            "loaded {} measurements and {} stations from {}",
            measurements.len(),
            stations.len(),
            dir.display()
        );
        Ok(MemoryStore::new(measurements, stations))
    }
}

#[async_trait]
impl DatasetSource for CsvDataset {
    async fn load(&self) -> Result<MemoryStore, Error> {
        let dir = self.dir.clone();
        tokio::task::spawn_blocking(move || Self::read(&dir)).await?
    }
}
