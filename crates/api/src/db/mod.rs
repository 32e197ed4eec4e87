mod csv_source;
mod record_store;
mod sqlite;

use std::path::Path;

use async_trait::async_trait;
use hawaii_climate_core::{is_directory, is_file};

pub use csv_source::{CsvDataset, MEASUREMENTS_CSV, STATIONS_CSV};
pub use record_store::{Measurement, MemoryStore, RecordStore, Station};
pub use sqlite::SqliteDataset;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Dataset contains no measurements")]
    EmptyDataset,
    #[error("Dataset not found: {0}")]
    NotFound(String),
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Failed to read csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid date {value:?} for station {station}: {source}")]
    InvalidDate {
        station: String,
        value: String,
        #[source]
        source: time::error::Parse,
    },
    #[error("Dataset load task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// A persisted dataset that can be read once into an immutable [`MemoryStore`].
#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn load(&self) -> Result<MemoryStore, Error>;
}

/// Picks a loader for `path`: a directory is read as a pair of csv files,
/// a regular file is opened as a sqlite database.
pub async fn open_dataset(
    path: &str,
    max_connections: u32,
) -> Result<Box<dyn DatasetSource>, Error> {
    if is_directory(path) {
        Ok(Box::new(CsvDataset::new(Path::new(path))))
    } else if is_file(path) {
        Ok(Box::new(SqliteDataset::open(path, max_connections).await?))
    } else {
        Err(Error::NotFound(path.to_string()))
    }
}
