use async_trait::async_trait;
use log::{debug, info};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow},
    Row,
};
use std::{str::FromStr, time::Duration};
use time::Date;

use super::{DatasetSource, Error, Measurement, MemoryStore, Station};
use crate::date_window::DATE_FORMAT;

const MEASUREMENTS_QUERY: &str = "SELECT station, date, CAST(prcp AS REAL) AS prcp, \
     CAST(tobs AS REAL) AS tobs FROM measurement";
const STATIONS_QUERY: &str = "SELECT station, name, CAST(latitude AS REAL) AS latitude, \
     CAST(longitude AS REAL) AS longitude, CAST(elevation AS REAL) AS elevation FROM station";

/// Sqlite file holding the `measurement` and `station` tables.
///
/// Connections come from a small read-only pool. Each table read checks one out
/// and hands it back when the read finishes, so nothing holds a session between calls.
pub struct SqliteDataset {
    path: String,
    pool: SqlitePool,
}

impl SqliteDataset {
    pub async fn open(path: &str, max_connections: u32) -> Result<Self, Error> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .read_only(true)
            .pragma("busy_timeout", "5000")
            .pragma("temp_store", "MEMORY");

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        info!("opened sqlite dataset at: {}", path);
        Ok(Self {
            path: path.to_string(),
            pool,
        })
    }

    pub async fn measurements(&self) -> Result<Vec<Measurement>, Error> {
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query(MEASUREMENTS_QUERY)
            .fetch_all(&mut *conn)
            .await?;
        debug!("read {} measurement rows from {}", rows.len(), self.path);

        rows.iter().map(row_to_measurement).collect()
    }

    pub async fn stations(&self) -> Result<Vec<Station>, Error> {
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query(STATIONS_QUERY).fetch_all(&mut *conn).await?;
        debug!("read {} station rows from {}", rows.len(), self.path);

        rows.iter().map(row_to_station).collect()
    }
}

#[async_trait]
impl DatasetSource for SqliteDataset {
    async fn load(&self) -> Result<MemoryStore, Error> {
        let measurements = self.measurements().await?;
        let stations = self.stations().await?;
        // everything lives in memory from here on
        self.pool.close().await;

        info!(
            "loaded {} measurements and {} stations from {}",
            measurements.len(),
            stations.len(),
            self.path
        );
        Ok(MemoryStore::new(measurements, stations))
    }
}

fn row_to_measurement(row: &SqliteRow) -> Result<Measurement, Error> {
    let station: String = row.try_get("station")?;
    let raw_date: String = row.try_get("date")?;
    let date = Date::parse(&raw_date, DATE_FORMAT).map_err(|source| Error::InvalidDate {
        station: station.clone(),
        value: raw_date,
        source,
    })?;

    Ok(Measurement {
        station,
        date,
        precipitation: row.try_get("prcp")?,
        temperature: row.try_get("tobs")?,
    })
}

fn row_to_station(row: &SqliteRow) -> Result<Station, Error> {
    Ok(Station {
        station: row.try_get("station")?,
        name: row.try_get("name")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
        elevation: row.try_get("elevation")?,
    })
}
