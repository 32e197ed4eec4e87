use axum::http::StatusCode;
use climate_api::{
    app, build_app_state,
    db::{self, CsvDataset, SqliteDataset, MEASUREMENTS_CSV, STATIONS_CSV},
    open_dataset, DatasetSource, RecordStore,
};
use serde_json::json;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Executor,
};
use std::{fs, path::Path, str::FromStr};
use time::macros::date;

use crate::helpers::{TestApp, REFERENCE_STATION};

const SCHEMA: &str = r#"
    CREATE TABLE measurement (
        id INTEGER PRIMARY KEY,
        station TEXT,
        date TEXT,
        prcp FLOAT,
        tobs FLOAT
    );
    CREATE TABLE station (
        id INTEGER PRIMARY KEY,
        station TEXT,
        name TEXT,
        latitude FLOAT,
        longitude FLOAT,
        elevation FLOAT
    );
"#;

async fn write_sqlite_fixture(path: &Path, measurements: &str) {
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))
        .unwrap()
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    pool.execute(SCHEMA).await.unwrap();
    pool.execute(measurements).await.unwrap();
    pool.execute(
        "INSERT INTO station (station, name, latitude, longitude, elevation) VALUES
            ('USC00519397', 'WAIKIKI 717.2, HI US', 21.2716, -157.8168, 3.0),
            ('USC00519281', 'WAIHEE 837.5, HI US', 21.45167, -157.84889, 32.9)",
    )
    .await
    .unwrap();
    pool.close().await;
}

const HAWAII_ROWS: &str = "INSERT INTO measurement (station, date, prcp, tobs) VALUES
    ('USC00519397', '2016-08-22', 0.4, 76),
    ('USC00519397', '2016-08-23', 0.0, 81),
    ('USC00519281', '2017-02-10', NULL, 60),
    ('USC00519281', '2017-08-18', 0.06, 79),
    ('USC00519397', '2017-08-23', 0.0, 81)";

#[tokio::test]
async fn loads_sqlite_dataset_in_table_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hawaii.sqlite");
    write_sqlite_fixture(&path, HAWAII_ROWS).await;

    let dataset = SqliteDataset::open(path.to_str().unwrap(), 2).await.unwrap();
    let store = dataset.load().await.unwrap();

    let measurements = store.all_measurements();
    assert_eq!(measurements.len(), 5);
    assert_eq!(measurements[0].station, "USC00519397");
    assert_eq!(measurements[0].date, date!(2016 - 08 - 22));
    assert_eq!(measurements[0].temperature, Some(76.0));
    assert_eq!(measurements[2].precipitation, None);
    assert_eq!(store.most_recent_date().unwrap(), date!(2017 - 08 - 23));

    let stations = store.all_stations();
    assert_eq!(stations.len(), 2);
    assert_eq!(stations[1].station, "USC00519281");
    assert_eq!(stations[1].name.as_deref(), Some("WAIHEE 837.5, HI US"));
    assert_eq!(stations[1].elevation, Some(32.9));
}

#[tokio::test]
async fn sqlite_dataset_rejects_malformed_dates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hawaii.sqlite");
    write_sqlite_fixture(
        &path,
        "INSERT INTO measurement (station, date, prcp, tobs) VALUES ('USC00519397', '08/23/2017', 0.0, 81)",
    )
    .await;

    let dataset = SqliteDataset::open(path.to_str().unwrap(), 1).await.unwrap();
    let err = dataset.load().await.unwrap_err();

    assert!(matches!(err, db::Error::InvalidDate { ref value, .. } if value == "08/23/2017"));
}

#[tokio::test]
async fn missing_dataset_is_reported() {
    let result = open_dataset("/nonexistent/hawaii.sqlite", 1).await;
    assert!(matches!(result, Err(db::Error::NotFound(_))));
}

fn write_csv_fixture(dir: &Path, measurements: &str) {
    fs::write(dir.join(MEASUREMENTS_CSV), measurements).unwrap();
    fs::write(
        dir.join(STATIONS_CSV),
        "station,name,latitude,longitude,elevation\n\
         USC00519397,\"WAIKIKI 717.2, HI US\",21.2716,-157.8168,3.0\n\
         USC00516128,,,,\n",
    )
    .unwrap();
}

#[tokio::test]
async fn loads_csv_directory() {
    let dir = tempfile::tempdir().unwrap();
    write_csv_fixture(
        dir.path(),
        "station,date,prcp,tobs\n\
         USC00519397,2017-08-22,0.0,82\n\
         USC00516128,2017-08-23,,76\n",
    );

    let source = open_dataset(dir.path().to_str().unwrap(), 1).await.unwrap();
    let store = source.load().await.unwrap();

    assert_eq!(store.all_measurements().len(), 2);
    assert_eq!(store.all_measurements()[1].precipitation, None);
    assert_eq!(store.all_measurements()[1].temperature, Some(76.0));
    assert_eq!(store.most_recent_date().unwrap(), date!(2017 - 08 - 23));

    let stations = store.all_stations();
    assert_eq!(stations[0].name.as_deref(), Some("WAIKIKI 717.2, HI US"));
    assert_eq!(stations[1].name, None);
    assert_eq!(stations[1].latitude, None);
}

#[tokio::test]
async fn csv_directory_needs_both_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(MEASUREMENTS_CSV), "station,date,prcp,tobs\n").unwrap();

    let err = CsvDataset::new(dir.path()).load().await.unwrap_err();
    assert!(matches!(err, db::Error::NotFound(ref path) if path.ends_with(STATIONS_CSV)));
}

#[tokio::test]
async fn csv_dataset_rejects_malformed_dates() {
    let dir = tempfile::tempdir().unwrap();
    write_csv_fixture(dir.path(), "station,date,prcp,tobs\nUSC00519397,08232017,0.0,82\n");

    let err = CsvDataset::new(dir.path()).load().await.unwrap_err();
    assert!(matches!(err, db::Error::InvalidDate { .. }));
}

#[tokio::test]
async fn serves_queries_from_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hawaii.sqlite");
    write_sqlite_fixture(&path, HAWAII_ROWS).await;

    let state = build_app_state(
        "http://127.0.0.1:5000".to_string(),
        REFERENCE_STATION.to_string(),
        path.to_str().unwrap().to_string(),
        2,
    )
    .await
    .unwrap();
    let test_app = TestApp { app: app(state) };

    let (status, body) = test_app.get_json("/api/v1.0/temp/2016-08-23").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"TMIN": 60.0, "TAVG": 75.25, "TMAX": 81.0})
    );

    let (status, body) = test_app.get_json("/api/v1.0/tobs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"date": "2017-02-10", "tobs": 60.0},
            {"date": "2017-08-18", "tobs": 79.0},
        ])
    );
}
