use crate::helpers::{fixture_store, spawn_app};
use axum::http::StatusCode;
use climate_api::MemoryStore;

#[tokio::test]
async fn index_lists_every_route() {
    let test_app = spawn_app(fixture_store()).await;

    let (status, body) = test_app.get("/").await;
    let html = String::from_utf8(body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Hawaii Climate Analysis API"));
    for route in [
        "/api/v1.0/precipitation",
        "/api/v1.0/stations",
        "/api/v1.0/stations/activity",
        "/api/v1.0/tobs",
    ] {
        assert!(html.contains(route), "missing {route}");
    }
    // example links use the dataset's own trailing year
    assert!(html.contains("/api/v1.0/temp/2016-08-23/2017-08-23"));
    assert!(html.contains("USC00519281"));
}

#[tokio::test]
async fn index_renders_without_data() {
    let test_app = spawn_app(MemoryStore::default()).await;

    let (status, body) = test_app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body)
        .unwrap()
        .contains("/api/v1.0/temp/2016-08-23"));
}

#[tokio::test]
async fn api_docs_are_served() {
    let test_app = spawn_app(fixture_store()).await;

    let (status, _) = test_app.get("/docs").await;

    assert_eq!(status, StatusCode::OK);
}
