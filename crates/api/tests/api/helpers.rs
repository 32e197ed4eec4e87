use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use climate_api::{app, AppState, Measurement, MemoryStore, Station};
use hyper::{header, Method};
use std::sync::Arc;
use time::{macros::date, Date};
use tower::ServiceExt;

pub const REFERENCE_STATION: &str = "USC00519281";

pub struct TestApp {
    pub app: Router,
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(header::ACCEPT, "application/json")
            .body(Body::empty())
            .unwrap();

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request.");

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.get(uri).await;
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }
}

pub async fn spawn_app(store: MemoryStore) -> TestApp {
    let state = AppState {
        remote_url: String::from("http://127.0.0.1:5000"),
        reference_station: REFERENCE_STATION.to_string(),
        store: Arc::new(store),
    };
    TestApp { app: app(state) }
}

pub fn measurement(station: &str, date: Date, prcp: Option<f64>, tobs: Option<f64>) -> Measurement {
    Measurement {
        station: station.to_string(),
        date,
        precipitation: prcp,
        temperature: tobs,
    }
}

pub fn station(id: &str, name: &str) -> Station {
    Station {
        station: id.to_string(),
        name: Some(name.to_string()),
        ..Default::default()
    }
}

/// Small slice of the Hawaii dataset; the most recent date is 2017-08-23.
pub fn fixture_store() -> MemoryStore {
    MemoryStore::new(
        vec![
            measurement("USC00519397", date!(2010 - 01 - 01), Some(0.08), Some(65.0)),
            measurement("USC00519397", date!(2016 - 08 - 22), Some(0.4), Some(76.0)),
            measurement("USC00519397", date!(2016 - 08 - 23), Some(0.0), Some(81.0)),
            measurement("USC00519281", date!(2016 - 08 - 23), Some(1.79), Some(77.0)),
            measurement("USC00519281", date!(2017 - 02 - 10), None, Some(60.0)),
            measurement("USC00516128", date!(2017 - 08 - 20), None, Some(78.0)),
            measurement("USC00519281", date!(2017 - 08 - 18), Some(0.06), Some(79.0)),
            measurement("USC00519397", date!(2017 - 08 - 23), Some(0.0), Some(81.0)),
        ],
        vec![
            station("USC00519397", "WAIKIKI 717.2, HI US"),
            station("USC00519281", "WAIHEE 837.5, HI US"),
            station("USC00516128", "MANOA LYON ARBO 785.2, HI US"),
        ],
    )
}
