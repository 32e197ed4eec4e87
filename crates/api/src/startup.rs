use crate::{
    db::{open_dataset, RecordStore},
    index_handler, precipitation, queries, routes, station_activity, stations, temp_range,
    temp_start, tobs,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use hyper::{header::ACCEPT, Method};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub remote_url: String,
    pub reference_station: String,
    pub store: Arc<dyn RecordStore>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::climate::precipitation::precipitation,
        routes::climate::stations::stations,
        routes::climate::stations::station_activity,
        routes::climate::temperature::tobs,
        routes::climate::temperature::temp_start,
        routes::climate::temperature::temp_range,
    ),
    components(
        schemas(
                queries::PrecipitationReading,
                queries::TemperatureReading,
                queries::TemperatureSummary,
                queries::StationActivity,
        )
    ),
    tags(
        (name = "hawaii climate api", description = "a read-only api over daily precipitation and temperature observations from Hawaii weather stations")
    )
)]
struct ApiDoc;

/// Loads the dataset once and wraps it for sharing across handlers.
pub async fn build_app_state(
    remote_url: String,
    reference_station: String,
    dataset_path: String,
    max_connections: u32,
) -> Result<AppState, anyhow::Error> {
    let source = open_dataset(&dataset_path, max_connections)
        .await
        .map_err(|e| anyhow!("error opening dataset {}: {}", dataset_path, e))?;
    let store = source
        .load()
        .await
        .map_err(|e| anyhow!("error loading dataset {}: {}", dataset_path, e))?;

    Ok(AppState {
        remote_url,
        reference_station,
        store: Arc::new(store),
    })
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT])
        .allow_origin(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/stations/activity", get(station_activity))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/temp/{start}", get(temp_start))
        .route("/api/v1.0/temp/{start}/{end}", get(temp_range))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default()
        .to_owned();
    info!(target: "http_request", "new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, path: {}, time: {}", response.status().as_str(), path, response_time);

    response
}
