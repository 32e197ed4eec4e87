use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{queries, AppState, StationActivity};

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Identifiers of every station in the dataset", body = Vec<String>)
    ))]
pub async fn stations(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(queries::station_list(state.store.as_ref()))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/stations/activity",
    responses(
        (status = OK, description = "Stations ranked by number of measurements, busiest first", body = Vec<StationActivity>)
    ))]
pub async fn station_activity(State(state): State<Arc<AppState>>) -> Json<Vec<StationActivity>> {
    Json(queries::station_activity(state.store.as_ref()))
}
