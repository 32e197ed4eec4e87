use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::{window_error, StationFilter};
use crate::{
    date_window::{explicit_window, latest_year},
    queries::{temperature_aggregate, temperature_series},
    AppState, TemperatureReading, TemperatureSummary,
};

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    params(StationFilter),
    responses(
        (status = OK, description = "Temperature observations for one station over the last 365 days of data", body = Vec<TemperatureReading>),
        (status = INTERNAL_SERVER_ERROR, description = "Dataset has no measurements")
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<StationFilter>,
) -> Result<Json<Vec<TemperatureReading>>, (StatusCode, String)> {
    let station = filter
        .station
        .as_deref()
        .unwrap_or(state.reference_station.as_str());
    let window = latest_year(state.store.as_ref()).map_err(window_error)?;

    Ok(Json(temperature_series(
        state.store.as_ref(),
        &window,
        Some(station),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/temp/{start}",
    params(
        ("start" = String, Path, description = "First date of the window, YYYY-MM-DD"),
        StationFilter,
    ),
    responses(
        (status = OK, description = "Temperature summary from start through the most recent date", body = TemperatureSummary),
        (status = BAD_REQUEST, description = "Start date is not YYYY-MM-DD"),
        (status = INTERNAL_SERVER_ERROR, description = "Dataset has no measurements")
    ))]
pub async fn temp_start(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
    Query(filter): Query<StationFilter>,
) -> Result<Json<TemperatureSummary>, (StatusCode, String)> {
    let window = explicit_window(state.store.as_ref(), &start, None).map_err(window_error)?;

    Ok(Json(temperature_aggregate(
        state.store.as_ref(),
        &window,
        filter.station.as_deref(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/temp/{start}/{end}",
    params(
        ("start" = String, Path, description = "First date of the window, YYYY-MM-DD"),
        ("end" = String, Path, description = "Last date of the window, YYYY-MM-DD"),
        StationFilter,
    ),
    responses(
        (status = OK, description = "Temperature summary between start and end, inclusive", body = TemperatureSummary),
        (status = BAD_REQUEST, description = "A date is not YYYY-MM-DD or start is after end")
    ))]
pub async fn temp_range(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
    Query(filter): Query<StationFilter>,
) -> Result<Json<TemperatureSummary>, (StatusCode, String)> {
    let window =
        explicit_window(state.store.as_ref(), &start, Some(&end)).map_err(window_error)?;

    Ok(Json(temperature_aggregate(
        state.store.as_ref(),
        &window,
        filter.station.as_deref(),
    )))
}
