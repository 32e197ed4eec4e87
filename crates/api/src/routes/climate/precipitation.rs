use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::window_error;
use crate::{
    date_window::latest_year, queries::precipitation_series, AppState, PrecipitationReading,
};

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Precipitation for every measurement in the last 365 days of data", body = Vec<PrecipitationReading>),
        (status = INTERNAL_SERVER_ERROR, description = "Dataset has no measurements")
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrecipitationReading>>, (StatusCode, String)> {
    let window = latest_year(state.store.as_ref()).map_err(window_error)?;
    Ok(Json(precipitation_series(state.store.as_ref(), &window)))
}
