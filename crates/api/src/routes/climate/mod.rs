pub mod precipitation;
pub mod stations;
pub mod temperature;

use axum::http::StatusCode;
use log::{error, warn};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::date_window;

pub use precipitation::precipitation;
pub use stations::{station_activity, stations};
pub use temperature::{temp_range, temp_start, tobs};

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StationFilter {
    /// Only include measurements from this station id
    pub station: Option<String>,
}

/// Maps resolver failures onto a status code: bad input is the caller's fault,
/// anything else is ours.
pub(crate) fn window_error(err: date_window::Error) -> (StatusCode, String) {
    if err.is_client_error() {
        warn!("rejected date window: {}", err);
        (StatusCode::BAD_REQUEST, err.to_string())
    } else {
        error!("error resolving date window: {}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}
