use std::sync::Arc;

use axum::{extract::State, response::Html};

use crate::{date_window::latest_year, templates::home_page, AppState};

/// Handler for the route index (GET /)
pub async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    // an empty dataset still gets an index, just with placeholder dates
    let example = latest_year(state.store.as_ref()).ok();
    Html(home_page(&state.remote_url, &state.reference_station, example).into_string())
}
