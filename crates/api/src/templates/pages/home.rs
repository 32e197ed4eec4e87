use maud::{html, Markup};

use crate::{
    date_window::{format_date, DateWindow},
    templates::layouts::{base, PageConfig},
};

struct RouteEntry {
    description: String,
    path: String,
}

/// Route index. `example` fills the date placeholders with a window that has data.
pub fn home_page(api_base: &str, reference_station: &str, example: Option<DateWindow>) -> Markup {
    let config = PageConfig {
        title: "Hawaii Climate Analysis API",
        api_base,
    };

    base(&config, content(api_base, &routes(reference_station, example)))
}

fn routes(reference_station: &str, example: Option<DateWindow>) -> Vec<RouteEntry> {
    let (start, end) = match example {
        Some(window) => (format_date(window.start), format_date(window.end)),
        None => ("2016-08-23".to_string(), "2017-08-23".to_string()),
    };

    vec![
        RouteEntry {
            description: "Precipitation for the last year of data".to_string(),
            path: "/api/v1.0/precipitation".to_string(),
        },
        RouteEntry {
            description: "Weather stations in the dataset".to_string(),
            path: "/api/v1.0/stations".to_string(),
        },
        RouteEntry {
            description: "Stations ranked by number of observations".to_string(),
            path: "/api/v1.0/stations/activity".to_string(),
        },
        RouteEntry {
            description: format!(
                "Temperature observations for station {} over the last year of data",
                reference_station
            ),
            path: "/api/v1.0/tobs".to_string(),
        },
        RouteEntry {
            description: "Min, average and max temperature from a start date (YYYY-MM-DD)"
                .to_string(),
            path: format!("/api/v1.0/temp/{}", start),
        },
        RouteEntry {
            description: "Min, average and max temperature between two dates (YYYY-MM-DD)"
                .to_string(),
            path: format!("/api/v1.0/temp/{}/{}", start, end),
        },
    ]
}

fn content(api_base: &str, routes: &[RouteEntry]) -> Markup {
    html! {
        div class="content" {
            p { "Welcome to the Hawaii Climate Analysis API!" }
            h2 class="subtitle" { "Available Routes" }
            table class="table is-fullwidth is-striped" {
                thead {
                    tr {
                        th { "Description" }
                        th { "Route" }
                    }
                }
                tbody {
                    @for route in routes {
                        tr {
                            td { (route.description) }
                            td {
                                a href={ (api_base) (route.path) } { code { (route.path) } }
                            }
                        }
                    }
                }
            }
            p class="is-size-7" {
                "The temperature routes accept an optional "
                code { "?station=" }
                " filter."
            }
        }
    }
}
