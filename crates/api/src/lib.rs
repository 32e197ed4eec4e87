pub mod date_window;
pub mod db;
pub mod queries;
pub mod routes;
mod startup;
pub mod templates;
mod utils;

pub use date_window::{DateWindow, TRAILING_WINDOW_DAYS};
pub use db::{open_dataset, DatasetSource, Measurement, MemoryStore, RecordStore, Station};
pub use queries::{
    PrecipitationReading, StationActivity, TemperatureReading, TemperatureSummary,
};
pub use routes::*;
pub use startup::*;
pub use utils::*;
