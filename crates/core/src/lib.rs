//! Hawaii Climate Core Library
//!
//! Shared utilities for the climate API service:
//! - Configuration loading (XDG-compliant)
//! - File system utilities
//! - Common defaults

mod config;
pub mod fs;

pub use config::{find_config_file, get_xdg_data_dir, load_config, ConfigSource};
pub use fs::{is_directory, is_file, path_exists};

/// Application name used for XDG paths
pub const APP_NAME: &str = "hawaii-climate";

/// Default API port
pub const DEFAULT_API_PORT: u16 = 5000;

/// Default location of the measurement dataset, relative to the working directory
pub const DEFAULT_DATASET_PATH: &str = "./Resources/hawaii.sqlite";

/// Station reported by the temperature observation endpoint when none is requested
pub const DEFAULT_REFERENCE_STATION: &str = "USC00519281";
