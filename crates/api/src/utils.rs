use anyhow::Context;
use clap::Parser;
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};
use hawaii_climate_core::{
    find_config_file, get_xdg_data_dir, load_config, path_exists, ConfigSource, DEFAULT_API_PORT,
    DEFAULT_DATASET_PATH, DEFAULT_REFERENCE_STATION,
};
use log::LevelFilter;
use std::env;
use time::{format_description::well_known::Iso8601, OffsetDateTime};

#[derive(Parser, Clone, Debug, serde::Deserialize, Default)]
#[command(
    author,
    version,
    about = "Hawaii Climate API - read-only precipitation and temperature queries"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $CLIMATE_API_CONFIG, ./climate.toml,
    /// $XDG_CONFIG_HOME/hawaii-climate/climate.toml, /etc/hawaii-climate/climate.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "CLIMATE_API_LEVEL")]
    pub level: Option<String>,

    /// Host to listen on (use 0.0.0.0 for all interfaces)
    #[arg(short, long, env = "CLIMATE_API_HOST")]
    #[serde(alias = "host")]
    pub domain: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "CLIMATE_API_PORT")]
    pub port: Option<String>,

    /// Public URL used for links in the route index
    #[arg(short, long, env = "CLIMATE_API_REMOTE_URL")]
    pub remote_url: Option<String>,

    /// Sqlite database, or a directory holding hawaii_measurements.csv and hawaii_stations.csv
    #[arg(short = 's', long, env = "CLIMATE_API_DATASET")]
    pub dataset: Option<String>,

    /// Station reported by /api/v1.0/tobs when no station is requested
    #[arg(short = 't', long, env = "CLIMATE_API_REFERENCE_STATION")]
    pub reference_station: Option<String>,

    /// Maximum number of pooled sqlite connections used while loading the dataset
    #[arg(short, long, env = "CLIMATE_API_MAX_CONNECTIONS")]
    pub max_connections: Option<u32>,
}

impl Cli {
    /// Get the effective configuration value with defaults
    pub fn host(&self) -> String {
        self.domain
            .clone()
            .unwrap_or_else(|| "127.0.0.1".to_string())
    }

    pub fn port(&self) -> String {
        self.port
            .clone()
            .unwrap_or_else(|| DEFAULT_API_PORT.to_string())
    }

    pub fn remote_url(&self) -> String {
        self.remote_url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", self.host(), self.port()))
    }

    /// Falls back to ./Resources/hawaii.sqlite, then to the XDG data directory.
    pub fn dataset(&self) -> String {
        if let Some(dataset) = &self.dataset {
            return dataset.clone();
        }
        if path_exists(DEFAULT_DATASET_PATH) {
            return DEFAULT_DATASET_PATH.to_string();
        }
        get_xdg_data_dir()
            .join("hawaii.sqlite")
            .to_string_lossy()
            .into_owned()
    }

    pub fn reference_station(&self) -> String {
        self.reference_station
            .clone()
            .unwrap_or_else(|| DEFAULT_REFERENCE_STATION.to_string())
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections.unwrap_or(4)
    }
}

/// Load configuration from CLI args, config file, and environment.
///
/// Returns where the file values came from so it can be logged once the logger is up.
pub fn get_config_info() -> anyhow::Result<(Cli, ConfigSource)> {
    let cli_args = Cli::parse();

    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file("CLIMATE_API_CONFIG", "climate.toml")
    };

    let file_config = load_file_config(&source)?;
    Ok((merge_config(cli_args, file_config), source))
}

/// A config file that exists but cannot be read or parsed is an error, not a silent fallback.
pub fn load_file_config(source: &ConfigSource) -> anyhow::Result<Cli> {
    load_config(source).with_context(|| format!("invalid config file: {}", source))
}

/// CLI args (and the env vars clap reads) take priority over the config file.
pub fn merge_config(cli_args: Cli, file_config: Cli) -> Cli {
    Cli {
        config: cli_args.config,
        level: cli_args.level.or(file_config.level),
        domain: cli_args.domain.or(file_config.domain),
        port: cli_args.port.or(file_config.port),
        remote_url: cli_args.remote_url.or(file_config.remote_url),
        dataset: cli_args.dataset.or(file_config.dataset),
        reference_station: cli_args
            .reference_station
            .or(file_config.reference_station),
        max_connections: cli_args.max_connections.or(file_config.max_connections),
    }
}

pub fn get_log_level(cli: &Cli) -> LevelFilter {
    let level_str = cli
        .level
        .clone()
        .or_else(|| env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    match level_str.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

pub fn setup_logger() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .trace(Color::White)
        .debug(Color::Cyan)
        .info(Color::Blue)
        .warn(Color::Yellow)
        .error(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}: {}",
                OffsetDateTime::now_utc()
                    .format(&Iso8601::DEFAULT)
                    .unwrap_or_default(),
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
        .chain(std::io::stdout())
}
