/// Site configuration loader - parses site.toml
///
/// Separates site identity from code, making it easy to point the service
/// at a different station, forecast office, or sensor without recompiling.
/// Sensor API credentials are deliberately not in the file; they come from
/// the environment (loaded via .env by the entry point).

use serde::Deserialize;
use std::env;
use std::fs;

/// Default location of the persisted snapshot, relative to the working
/// directory.
const DEFAULT_SNAPSHOT_PATH: &str = "last_snapshot.json";

/// Monitored-site metadata loaded from site.toml.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    pub name: String,

    /// Official observation station, e.g. "KPIA".
    pub obs_station: String,

    /// Forecast office that issues the text products, e.g. "ILX".
    pub nws_office: String,

    /// Gridpoint cell for the hourly forecast.
    pub grid_x: u32,
    pub grid_y: u32,

    /// Public forecast zone for active alerts, e.g. "ILZ027".
    pub alert_zone: String,

    /// Personal weather station device identifier (MAC). Optional: a site
    /// without a sensor still monitors the official sources.
    pub sensor_device: Option<String>,

    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
}

fn default_snapshot_path() -> String {
    DEFAULT_SNAPSHOT_PATH.to_string()
}

/// Root configuration structure for TOML parsing.
#[derive(Debug, Deserialize)]
struct SiteRegistry {
    site: SiteConfig,
}

/// Loads the site registry from site.toml in the working directory.
///
/// # Panics
/// Panics if the configuration file is missing, malformed, or contains
/// invalid data. This is intentional — the service cannot operate without
/// valid site metadata.
pub fn load_config() -> SiteConfig {
    load_config_from("site.toml")
}

pub fn load_config_from(config_path: &str) -> SiteConfig {
    let contents = fs::read_to_string(config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path, e));

    let registry: SiteRegistry = toml::from_str(&contents)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", config_path, e));

    registry.site
}

/// Sensor API credential pair, sourced from the environment.
#[derive(Debug, Clone)]
pub struct SensorCredentials {
    pub api_key: String,
    pub application_key: String,
}

/// Reads sensor credentials from SENSOR_API_KEY / SENSOR_APPLICATION_KEY.
/// `None` when either is unset; the sensor fetch is then skipped for the
/// cycle rather than attempted and failed.
pub fn sensor_credentials() -> Option<SensorCredentials> {
    let api_key = env::var("SENSOR_API_KEY").ok()?;
    let application_key = env::var("SENSOR_APPLICATION_KEY").ok()?;
    Some(SensorCredentials {
        api_key,
        application_key,
    })
}
