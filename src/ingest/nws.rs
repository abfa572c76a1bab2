/// National Weather Service API client.
///
/// Two distinct upstream surfaces:
///
/// - `api.weather.gov` — JSON API for the hourly gridpoint forecast and
///   active alerts. GeoJSON-flavored envelopes; everything interesting
///   lives under `properties`.
/// - `forecast.weather.gov` — classic HTML pages for the text products
///   (AFD, HWO) and the station observation history table. These are
///   fetched raw and handed to `products`/`obs_table` for parsing.
///
/// This module owns URL construction and JSON response parsing; see
/// `fixtures.rs` for annotated payload examples.

use crate::model::IngestError;
use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;

const API_BASE_URL: &str = "https://api.weather.gov";
const PRODUCT_BASE_URL: &str = "https://forecast.weather.gov";

/// Area Forecast Discussion product code.
pub const PRODUCT_AFD: &str = "AFD";
/// Hazardous Weather Outlook product code.
pub const PRODUCT_HWO: &str = "HWO";

// ---------------------------------------------------------------------------
// Serde structures for api.weather.gov responses
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ForecastResponse {
    properties: ForecastProperties,
}

#[derive(Deserialize)]
struct ForecastProperties {
    periods: Vec<PeriodEntry>,
}

#[derive(Deserialize)]
struct PeriodEntry {
    #[serde(rename = "startTime")]
    start_time: String,
    temperature: f64,
    // Free text, e.g. "10 mph" or "10 to 20 mph"
    #[serde(rename = "windSpeed", default)]
    wind_speed: String,
    #[serde(rename = "windDirection", default)]
    wind_direction: String,
    #[serde(rename = "probabilityOfPrecipitation", default)]
    precip_probability: Option<PopEntry>,
    #[serde(rename = "shortForecast", default)]
    short_forecast: String,
}

#[derive(Deserialize, Default)]
struct PopEntry {
    value: Option<f64>,
}

#[derive(Deserialize)]
struct AlertsResponse {
    #[serde(default)]
    features: Vec<AlertFeature>,
}

#[derive(Deserialize)]
struct AlertFeature {
    properties: AlertProperties,
}

#[derive(Deserialize)]
struct AlertProperties {
    event: String,
    #[serde(default)]
    severity: String,
    #[serde(default)]
    headline: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    effective: Option<String>,
    #[serde(default)]
    expires: Option<String>,
    #[serde(rename = "areaDesc", default)]
    area_desc: String,
}

// ---------------------------------------------------------------------------
// Processed records
// ---------------------------------------------------------------------------

/// One hourly forecast period, timestamped in the site's own UTC offset as
/// reported by the API. The offset carries the local calendar day and hour,
/// so no separate timezone configuration is needed downstream.
#[derive(Debug, Clone)]
pub struct HourlyPeriod {
    pub start_time: DateTime<FixedOffset>,
    pub temp_f: f64,
    /// Verbatim wind speed text; range parsing happens in analysis.
    pub wind_speed_text: String,
    pub wind_dir: String,
    pub precip_chance_pct: f64,
    pub short_forecast: String,
}

/// One active alert record as fetched, before classification.
#[derive(Debug, Clone)]
pub struct RawAlert {
    pub event: String,
    pub severity: String,
    pub headline: String,
    pub description: String,
    pub effective: Option<DateTime<Utc>>,
    pub expires: Option<DateTime<Utc>>,
    pub area: String,
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Hourly gridpoint forecast for a forecast office grid cell.
pub fn hourly_forecast_url(office: &str, grid_x: u32, grid_y: u32) -> String {
    format!(
        "{}/gridpoints/{}/{},{}/forecast/hourly",
        API_BASE_URL, office, grid_x, grid_y
    )
}

/// Active alerts for a public forecast zone (e.g. "ILZ027").
pub fn alerts_url(zone: &str) -> String {
    format!("{}/alerts/active/zone/{}", API_BASE_URL, zone)
}

/// Latest issuance of a text product (AFD, HWO) from a forecast office,
/// as the plain product page with the `<pre>` payload.
pub fn text_product_url(office: &str, product: &str) -> String {
    format!(
        "{}/product.php?site={}&issuedby={}&product={}&format=txt&version=1&glossary=0",
        PRODUCT_BASE_URL, office, office, product
    )
}

/// Rolling 3-day observation history table for a station (e.g. "KPIA").
pub fn obs_history_url(station: &str) -> String {
    format!("{}/data/obhistory/{}.html", PRODUCT_BASE_URL, station)
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Parses an hourly forecast response into a flat period list. Periods with
/// unparseable timestamps are dropped rather than failing the batch.
///
/// # Errors
/// `IngestError::ParseFailure` on a malformed envelope or when no usable
/// periods remain.
pub fn parse_hourly_response(json: &str) -> Result<Vec<HourlyPeriod>, IngestError> {
    let response: ForecastResponse = serde_json::from_str(json)
        .map_err(|e| IngestError::ParseFailure(format!("hourly forecast JSON: {}", e)))?;

    let periods: Vec<HourlyPeriod> = response
        .properties
        .periods
        .into_iter()
        .filter_map(|p| {
            let start_time = DateTime::parse_from_rfc3339(&p.start_time).ok()?;
            Some(HourlyPeriod {
                start_time,
                temp_f: p.temperature,
                wind_speed_text: p.wind_speed,
                wind_dir: p.wind_direction,
                precip_chance_pct: p
                    .precip_probability
                    .and_then(|pop| pop.value)
                    .unwrap_or(0.0),
                short_forecast: p.short_forecast,
            })
        })
        .collect();

    if periods.is_empty() {
        return Err(IngestError::ParseFailure(
            "no usable periods in hourly forecast".to_string(),
        ));
    }

    Ok(periods)
}

/// Parses an active-alerts response. An empty feature list is a normal
/// quiet-weather result, not an error.
pub fn parse_alerts_response(json: &str) -> Result<Vec<RawAlert>, IngestError> {
    let response: AlertsResponse = serde_json::from_str(json)
        .map_err(|e| IngestError::ParseFailure(format!("alerts JSON: {}", e)))?;

    Ok(response
        .features
        .into_iter()
        .map(|feature| {
            let p = feature.properties;
            RawAlert {
                event: p.event,
                severity: p.severity,
                headline: p.headline.unwrap_or_default(),
                description: p.description,
                effective: parse_utc(p.effective.as_deref()),
                expires: parse_utc(p.expires.as_deref()),
                area: p.area_desc,
            }
        })
        .collect())
}

fn parse_utc(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

// ---------------------------------------------------------------------------
// Fetch wrappers
// ---------------------------------------------------------------------------

pub fn fetch_hourly_forecast(
    client: &reqwest::blocking::Client,
    office: &str,
    grid_x: u32,
    grid_y: u32,
) -> Result<Vec<HourlyPeriod>, IngestError> {
    let body = super::fetch_text_with_retry(client, &hourly_forecast_url(office, grid_x, grid_y))?;
    parse_hourly_response(&body)
}

pub fn fetch_active_alerts(
    client: &reqwest::blocking::Client,
    zone: &str,
) -> Result<Vec<RawAlert>, IngestError> {
    let body = super::fetch_text_with_retry(client, &alerts_url(zone))?;
    parse_alerts_response(&body)
}

/// Fetches a raw text product page; parsing belongs to `products`.
pub fn fetch_product_page(
    client: &reqwest::blocking::Client,
    office: &str,
    product: &str,
) -> Result<String, IngestError> {
    super::fetch_text_with_retry(client, &text_product_url(office, product))
}

/// Fetches the raw observation history page; parsing belongs to `obs_table`.
pub fn fetch_obs_history_page(
    client: &reqwest::blocking::Client,
    station: &str,
) -> Result<String, IngestError> {
    super::fetch_text_with_retry(client, &obs_history_url(station))
}
