/// Personal weather station API client.
///
/// The on-site sensor reports through its vendor cloud API as a
/// newest-first array of records, one per ~5 minutes, with all fields
/// already unit-converted (degrees F, mph, inHg, inches). Credentials are
/// two keys sourced from the environment by the caller.
///
/// Beyond the latest reading, the returned batch gives us enough history
/// to derive a barometric pressure trend locally: newest pressure vs the
/// oldest record in the batch (~3 hours back at the default cadence).

use crate::model::{IngestError, PressureTrend, SensorObservation};
use chrono::{DateTime, Utc};
use serde::Deserialize;

const SENSOR_BASE_URL: &str = "https://rt.ambientweather.net/v1";

/// Records requested per fetch; ~3 hours of history at 5-minute cadence,
/// enough for the pressure trend baseline.
const HISTORY_RECORDS: u32 = 36;

/// Pressure delta (inHg) below which the trend reads as steady.
const TREND_THRESHOLD_INHG: f64 = 0.02;

// ---------------------------------------------------------------------------
// API response structure
// ---------------------------------------------------------------------------

/// Raw sensor record as returned by the device endpoint.
#[derive(Debug, Deserialize)]
pub struct SensorRecord {
    #[serde(rename = "dateutc")]
    pub date_utc_ms: i64,
    #[serde(rename = "tempf")]
    pub temp_f: Option<f64>,
    #[serde(rename = "feelsLike")]
    pub feels_like_f: Option<f64>,
    #[serde(rename = "dewPoint")]
    pub dew_point_f: Option<f64>,
    pub humidity: Option<f64>,
    #[serde(rename = "windspeedmph")]
    pub wind_mph: Option<f64>,
    #[serde(rename = "windgustmph")]
    pub wind_gust_mph: Option<f64>,
    #[serde(rename = "winddir")]
    pub wind_dir_deg: Option<f64>,
    #[serde(rename = "baromrelin")]
    pub pressure_inhg: Option<f64>,
    pub uv: Option<f64>,
    #[serde(rename = "dailyrainin")]
    pub precip_today_in: Option<f64>,
    #[serde(rename = "yesterdayrainin")]
    pub precip_yesterday_in: Option<f64>,
}

/// Device history endpoint, newest record first.
pub fn device_url(mac: &str, api_key: &str, application_key: &str) -> String {
    format!(
        "{}/devices/{}?apiKey={}&applicationKey={}&limit={}",
        SENSOR_BASE_URL, mac, api_key, application_key, HISTORY_RECORDS
    )
}

// ---------------------------------------------------------------------------
// Fetch + normalization
// ---------------------------------------------------------------------------

pub fn fetch_latest(
    client: &reqwest::blocking::Client,
    mac: &str,
    api_key: &str,
    application_key: &str,
) -> Result<SensorObservation, IngestError> {
    let body =
        super::fetch_text_with_retry(client, &device_url(mac, api_key, application_key))?;
    let records: Vec<SensorRecord> = serde_json::from_str(&body)
        .map_err(|e| IngestError::ParseFailure(format!("sensor JSON: {}", e)))?;

    normalize(&records)
}

/// Normalizes a newest-first record batch into one `SensorObservation`.
///
/// # Errors
/// `IngestError::ParseFailure` when the batch is empty or the newest record
/// is missing the readings the snapshot cannot do without (temperature,
/// pressure).
pub fn normalize(records: &[SensorRecord]) -> Result<SensorObservation, IngestError> {
    let newest = records
        .first()
        .ok_or_else(|| IngestError::ParseFailure("sensor returned no records".to_string()))?;

    let temp_f = newest
        .temp_f
        .ok_or_else(|| IngestError::ParseFailure("sensor record missing tempf".to_string()))?;
    let pressure_inhg = newest
        .pressure_inhg
        .ok_or_else(|| IngestError::ParseFailure("sensor record missing baromrelin".to_string()))?;

    let timestamp = DateTime::<Utc>::from_timestamp_millis(newest.date_utc_ms)
        .ok_or_else(|| IngestError::ParseFailure("sensor record has invalid dateutc".to_string()))?;

    Ok(SensorObservation {
        timestamp,
        temp_f,
        feels_like_f: newest.feels_like_f,
        dew_point_f: newest.dew_point_f,
        humidity_pct: newest.humidity,
        wind_mph: newest.wind_mph.unwrap_or(0.0),
        wind_gust_mph: newest.wind_gust_mph,
        wind_dir: newest
            .wind_dir_deg
            .map(wind_direction_cardinal)
            .unwrap_or("N/A")
            .to_string(),
        pressure_inhg,
        pressure_trend: pressure_trend(records),
        uv_index: newest.uv,
        precip_today_in: newest.precip_today_in,
        precip_yesterday_in: newest.precip_yesterday_in,
    })
}

/// Trend from the newest pressure against the oldest record in the batch.
/// Missing data on either end reads as steady.
fn pressure_trend(records: &[SensorRecord]) -> PressureTrend {
    let newest = records.first().and_then(|r| r.pressure_inhg);
    let oldest = records.last().and_then(|r| r.pressure_inhg);

    match (newest, oldest) {
        (Some(now), Some(then)) if now - then >= TREND_THRESHOLD_INHG => PressureTrend::Rising,
        (Some(now), Some(then)) if then - now >= TREND_THRESHOLD_INHG => PressureTrend::Falling,
        _ => PressureTrend::Steady,
    }
}

/// 16-point cardinal label for a wind bearing in degrees.
pub fn wind_direction_cardinal(degrees: f64) -> &'static str {
    const POINTS: [&str; 16] = [
        "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
        "NW", "NNW",
    ];
    let normalized = degrees.rem_euclid(360.0);
    let index = ((normalized + 11.25) / 22.5) as usize % 16;
    POINTS[index]
}
