/// Shared data types for the sky monitoring service.
///
/// Everything that crosses a module boundary lives here: normalized
/// observations from both sources, classified alerts, the hourly flight
/// suitability types, the persisted `Snapshot`, and the `ChangeSet`
/// produced by comparing two snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Observations
// ---------------------------------------------------------------------------

/// Barometric pressure tendency derived from recent sensor history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureTrend {
    Rising,
    Falling,
    Steady,
}

impl PressureTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            PressureTrend::Rising => "rising",
            PressureTrend::Falling => "falling",
            PressureTrend::Steady => "steady",
        }
    }
}

/// Point-in-time reading from the on-site personal weather station.
///
/// Higher cadence than the official station but carries no precipitation
/// authority; official-station totals win when both are present.
#[derive(Debug, Clone)]
pub struct SensorObservation {
    pub timestamp: DateTime<Utc>,
    pub temp_f: f64,
    pub feels_like_f: Option<f64>,
    pub dew_point_f: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub wind_mph: f64,
    pub wind_gust_mph: Option<f64>,
    /// Cardinal label derived from the reported bearing, e.g. "SSW".
    pub wind_dir: String,
    pub pressure_inhg: f64,
    pub pressure_trend: PressureTrend,
    pub uv_index: Option<f64>,
    pub precip_today_in: Option<f64>,
    pub precip_yesterday_in: Option<f64>,
}

impl SensorObservation {
    /// One-line wind description, e.g. "SSW 12 mph gusting 18 mph".
    pub fn wind_description(&self) -> String {
        match self.wind_gust_mph {
            Some(gust) if gust > self.wind_mph => {
                format!("{} {:.0} mph gusting {:.0} mph", self.wind_dir, self.wind_mph, gust)
            }
            _ => format!("{} {:.0} mph", self.wind_dir, self.wind_mph),
        }
    }
}

/// Most recent row of the official station's historical-observations table.
///
/// Free-text cells (wind, weather, sky) are kept verbatim; numeric cells
/// have already been through best-effort parsing with per-field defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct StationObservation {
    /// Time-of-day label from the table row, e.g. "11:54".
    pub time_label: String,
    pub wind: String,
    pub visibility_mi: f64,
    pub weather: String,
    pub sky: String,
    pub temp_f: f64,
    pub dew_point_f: f64,
    pub humidity_pct: f64,
    pub pressure_inhg: f64,
}

/// Output of the observation table parser: the current observation (absent
/// when no row matches today's date) plus daily precipitation accumulations.
#[derive(Debug, Clone, PartialEq)]
pub struct ObsTableSummary {
    pub latest: Option<StationObservation>,
    pub precip_today_in: f64,
    pub precip_yesterday_in: f64,
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

/// Normalized severity tier for an active alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlertSeverity {
    Low,
    Moderate,
    High,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Low => "low",
            AlertSeverity::Moderate => "moderate",
            AlertSeverity::High => "high",
        }
    }
}

/// An active warning/watch/advisory after classification.
///
/// Rebuilt from scratch every fetch cycle; identity for change detection is
/// the `event` label, since the upstream feed does not guarantee stable IDs.
#[derive(Debug, Clone)]
pub struct WeatherAlert {
    /// Category label, e.g. "Winter Storm Warning".
    pub event: String,
    pub severity: AlertSeverity,
    pub icon: &'static str,
    pub headline: String,
    pub description: String,
    pub effective: Option<DateTime<Utc>>,
    pub expires: Option<DateTime<Utc>>,
    pub area: String,
}

// ---------------------------------------------------------------------------
// Flight suitability
// ---------------------------------------------------------------------------

/// Four-tier operational suitability for one forecast hour.
///
/// Ordering is by restrictiveness: `Excellent < Good < Marginal < NoGo`, so
/// the worst of two ratings is simply `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SuitabilityRating {
    Excellent,
    Good,
    Marginal,
    NoGo,
}

impl SuitabilityRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuitabilityRating::Excellent => "excellent",
            SuitabilityRating::Good => "good",
            SuitabilityRating::Marginal => "marginal",
            SuitabilityRating::NoGo => "no-go",
        }
    }

    /// An hour is flyable when rated excellent or good.
    pub fn is_flyable(&self) -> bool {
        matches!(self, SuitabilityRating::Excellent | SuitabilityRating::Good)
    }
}

/// One rated hour of the daily forecast.
#[derive(Debug, Clone)]
pub struct HourlyForecastPoint {
    /// Hour of day, 0-23, site-local time.
    pub hour: u32,
    pub temp_f: f64,
    pub wind_mph: f64,
    pub wind_dir: String,
    pub precip_chance_pct: f64,
    pub short_forecast: String,
    pub rating: SuitabilityRating,
    /// Human-readable reasons for every rule that fired, in rule order.
    pub issues: Vec<String>,
}

/// Contiguous run of flyable hours. `end_hour` is exclusive, so a run
/// covering hours 6-9 is labeled "6 AM–10 AM".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlightWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl FlightWindow {
    pub fn label(&self) -> String {
        format!("{}–{}", hour_label(self.start_hour), hour_label(self.end_hour))
    }

    pub fn len_hours(&self) -> u32 {
        self.end_hour - self.start_hour
    }
}

/// 12-hour clock label for an hour-of-day; 24 wraps to "12 AM".
pub fn hour_label(hour: u32) -> String {
    match hour % 24 {
        0 => "12 AM".to_string(),
        12 => "12 PM".to_string(),
        h if h < 12 => format!("{} AM", h),
        h => format!("{} PM", h - 12),
    }
}

/// Full flight-window analysis for one calendar day.
#[derive(Debug, Clone)]
pub struct FlightWindowReport {
    pub points: Vec<HourlyForecastPoint>,
    pub best_window: Option<FlightWindow>,
    pub flyable_hours: usize,
    pub summary: String,
}

// ---------------------------------------------------------------------------
// Snapshot and change set
// ---------------------------------------------------------------------------

/// One fetch cycle's normalized summary of conditions, alerts, and forecast
/// text. This is the unit the store persists and the change detector diffs.
/// Immutable after assembly; superseded, never merged, by the next cycle.
///
/// Text fields use empty string (not null) for "absent" so comparisons stay
/// uniform. Numeric fields that can be genuinely unavailable are `Option`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub taken_at: DateTime<Utc>,

    // Active alerts, by category label
    pub alert_count: usize,
    pub alert_events: Vec<String>,
    pub alert_headlines: Vec<String>,

    // Condensed current conditions
    pub temp_f: Option<f64>,
    pub wind: String,
    pub pressure_inhg: Option<f64>,
    pub weather: String,
    pub visibility_mi: Option<f64>,

    // Forecast discussion sections
    pub synopsis: String,
    pub near_term: String,

    // Hazard outlook
    pub outlook_day_one: String,
    pub outlook_has_hazards: bool,

    // Daily precipitation accumulation (inches)
    pub precip_today_in: f64,
    pub precip_yesterday_in: f64,
}

/// Structured diff between two snapshots. Lists hold human-readable change
/// descriptions in rule evaluation order; never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    pub has_changes: bool,
    pub alert_changes: Vec<String>,
    pub condition_changes: Vec<String>,
    pub forecast_changes: Vec<String>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Ingest-layer failure taxonomy.
///
/// Both variants are non-fatal to a cycle: the affected snapshot field is
/// degraded to absent (or a per-cell default) and the failure is logged.
#[derive(Debug)]
pub enum IngestError {
    /// Upstream fetch failed after its retry budget.
    SourceUnavailable(String),
    /// Expected structure (table rows, preformatted block) missing from
    /// otherwise-retrieved text, or a malformed payload.
    ParseFailure(String),
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestError::SourceUnavailable(msg) => write!(f, "source unavailable: {}", msg),
            IngestError::ParseFailure(msg) => write!(f, "parse failure: {}", msg),
        }
    }
}

impl std::error::Error for IngestError {}
