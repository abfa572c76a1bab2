/// One fetch-and-decide cycle.
///
/// A cycle is a single logical unit of work, triggered externally:
///
/// 1. Issue the six upstream fetches concurrently (thread pool); wait for
///    all of them to settle. A failed fetch degrades its snapshot field to
///    absent, it never aborts the cycle on its own.
/// 2. Abort with `InsufficientData` when neither primary condition source
///    (sensor, forecast discussion) produced data. Nothing is persisted on
///    this path; the last good snapshot stays authoritative.
/// 3. Assemble the snapshot, diff it against the stored one, then save the
///    new snapshot unconditionally - the comparison outcome does not gate
///    persistence.
///
/// The fetch jobs share no mutable state: each writes one disjoint field
/// of the eventual snapshot through its own channel message.

use crate::analysis::{alerts, changes, flight_window};
use crate::config::{self, SiteConfig};
use crate::ingest::{self, nws, obs_table, products, sensor};
use crate::model::{
    ChangeSet, FlightWindowReport, ObsTableSummary, SensorObservation, Snapshot, WeatherAlert,
};
use crate::store::SnapshotStore;
use chrono::{Datelike, Days, Local, Utc};
use std::sync::mpsc;
use threadpool::ThreadPool;

/// One worker per upstream source.
const FETCH_WORKERS: usize = 6;

// ---------------------------------------------------------------------------
// Errors and outcome
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum CycleError {
    /// Both primary condition sources are absent; the cycle aborts without
    /// persisting anything.
    InsufficientData,
    /// The assembled snapshot could not be persisted.
    Store(String),
}

impl std::fmt::Display for CycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CycleError::InsufficientData => {
                write!(f, "neither the sensor nor the forecast discussion produced data")
            }
            CycleError::Store(msg) => write!(f, "failed to persist snapshot: {}", msg),
        }
    }
}

impl std::error::Error for CycleError {}

/// Everything a cycle hands to the downstream narrative/delivery
/// collaborators, as read-only structured input.
pub struct CycleOutcome {
    pub snapshot: Snapshot,
    pub changes: ChangeSet,
    pub flight_report: Option<FlightWindowReport>,
    pub alerts: Vec<WeatherAlert>,
}

// ---------------------------------------------------------------------------
// Concurrent fetch stage
// ---------------------------------------------------------------------------

/// One settled fetch. Every job sends exactly one of these; `None` means
/// the source is absent for this cycle (already logged by the job).
enum FetchOutcome {
    Sensor(Option<SensorObservation>),
    ObsTable(Option<ObsTableSummary>),
    Discussion(Option<products::DiscussionSections>),
    Outlook(Option<products::HazardOutlook>),
    Hourly(Option<Vec<nws::HourlyPeriod>>),
    Alerts(Option<Vec<nws::RawAlert>>),
}

#[derive(Default)]
struct FetchResults {
    sensor: Option<SensorObservation>,
    obs: Option<ObsTableSummary>,
    discussion: Option<products::DiscussionSections>,
    outlook: Option<products::HazardOutlook>,
    hourly: Option<Vec<nws::HourlyPeriod>>,
    alerts: Option<Vec<nws::RawAlert>>,
}

fn log_absent<T>(source: &str, result: Result<T, crate::model::IngestError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            eprintln!("   ✗ {}: {}", source, e);
            None
        }
    }
}

fn fetch_all(site: &SiteConfig) -> FetchResults {
    let pool = ThreadPool::new(FETCH_WORKERS);
    let (tx, rx) = mpsc::channel();
    let client = ingest::http_client();

    let today = Local::now().date_naive();
    let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);

    // Sensor: skipped up front when the site has no device or no keys
    {
        let tx = tx.clone();
        let client = client.clone();
        let device = site.sensor_device.clone();
        let credentials = config::sensor_credentials();
        pool.execute(move || {
            let value = match (device, credentials) {
                (Some(mac), Some(creds)) => log_absent(
                    "sensor",
                    sensor::fetch_latest(&client, &mac, &creds.api_key, &creds.application_key),
                ),
                _ => {
                    eprintln!("   ✗ sensor: no device or credentials configured, skipping");
                    None
                }
            };
            tx.send(FetchOutcome::Sensor(value)).ok();
        });
    }

    // Official observation history table
    {
        let tx = tx.clone();
        let client = client.clone();
        let station = site.obs_station.clone();
        let (today_day, yesterday_day) = (today.day(), yesterday.day());
        pool.execute(move || {
            let value = log_absent(
                "observation table",
                nws::fetch_obs_history_page(&client, &station)
                    .and_then(|html| obs_table::parse_history(&html, today_day, yesterday_day)),
            );
            tx.send(FetchOutcome::ObsTable(value)).ok();
        });
    }

    // Forecast discussion product
    {
        let tx = tx.clone();
        let client = client.clone();
        let office = site.nws_office.clone();
        pool.execute(move || {
            let value = log_absent(
                "forecast discussion",
                nws::fetch_product_page(&client, &office, nws::PRODUCT_AFD)
                    .and_then(|html| products::parse_forecast_discussion(&html)),
            );
            tx.send(FetchOutcome::Discussion(value)).ok();
        });
    }

    // Hazardous weather outlook product
    {
        let tx = tx.clone();
        let client = client.clone();
        let office = site.nws_office.clone();
        pool.execute(move || {
            let value = log_absent(
                "hazard outlook",
                nws::fetch_product_page(&client, &office, nws::PRODUCT_HWO)
                    .and_then(|html| products::parse_hazard_outlook(&html)),
            );
            tx.send(FetchOutcome::Outlook(value)).ok();
        });
    }

    // Hourly forecast
    {
        let tx = tx.clone();
        let client = client.clone();
        let office = site.nws_office.clone();
        let (grid_x, grid_y) = (site.grid_x, site.grid_y);
        pool.execute(move || {
            let value = log_absent(
                "hourly forecast",
                nws::fetch_hourly_forecast(&client, &office, grid_x, grid_y),
            );
            tx.send(FetchOutcome::Hourly(value)).ok();
        });
    }

    // Active alerts
    {
        let tx = tx.clone();
        let zone = site.alert_zone.clone();
        pool.execute(move || {
            let value = log_absent("active alerts", nws::fetch_active_alerts(&client, &zone));
            tx.send(FetchOutcome::Alerts(value)).ok();
        });
    }

    drop(tx);

    let mut results = FetchResults::default();
    for outcome in rx {
        match outcome {
            FetchOutcome::Sensor(v) => results.sensor = v,
            FetchOutcome::ObsTable(v) => results.obs = v,
            FetchOutcome::Discussion(v) => results.discussion = v,
            FetchOutcome::Outlook(v) => results.outlook = v,
            FetchOutcome::Hourly(v) => results.hourly = v,
            FetchOutcome::Alerts(v) => results.alerts = v,
        }
    }

    results
}

// ---------------------------------------------------------------------------
// Snapshot assembly
// ---------------------------------------------------------------------------

/// Builds the cycle's snapshot from whatever sources settled successfully.
///
/// Source precedence: the sensor wins for temperature, wind, and pressure
/// (higher cadence); the official station is authoritative for visibility,
/// the weather description, and precipitation totals. Sensor rain gauges
/// back-fill precipitation only when the official table is absent.
fn assemble_snapshot(
    sensor_obs: Option<&SensorObservation>,
    obs: Option<&ObsTableSummary>,
    discussion: Option<&products::DiscussionSections>,
    outlook: Option<&products::HazardOutlook>,
    active_alerts: &[WeatherAlert],
) -> Snapshot {
    let station = obs.and_then(|summary| summary.latest.as_ref());

    let temp_f = sensor_obs
        .map(|s| s.temp_f)
        .or_else(|| station.map(|o| o.temp_f));
    let wind = sensor_obs
        .map(|s| s.wind_description())
        .or_else(|| station.map(|o| o.wind.clone()))
        .unwrap_or_default();
    let pressure_inhg = sensor_obs
        .map(|s| s.pressure_inhg)
        .or_else(|| station.map(|o| o.pressure_inhg));
    let weather = station
        .map(|o| {
            if o.weather.is_empty() {
                o.sky.clone()
            } else {
                o.weather.clone()
            }
        })
        .unwrap_or_default();
    let visibility_mi = station.map(|o| o.visibility_mi);

    let (precip_today_in, precip_yesterday_in) = match obs {
        Some(summary) => (summary.precip_today_in, summary.precip_yesterday_in),
        None => (
            sensor_obs.and_then(|s| s.precip_today_in).unwrap_or(0.0),
            sensor_obs.and_then(|s| s.precip_yesterday_in).unwrap_or(0.0),
        ),
    };

    Snapshot {
        taken_at: Utc::now(),
        alert_count: active_alerts.len(),
        alert_events: active_alerts.iter().map(|a| a.event.clone()).collect(),
        alert_headlines: active_alerts.iter().map(|a| a.headline.clone()).collect(),
        temp_f,
        wind,
        pressure_inhg,
        weather,
        visibility_mi,
        synopsis: discussion.map(|d| d.synopsis.clone()).unwrap_or_default(),
        near_term: discussion.map(|d| d.near_term.clone()).unwrap_or_default(),
        outlook_day_one: outlook.map(|o| o.day_one.clone()).unwrap_or_default(),
        outlook_has_hazards: outlook.map(|o| o.has_hazards).unwrap_or(false),
        precip_today_in,
        precip_yesterday_in,
    }
}

// ---------------------------------------------------------------------------
// Cycle driver
// ---------------------------------------------------------------------------

/// Runs one complete cycle against the given site and store.
///
/// # Errors
/// `CycleError::InsufficientData` when both primary sources are absent
/// (nothing persisted); `CycleError::Store` when the final save fails.
pub fn run_cycle(site: &SiteConfig, store: &SnapshotStore) -> Result<CycleOutcome, CycleError> {
    println!("📡 Fetching upstream sources for {}...", site.name);
    let fetched = fetch_all(site);

    if fetched.sensor.is_none() && fetched.discussion.is_none() {
        return Err(CycleError::InsufficientData);
    }

    let classified = fetched
        .alerts
        .as_deref()
        .map(alerts::classify_all)
        .unwrap_or_default();

    let flight_report = fetched
        .hourly
        .as_deref()
        .map(|periods| flight_window::analyze(periods, Local::now().date_naive()));

    let snapshot = assemble_snapshot(
        fetched.sensor.as_ref(),
        fetched.obs.as_ref(),
        fetched.discussion.as_ref(),
        fetched.outlook.as_ref(),
        &classified,
    );

    let previous = store.load();
    let change_set = changes::detect(&snapshot, previous.as_ref());

    // Persist regardless of the comparison outcome
    store
        .save(&snapshot)
        .map_err(|e| CycleError::Store(e.to_string()))?;

    Ok(CycleOutcome {
        snapshot,
        changes: change_set,
        flight_report,
        alerts: classified,
    })
}
