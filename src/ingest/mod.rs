/// Upstream data ingestion.
///
/// One file per source, mirroring the upstream surfaces:
/// - `sensor`    — personal weather station REST API
/// - `nws`       — api.weather.gov forecast/alerts + forecast.weather.gov pages
/// - `obs_table` — official station observation history table parser
/// - `products`  — preformatted text product parser (AFD, HWO)
///
/// Shared here: the HTTP client construction and the bounded-retry fetch
/// every source goes through before it is declared unavailable for the
/// cycle.

pub mod nws;
pub mod obs_table;
pub mod products;
pub mod sensor;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::model::IngestError;
use std::thread;
use std::time::Duration;

/// Retry budget per fetch; a source that exhausts it is absent this cycle.
pub const FETCH_ATTEMPTS: u32 = 3;

/// First backoff delay; doubles on each subsequent retry.
const BACKOFF_BASE_SECS: u64 = 1;

const REQUEST_TIMEOUT_SECS: u64 = 30;

// api.weather.gov rejects requests without an identifying User-Agent
const USER_AGENT: &str = "skymon_service/0.1 (site weather monitor)";

/// Builds the blocking HTTP client shared by all fetch jobs.
///
/// # Panics
/// Panics if the client cannot be constructed; the service cannot run
/// without one.
pub fn http_client() -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|e| panic!("failed to build HTTP client: {}", e))
}

/// GETs a URL with bounded retries and exponential backoff (1s, 2s, ...).
///
/// # Errors
/// `IngestError::SourceUnavailable` once the retry budget is exhausted,
/// carrying the last failure for the log line.
pub fn fetch_text_with_retry(
    client: &reqwest::blocking::Client,
    url: &str,
) -> Result<String, IngestError> {
    let mut last_error = String::new();

    for attempt in 0..FETCH_ATTEMPTS {
        if attempt > 0 {
            thread::sleep(Duration::from_secs(BACKOFF_BASE_SECS << (attempt - 1)));
        }

        match client.get(url).send() {
            Ok(response) if response.status().is_success() => match response.text() {
                Ok(text) => return Ok(text),
                Err(e) => last_error = format!("body read failed: {}", e),
            },
            Ok(response) => last_error = format!("HTTP {}", response.status()),
            Err(e) => last_error = e.to_string(),
        }
    }

    Err(IngestError::SourceUnavailable(format!(
        "{} after {} attempts: {}",
        url, FETCH_ATTEMPTS, last_error
    )))
}
