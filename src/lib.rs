/// skymon_service: single-site weather monitoring and change detection.
///
/// # Module structure
///
/// ```text
/// skymon_service
/// ├── model       — shared data types (Snapshot, WeatherAlert, IngestError, …)
/// ├── config      — monitored-site configuration loader (site.toml)
/// ├── ingest
/// │   ├── nws       — forecast API + product page: URLs, JSON parsing, fetch
/// │   ├── obs_table — official observation history table scraping
/// │   ├── products  — forecast discussion / hazard outlook section extraction
/// │   ├── sensor    — personal weather station API client
/// │   └── fixtures (test only) — representative upstream payloads
/// ├── analysis
/// │   ├── alerts        — alert severity tiers and icon tags
/// │   ├── flight_window — hourly flight suitability and best-window search
/// │   └── changes       — snapshot-to-snapshot change detection
/// ├── store       — single-slot snapshot persistence (atomic JSON file)
/// └── cycle       — one fetch-and-decide cycle (concurrent fetch, assemble,
///                   diff, persist)
/// ```

/// Public modules
pub mod analysis;
pub mod config;
pub mod cycle;
pub mod ingest;
pub mod model;
pub mod store;
