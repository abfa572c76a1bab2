/// Derivation logic over normalized ingest output.
///
/// Submodules:
/// - `alerts`        — raw alert records to severity tier + icon tag.
/// - `flight_window` — hourly suitability ratings and best-window search.
/// - `changes`       — snapshot-to-snapshot change detection.

pub mod alerts;
pub mod changes;
pub mod flight_window;
