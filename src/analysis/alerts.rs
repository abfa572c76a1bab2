/// Alert classification.
///
/// Maps a raw alert record to a normalized severity tier and an icon tag.
/// The icon starts from the severity tier and is then overridden by
/// category keywords checked independently in a fixed priority order;
/// when a label matches several keywords, the last matching rule wins.
/// Pure functions, no external state.

use crate::ingest::nws::RawAlert;
use crate::model::{AlertSeverity, WeatherAlert};

pub fn classify(raw: &RawAlert) -> WeatherAlert {
    let severity = severity_tier(&raw.severity);

    WeatherAlert {
        event: raw.event.clone(),
        severity,
        icon: icon_for(&raw.event, severity),
        headline: raw.headline.clone(),
        description: raw.description.clone(),
        effective: raw.effective,
        expires: raw.expires,
        area: raw.area.clone(),
    }
}

pub fn classify_all(raw: &[RawAlert]) -> Vec<WeatherAlert> {
    raw.iter().map(classify).collect()
}

/// Upstream severity enum to normalized tier. Anything unrecognized
/// (including "Minor" and "Unknown") reads as low.
fn severity_tier(severity: &str) -> AlertSeverity {
    match severity {
        "Extreme" | "Severe" => AlertSeverity::High,
        "Moderate" => AlertSeverity::Moderate,
        _ => AlertSeverity::Low,
    }
}

/// Icon tag: severity default, then keyword overrides in priority order.
/// Each keyword is checked independently, so the last match overwrites
/// earlier ones.
fn icon_for(event: &str, severity: AlertSeverity) -> &'static str {
    let mut icon = match severity {
        AlertSeverity::High => "🚨",
        AlertSeverity::Moderate => "⚠️",
        AlertSeverity::Low => "ℹ️",
    };

    let label = event.to_lowercase();
    if label.contains("flood") {
        icon = "🌊";
    }
    if label.contains("wind") {
        icon = "💨";
    }
    if label.contains("snow") {
        icon = "❄️";
    }
    if label.contains("ice") || label.contains("freez") {
        icon = "🧊";
    }
    if label.contains("thunder") {
        icon = "⛈️";
    }
    if label.contains("tornado") {
        icon = "🌪️";
    }

    icon
}
