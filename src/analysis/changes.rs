/// Snapshot comparison and change detection.
///
/// `detect` compares a freshly assembled snapshot against the last
/// persisted one and produces a `ChangeSet`: three ordered lists of
/// human-readable change descriptions plus the overall "did anything
/// change enough to act" flag. Each rule is evaluated independently and
/// fires at most once; list order follows evaluation order.
///
/// Alert identity is the category label, not an upstream ID. The generic
/// weather-description rule is suppressed whenever a specific snow/rain
/// onset rule fires for the same comparison.

use crate::model::{ChangeSet, Snapshot};

/// Temperature must move at least this much (F) to be reported.
const TEMP_DELTA_F: f64 = 5.0;

/// Visibility hysteresis band: report a drop below the low bound, report a
/// recovery only at or above the high bound. A bounce inside the band is
/// deliberately not reported.
const VIS_LOW_MI: f64 = 3.0;
const VIS_RECOVER_MI: f64 = 6.0;

/// Minimum precipitation accumulation delta (inches) to report.
const PRECIP_DELTA_IN: f64 = 0.1;

/// Prefix length for the forecast-discussion drift heuristic: the
/// discussion counts as rewritten when the new text no longer contains
/// the first 50 characters of the old synopsis.
const SYNOPSIS_PREFIX_CHARS: usize = 50;

pub fn detect(current: &Snapshot, previous: Option<&Snapshot>) -> ChangeSet {
    let Some(prev) = previous else {
        return ChangeSet {
            has_changes: true,
            alert_changes: vec![
                "No baseline snapshot; treating current conditions as new".to_string(),
            ],
            ..ChangeSet::default()
        };
    };

    let mut changes = ChangeSet::default();
    detect_alert_changes(current, prev, &mut changes);
    detect_condition_changes(current, prev, &mut changes);
    detect_forecast_changes(current, prev, &mut changes);

    changes.has_changes = !changes.alert_changes.is_empty()
        || !changes.condition_changes.is_empty()
        || !changes.forecast_changes.is_empty();
    changes
}

fn detect_alert_changes(current: &Snapshot, prev: &Snapshot, changes: &mut ChangeSet) {
    let new: Vec<&str> = current
        .alert_events
        .iter()
        .filter(|event| !prev.alert_events.contains(event))
        .map(String::as_str)
        .collect();
    if !new.is_empty() {
        changes
            .alert_changes
            .push(format!("NEW ALERTS: {}", new.join(", ")));
    }

    let expired: Vec<&str> = prev
        .alert_events
        .iter()
        .filter(|event| !current.alert_events.contains(event))
        .map(String::as_str)
        .collect();
    if !expired.is_empty() {
        changes
            .alert_changes
            .push(format!("EXPIRED: {}", expired.join(", ")));
    }
}

fn detect_condition_changes(current: &Snapshot, prev: &Snapshot, changes: &mut ChangeSet) {
    // Temperature swing
    if let (Some(cur), Some(old)) = (current.temp_f, prev.temp_f) {
        let delta = cur - old;
        if delta.abs() >= TEMP_DELTA_F {
            let direction = if delta > 0.0 { "risen" } else { "fallen" };
            changes
                .condition_changes
                .push(format!("Temperature has {} {:.0}°F", direction, delta.abs()));
        }
    }

    // Visibility threshold crossings with hysteresis
    if let (Some(cur), Some(old)) = (current.visibility_mi, prev.visibility_mi) {
        if old >= VIS_LOW_MI && cur < VIS_LOW_MI {
            changes
                .condition_changes
                .push(format!("Visibility dropped to {:.1} mi", cur));
        } else if old < VIS_LOW_MI && cur >= VIS_RECOVER_MI {
            changes
                .condition_changes
                .push(format!("Visibility recovered to {:.1} mi", cur));
        }
    }

    // Precipitation accumulation. A decrease is the daily rollover, not a
    // sensor error, and is never reported.
    let precip_delta = current.precip_today_in - prev.precip_today_in;
    if precip_delta >= PRECIP_DELTA_IN {
        changes
            .condition_changes
            .push(format!("New precipitation: {:.2} in since last check", precip_delta));
    }

    // Weather description transitions
    let cur_weather = current.weather.to_lowercase();
    let prev_weather = prev.weather.to_lowercase();
    let snow_onset = cur_weather.contains("snow") && !prev_weather.contains("snow");
    let rain_onset = cur_weather.contains("rain") && !prev_weather.contains("rain");

    if snow_onset {
        changes
            .condition_changes
            .push(format!("Snow has begun ({})", current.weather));
    }
    if rain_onset {
        changes
            .condition_changes
            .push(format!("Rain has begun ({})", current.weather));
    }
    // Generic rule: suppressed when an onset already covered this
    // comparison, and never fired off an initially-empty baseline
    if !snow_onset
        && !rain_onset
        && !prev.weather.is_empty()
        && !current.weather.is_empty()
        && cur_weather != prev_weather
    {
        changes.condition_changes.push(format!(
            "Conditions changed from {} to {}",
            prev.weather, current.weather
        ));
    }
}

fn detect_forecast_changes(current: &Snapshot, prev: &Snapshot, changes: &mut ChangeSet) {
    // Coarse rewrite heuristic: containment of the old leading text, not
    // exact equality, is the change boundary
    if !prev.synopsis.is_empty() {
        let prefix: String = prev.synopsis.chars().take(SYNOPSIS_PREFIX_CHARS).collect();
        if !current.synopsis.contains(&prefix) {
            changes
                .forecast_changes
                .push("Forecast discussion updated".to_string());
        }
    }

    if !prev.outlook_has_hazards && current.outlook_has_hazards {
        changes
            .forecast_changes
            .push("Hazardous weather outlook now active".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot {
            taken_at: "2026-08-28T15:00:00Z".parse().unwrap(),
            alert_count: 0,
            alert_events: Vec::new(),
            alert_headlines: Vec::new(),
            temp_f: Some(40.0),
            wind: "NW 8 mph".to_string(),
            pressure_inhg: Some(29.95),
            weather: "Overcast".to_string(),
            visibility_mi: Some(10.0),
            synopsis: "High pressure builds in from the west behind a departing cold front."
                .to_string(),
            near_term: "Clear overnight.".to_string(),
            outlook_day_one: "No hazardous weather is expected.".to_string(),
            outlook_has_hazards: false,
            precip_today_in: 0.0,
            precip_yesterday_in: 0.0,
        }
    }

    #[test]
    fn test_identical_snapshots_yield_no_changes() {
        let s = snapshot();
        let changes = detect(&s, Some(&s));

        assert!(!changes.has_changes);
        assert!(changes.alert_changes.is_empty());
        assert!(changes.condition_changes.is_empty());
        assert!(changes.forecast_changes.is_empty());
    }

    #[test]
    fn test_absent_baseline_always_reports_changes() {
        let changes = detect(&snapshot(), None);

        assert!(changes.has_changes);
        assert_eq!(changes.alert_changes.len(), 1);
        assert!(changes.alert_changes[0].contains("No baseline"));
    }

    #[test]
    fn test_temperature_rise_scenario() {
        let prev = snapshot();
        let mut cur = snapshot();
        cur.temp_f = Some(46.0);

        let changes = detect(&cur, Some(&prev));

        assert!(changes.has_changes);
        assert_eq!(changes.condition_changes.len(), 1);
        assert!(changes.condition_changes[0].contains("risen 6°F"));
    }

    #[test]
    fn test_small_temperature_move_not_reported() {
        let prev = snapshot();
        let mut cur = snapshot();
        cur.temp_f = Some(44.0);

        assert!(!detect(&cur, Some(&prev)).has_changes);
    }

    #[test]
    fn test_alert_swap_scenario() {
        let mut prev = snapshot();
        prev.alert_events = vec!["Winter Storm Watch".to_string()];
        let mut cur = snapshot();
        cur.alert_events = vec!["Winter Storm Warning".to_string()];

        let changes = detect(&cur, Some(&prev));

        assert_eq!(changes.alert_changes.len(), 2);
        assert_eq!(changes.alert_changes[0], "NEW ALERTS: Winter Storm Warning");
        assert_eq!(changes.alert_changes[1], "EXPIRED: Winter Storm Watch");
    }

    #[test]
    fn test_visibility_drop_reported() {
        let mut prev = snapshot();
        prev.visibility_mi = Some(5.0);
        let mut cur = snapshot();
        cur.visibility_mi = Some(2.0);

        let changes = detect(&cur, Some(&prev));
        assert_eq!(changes.condition_changes.len(), 1);
        assert!(changes.condition_changes[0].contains("Visibility dropped"));
    }

    #[test]
    fn test_visibility_bounce_inside_band_not_reported() {
        // 2 mi -> 4 mi: still below the 6 mi recovery bound
        let mut prev = snapshot();
        prev.visibility_mi = Some(2.0);
        let mut cur = snapshot();
        cur.visibility_mi = Some(4.0);

        assert!(!detect(&cur, Some(&prev)).has_changes);
    }

    #[test]
    fn test_visibility_recovery_reported() {
        let mut prev = snapshot();
        prev.visibility_mi = Some(2.0);
        let mut cur = snapshot();
        cur.visibility_mi = Some(7.0);

        let changes = detect(&cur, Some(&prev));
        assert!(changes.condition_changes[0].contains("Visibility recovered"));
    }

    #[test]
    fn test_precipitation_increase_reported() {
        let prev = snapshot();
        let mut cur = snapshot();
        cur.precip_today_in = 0.15;

        let changes = detect(&cur, Some(&prev));
        assert_eq!(changes.condition_changes.len(), 1);
        assert!(changes.condition_changes[0].contains("0.15 in"));
    }

    #[test]
    fn test_precipitation_rollover_not_reported() {
        // Total fell: the local day rolled over, not a condition change
        let mut prev = snapshot();
        prev.precip_today_in = 0.80;
        let mut cur = snapshot();
        cur.precip_today_in = 0.0;

        assert!(!detect(&cur, Some(&prev)).has_changes);
    }

    #[test]
    fn test_snow_onset_suppresses_generic_rule() {
        let prev = snapshot(); // "Overcast"
        let mut cur = snapshot();
        cur.weather = "Light Snow".to_string();

        let changes = detect(&cur, Some(&prev));
        assert_eq!(changes.condition_changes.len(), 1);
        assert!(changes.condition_changes[0].contains("Snow has begun"));
    }

    #[test]
    fn test_rain_onset_reported() {
        let prev = snapshot();
        let mut cur = snapshot();
        cur.weather = "Rain".to_string();

        let changes = detect(&cur, Some(&prev));
        assert!(changes.condition_changes[0].contains("Rain has begun"));
    }

    #[test]
    fn test_generic_description_change() {
        let prev = snapshot(); // "Overcast"
        let mut cur = snapshot();
        cur.weather = "Partly Cloudy".to_string();

        let changes = detect(&cur, Some(&prev));
        assert_eq!(
            changes.condition_changes,
            vec!["Conditions changed from Overcast to Partly Cloudy".to_string()]
        );
    }

    #[test]
    fn test_initial_empty_description_not_a_generic_change() {
        let mut prev = snapshot();
        prev.weather = String::new();
        let mut cur = snapshot();
        cur.weather = "Partly Cloudy".to_string();

        assert!(!detect(&cur, Some(&prev)).has_changes);
    }

    #[test]
    fn test_synopsis_appended_text_is_not_an_update() {
        let prev = snapshot();
        let mut cur = snapshot();
        cur.synopsis = format!("{} Ridge amplifies late in the weekend.", prev.synopsis);

        assert!(!detect(&cur, Some(&prev)).has_changes);
    }

    #[test]
    fn test_synopsis_rewrite_reported() {
        let prev = snapshot();
        let mut cur = snapshot();
        cur.synopsis = "A strong cold front sweeps through tonight with gusty winds.".to_string();

        let changes = detect(&cur, Some(&prev));
        assert_eq!(changes.forecast_changes, vec!["Forecast discussion updated".to_string()]);
    }

    #[test]
    fn test_hazard_outlook_activation_reported() {
        let prev = snapshot();
        let mut cur = snapshot();
        cur.outlook_has_hazards = true;

        let changes = detect(&cur, Some(&prev));
        assert!(changes
            .forecast_changes
            .contains(&"Hazardous weather outlook now active".to_string()));
    }

    #[test]
    fn test_hazard_outlook_deactivation_not_reported() {
        let mut prev = snapshot();
        prev.outlook_has_hazards = true;
        let cur = snapshot();

        assert!(!detect(&cur, Some(&prev)).has_changes);
    }
}
