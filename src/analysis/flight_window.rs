/// Flight window analysis.
///
/// Classifies each hourly forecast point into a 4-tier operational
/// suitability rating, then finds the longest contiguous run of flyable
/// (excellent/good) hours for the day.
///
/// The rating is built by an ordered chain of downgrade-only rules: each
/// rule computes its own floor and the hour keeps the worse of that floor
/// and what earlier rules decided. A rule can therefore never raise a
/// rating set before it, which is what makes the chain order-insensitive
/// to everything except issue-list ordering.
///
/// Only hours 06:00-23:00 of the requested local calendar day are rated;
/// hours on another day are excluded even when chronologically contiguous.

use crate::ingest::nws::HourlyPeriod;
use crate::model::{FlightWindow, FlightWindowReport, HourlyForecastPoint, SuitabilityRating};
use chrono::{Datelike, NaiveDate, Timelike};

// Wind thresholds (mph)
const WIND_NOGO_MPH: f64 = 25.0;
const WIND_MARGINAL_MPH: f64 = 20.0;
const WIND_GOOD_MPH: f64 = 15.0;

// Precipitation probability thresholds (%)
const PRECIP_NOGO_PCT: f64 = 70.0;
const PRECIP_MARGINAL_PCT: f64 = 40.0;

// Temperature limits (F)
const TEMP_COLD_LIMIT_F: f64 = 20.0;
const TEMP_FREEZING_F: f64 = 32.0;
const TEMP_HOT_LIMIT_F: f64 = 95.0;

/// Hours before this are not considered for flight.
const DAY_START_HOUR: u32 = 6;

// Summary thresholds on the flyable-hour count
const EXCELLENT_DAY_HOURS: usize = 12;
const GOOD_DAY_HOURS: usize = 6;

// ---------------------------------------------------------------------------
// Report assembly
// ---------------------------------------------------------------------------

/// Rates the day's hourly periods and reports the best contiguous flyable
/// window, the flyable-hour count, and a one-line summary.
pub fn analyze(periods: &[HourlyPeriod], today: NaiveDate) -> FlightWindowReport {
    let points: Vec<HourlyForecastPoint> = periods
        .iter()
        .filter_map(|period| {
            // The API timestamp carries the site's own offset, so its
            // naive-local component is the site-local calendar day/hour
            let local = period.start_time.naive_local();
            if local.date() != today || local.hour() < DAY_START_HOUR {
                return None;
            }

            let wind_mph = parse_wind_mph(&period.wind_speed_text);
            let (rating, issues) = rate_hour(
                period.temp_f,
                wind_mph,
                period.precip_chance_pct,
                &period.short_forecast,
            );

            Some(HourlyForecastPoint {
                hour: local.hour(),
                temp_f: period.temp_f,
                wind_mph,
                wind_dir: period.wind_dir.clone(),
                precip_chance_pct: period.precip_chance_pct,
                short_forecast: period.short_forecast.clone(),
                rating,
                issues,
            })
        })
        .collect();

    let best = best_window(&points);
    let flyable_hours = points.iter().filter(|p| p.rating.is_flyable()).count();
    let summary = summarize(flyable_hours, best.as_ref());

    FlightWindowReport {
        points,
        best_window: best,
        flyable_hours,
        summary,
    }
}

/// Parses a wind speed from free text like "10 to 20 mph". When a range is
/// given the upper bound is the conservative estimate; no parseable number
/// reads as calm.
pub fn parse_wind_mph(text: &str) -> f64 {
    text.split_whitespace()
        .filter_map(|token| token.parse::<f64>().ok())
        .fold(0.0, f64::max)
}

// ---------------------------------------------------------------------------
// Rating rule chain
// ---------------------------------------------------------------------------

/// Applies the downgrade-only rule chain to one hour. Every rule that
/// fires appends its issue text even when the rating itself is already
/// at or below the rule's floor.
fn rate_hour(
    temp_f: f64,
    wind_mph: f64,
    precip_chance_pct: f64,
    short_forecast: &str,
) -> (SuitabilityRating, Vec<String>) {
    let mut rating = SuitabilityRating::Excellent;
    let mut issues = Vec::new();
    let forecast = short_forecast.to_lowercase();

    let mut downgrade = |current: &mut SuitabilityRating, floor: SuitabilityRating, issue: String| {
        *current = (*current).max(floor);
        issues.push(issue);
    };

    // 1. Wind
    if wind_mph >= WIND_NOGO_MPH {
        downgrade(
            &mut rating,
            SuitabilityRating::NoGo,
            format!("winds {:.0} mph exceed operational limit", wind_mph),
        );
    } else if wind_mph >= WIND_MARGINAL_MPH {
        downgrade(
            &mut rating,
            SuitabilityRating::Marginal,
            format!("high winds ({:.0} mph)", wind_mph),
        );
    } else if wind_mph >= WIND_GOOD_MPH {
        downgrade(
            &mut rating,
            SuitabilityRating::Good,
            format!("moderate winds ({:.0} mph)", wind_mph),
        );
    }

    // 2. Precipitation, by forecast text or probability
    let wet_forecast =
        forecast.contains("rain") || forecast.contains("snow") || forecast.contains("storm");
    if wet_forecast || precip_chance_pct >= PRECIP_NOGO_PCT {
        downgrade(
            &mut rating,
            SuitabilityRating::NoGo,
            "precipitation likely".to_string(),
        );
    } else if precip_chance_pct >= PRECIP_MARGINAL_PCT {
        downgrade(
            &mut rating,
            SuitabilityRating::Marginal,
            format!("chance of precipitation ({:.0}%)", precip_chance_pct),
        );
    }

    // 3. Temperature
    if temp_f <= TEMP_COLD_LIMIT_F || temp_f >= TEMP_HOT_LIMIT_F {
        downgrade(
            &mut rating,
            SuitabilityRating::Good,
            "temperature extremes degrade battery and thermal performance".to_string(),
        );
    } else if temp_f <= TEMP_FREEZING_F {
        downgrade(
            &mut rating,
            SuitabilityRating::Good,
            "near-freezing temperatures".to_string(),
        );
    }

    // 4. Fog
    if forecast.contains("fog") {
        downgrade(
            &mut rating,
            SuitabilityRating::NoGo,
            "visibility below minimum".to_string(),
        );
    }

    (rating, issues)
}

// ---------------------------------------------------------------------------
// Window search
// ---------------------------------------------------------------------------

/// Longest contiguous run of flyable hours. Contiguity requires both
/// flyable ratings and consecutive hour values. Ties resolve to the
/// earliest run (strict-greater comparison keeps the first maximum).
pub fn best_window(points: &[HourlyForecastPoint]) -> Option<FlightWindow> {
    let mut best: Option<FlightWindow> = None;
    let mut current: Option<FlightWindow> = None;

    for point in points {
        if point.rating.is_flyable() {
            current = match current {
                Some(run) if point.hour == run.end_hour => Some(FlightWindow {
                    start_hour: run.start_hour,
                    end_hour: point.hour + 1,
                }),
                _ => Some(FlightWindow {
                    start_hour: point.hour,
                    end_hour: point.hour + 1,
                }),
            };

            if let Some(run) = current {
                if best.map_or(true, |b| run.len_hours() > b.len_hours()) {
                    best = Some(run);
                }
            }
        } else {
            current = None;
        }
    }

    best
}

fn summarize(flyable_hours: usize, window: Option<&FlightWindow>) -> String {
    if flyable_hours == 0 {
        return "No suitable flight conditions today".to_string();
    }
    if flyable_hours >= EXCELLENT_DAY_HOURS {
        return "Excellent flying day".to_string();
    }
    if flyable_hours >= GOOD_DAY_HOURS {
        return match window {
            Some(w) => format!(
                "Good conditions for {} hours, best window {}",
                flyable_hours,
                w.label()
            ),
            None => format!("Good conditions for {} hours", flyable_hours),
        };
    }
    match window {
        Some(w) => format!("Limited flight windows, best window {}", w.label()),
        None => "Limited flight windows".to_string(),
    }
}
