/// Historical-observations table parser.
///
/// The official station publishes a rolling 3-day observation history as an
/// HTML table, newest row first. Each data row carries a fixed 18-column
/// layout:
///
///   0 date (day of month)   6 temperature (F)     12 heat index
///   1 time                  7 dew point (F)       13 altimeter (inHg)
///   2 wind                  8 6-hr max temp       14 sea-level pressure
///   3 visibility (mi)       9 6-hr min temp       15 1-hr precip (in)
///   4 weather              10 humidity (%)        16 3-hr precip
///   5 sky                  11 wind chill          17 6-hr precip
///
/// Parsing is best-effort: a malformed numeric cell gets a visible default
/// via `parse_or` rather than failing the row, and short rows are skipped.
/// Only the total absence of data rows is an error.

use crate::model::{IngestError, ObsTableSummary, StationObservation};

// Column indices in the fixed table layout
const COL_DATE: usize = 0;
const COL_TIME: usize = 1;
const COL_WIND: usize = 2;
const COL_VISIBILITY: usize = 3;
const COL_WEATHER: usize = 4;
const COL_SKY: usize = 5;
const COL_TEMP: usize = 6;
const COL_DEW_POINT: usize = 7;
const COL_HUMIDITY: usize = 10;
const COL_ALTIMETER: usize = 13;
const COL_PRECIP_1HR: usize = 15;

/// Rows with fewer usable cells than this are dropped entirely.
const MIN_USABLE_COLUMNS: usize = 16;

/// Upper bound for a believable 1-hour precipitation cell. The table
/// encodes trace amounts and missing data with non-numeric or sentinel
/// values; anything at or above this is one of those, not rainfall.
const MAX_HOURLY_PRECIP_IN: f64 = 10.0;

/// Parses the observation history page into the most recent observation for
/// today plus 1-hour precipitation accumulations for today and yesterday.
///
/// `today_day` / `yesterday_day` are local day-of-month values; the table's
/// date column carries only the day number.
///
/// # Errors
/// `IngestError::ParseFailure` when the page yields no data rows at all.
/// A page that parses but has no row for today's date returns
/// `latest: None` instead - "no current observation" is not a failure.
pub fn parse_history(
    html: &str,
    today_day: u32,
    yesterday_day: u32,
) -> Result<ObsTableSummary, IngestError> {
    let rows = extract_rows(html);
    if rows.is_empty() {
        return Err(IngestError::ParseFailure(
            "no observation rows found in history table".to_string(),
        ));
    }

    let mut precip_today = 0.0;
    let mut precip_yesterday = 0.0;
    let mut latest: Option<StationObservation> = None;

    for cells in &rows {
        let Some(day) = cells[COL_DATE].trim().parse::<u32>().ok() else {
            continue;
        };

        if day == today_day {
            precip_today += precip_cell_value(&cells[COL_PRECIP_1HR]);
            // Rows are newest-first, so the first match is the current obs
            if latest.is_none() {
                latest = Some(observation_from_row(cells));
            }
        } else if day == yesterday_day {
            precip_yesterday += precip_cell_value(&cells[COL_PRECIP_1HR]);
        }
    }

    Ok(ObsTableSummary {
        latest,
        precip_today_in: round2(precip_today),
        precip_yesterday_in: round2(precip_yesterday),
    })
}

/// Best-effort numeric cell parsing: every default is visible at the call
/// site instead of buried in a conditional fallback.
pub fn parse_or(cell: &str, default: f64) -> f64 {
    cell.trim().trim_end_matches('%').parse().unwrap_or(default)
}

/// A 1-hour precipitation cell contributes to the daily sum only when it
/// is a positive number strictly below the sentinel bound. "T" (trace),
/// blanks, and footnote encodings all parse out and contribute nothing.
fn precip_cell_value(cell: &str) -> f64 {
    match cell.trim().parse::<f64>() {
        Ok(v) if v > 0.0 && v < MAX_HOURLY_PRECIP_IN => v,
        _ => 0.0,
    }
}

fn observation_from_row(cells: &[String]) -> StationObservation {
    StationObservation {
        time_label: cells[COL_TIME].trim().to_string(),
        wind: cells[COL_WIND].trim().to_string(),
        visibility_mi: parse_or(&cells[COL_VISIBILITY], 10.0),
        weather: cells[COL_WEATHER].trim().to_string(),
        sky: cells[COL_SKY].trim().to_string(),
        temp_f: parse_or(&cells[COL_TEMP], 0.0),
        dew_point_f: parse_or(&cells[COL_DEW_POINT], 0.0),
        humidity_pct: parse_or(&cells[COL_HUMIDITY], 0.0),
        pressure_inhg: parse_or(&cells[COL_ALTIMETER], 0.0),
    }
}

// ---------------------------------------------------------------------------
// Row extraction
// ---------------------------------------------------------------------------

/// Pulls `<td>` cell text out of every `<tr>` in the page, dropping rows
/// with too few usable cells (header rows carry `<th>` cells and fall out
/// naturally).
fn extract_rows(html: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut rest = html;

    while let Some(tr_start) = rest.find("<tr") {
        let after_tr = &rest[tr_start..];
        let Some(tr_end) = after_tr.find("</tr>") else {
            break;
        };

        let cells = extract_cells(&after_tr[..tr_end]);
        if cells.len() >= MIN_USABLE_COLUMNS {
            rows.push(cells);
        }

        rest = &after_tr[tr_end + 5..];
    }

    rows
}

fn extract_cells(row_html: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut rest = row_html;

    while let Some(td_start) = rest.find("<td") {
        let after_td = &rest[td_start..];
        let Some(content_start) = after_td.find('>') else {
            break;
        };
        let Some(td_end) = after_td.find("</td>") else {
            break;
        };

        if content_start < td_end {
            cells.push(strip_tags(&after_td[content_start + 1..td_end]));
        }
        rest = &after_td[td_end + 5..];
    }

    cells
}

/// Removes any markup nested inside a cell, leaving plain text.
fn strip_tags(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut in_tag = false;

    for c in fragment.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }

    out.trim().to_string()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
