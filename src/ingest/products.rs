/// Preformatted text product parser.
///
/// NWS text products (Area Forecast Discussion, Hazardous Weather Outlook)
/// are served as HTML pages whose entire payload sits inside one dominant
/// `<pre>` block. Section boundaries inside that block follow the product
/// conventions: each section opens with a dotted ALL-CAPS marker (e.g.
/// `.SYNOPSIS...`) and runs until the next marker, a `&&` separator, or a
/// `$$` footer.
///
/// Extraction is a small ordered list of (name, start marker) rules
/// evaluated independently against the full text, not a stateful scanner.
/// Sections that are not found are simply omitted from the result map;
/// callers default them to empty string. A missing `<pre>` container is a
/// parse failure for the whole product.

use crate::model::IngestError;
use std::collections::HashMap;

/// Hard cap on extracted section length, in characters.
pub const MAX_SECTION_CHARS: usize = 500;

/// Fixed vocabulary for the hazard outlook keyword scan. This is a plain
/// case-insensitive substring test, not a classifier.
pub const HAZARD_KEYWORDS: &[&str] = &["warning", "advisory", "flood", "snow", "ice", "blizzard"];

/// One named section boundary: text from `start` (exclusive) to the next
/// known marker, `&&`, `$$`, or end of text.
pub struct SectionRule {
    pub name: &'static str,
    pub start: &'static str,
}

/// Forecast discussion sections of interest.
pub const DISCUSSION_RULES: &[SectionRule] = &[
    SectionRule { name: "synopsis", start: ".SYNOPSIS" },
    SectionRule { name: "near_term", start: ".NEAR TERM" },
    SectionRule { name: "short_term", start: ".SHORT TERM" },
];

/// Hazard outlook sections. Only day one feeds the snapshot; the second
/// rule exists so the day-one section stops at the right boundary.
pub const OUTLOOK_RULES: &[SectionRule] = &[
    SectionRule { name: "day_one", start: ".DAY ONE" },
    SectionRule { name: "days_two_through_seven", start: ".DAYS TWO" },
];

/// Forecast discussion fields carried into the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscussionSections {
    pub synopsis: String,
    pub near_term: String,
}

/// Hazard outlook summary carried into the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct HazardOutlook {
    pub day_one: String,
    pub has_hazards: bool,
}

// ---------------------------------------------------------------------------
// Product-level parsers
// ---------------------------------------------------------------------------

/// Parses an Area Forecast Discussion page into its synopsis and near-term
/// sections. Sections missing from the product come back as empty strings;
/// a missing `<pre>` block is an error and the caller omits the whole field.
pub fn parse_forecast_discussion(html: &str) -> Result<DiscussionSections, IngestError> {
    let body = extract_pre_block(html)?;
    let sections = extract_sections(body, DISCUSSION_RULES);

    Ok(DiscussionSections {
        synopsis: sections.get("synopsis").cloned().unwrap_or_default(),
        near_term: sections.get("near_term").cloned().unwrap_or_default(),
    })
}

/// Parses a Hazardous Weather Outlook page into the day-one section plus
/// the keyword-scan boolean.
pub fn parse_hazard_outlook(html: &str) -> Result<HazardOutlook, IngestError> {
    let body = extract_pre_block(html)?;
    let sections = extract_sections(body, OUTLOOK_RULES);
    let day_one = sections.get("day_one").cloned().unwrap_or_default();
    let has_hazards = has_hazard_keywords(&day_one);

    Ok(HazardOutlook { day_one, has_hazards })
}

/// Case-insensitive scan of the extracted region for the fixed hazard
/// vocabulary.
pub fn has_hazard_keywords(text: &str) -> bool {
    let lower = text.to_lowercase();
    HAZARD_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

// ---------------------------------------------------------------------------
// Extraction primitives
// ---------------------------------------------------------------------------

/// Returns the contents of the first `<pre>` block in the page.
///
/// # Errors
/// `IngestError::ParseFailure` when no complete block exists. Downstream
/// treats this as "product absent", not as an empty product.
pub fn extract_pre_block(html: &str) -> Result<&str, IngestError> {
    let open = find_ci(html, "<pre", 0)
        .ok_or_else(|| IngestError::ParseFailure("no <pre> block in product page".to_string()))?;
    let open_end = html[open..]
        .find('>')
        .map(|i| open + i + 1)
        .ok_or_else(|| IngestError::ParseFailure("unterminated <pre> tag".to_string()))?;
    let close = find_ci(html, "</pre", open_end)
        .ok_or_else(|| IngestError::ParseFailure("no closing </pre> tag".to_string()))?;

    Ok(&html[open_end..close])
}

/// Extracts every rule's section from `text`. Rules are independent and
/// order-insensitive: each one scans the full text for its own start
/// marker, then stops at the earliest of any known marker, `&&`, `$$`, or
/// end of text. Output is whitespace-collapsed and capped at
/// `MAX_SECTION_CHARS` characters (the cap may split mid-word).
pub fn extract_sections(text: &str, rules: &[SectionRule]) -> HashMap<&'static str, String> {
    let mut sections = HashMap::new();

    for rule in rules {
        let Some(start) = find_ci(text, rule.start, 0) else {
            continue;
        };
        let body_start = start + rule.start.len();

        let mut stop = text.len();
        for boundary in rules.iter().map(|r| r.start).chain(["&&", "$$"]) {
            if let Some(pos) = find_ci(text, boundary, body_start) {
                stop = stop.min(pos);
            }
        }

        sections.insert(rule.name, normalize_section(&text[body_start..stop]));
    }

    sections
}

/// Collapses all internal whitespace runs to single spaces, trims, and
/// caps the result at `MAX_SECTION_CHARS` characters.
fn normalize_section(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    // Leading "..." carried over from the section marker is noise
    let trimmed = collapsed.trim_start_matches('.').trim_start();
    trimmed.chars().take(MAX_SECTION_CHARS).collect()
}

/// ASCII case-insensitive substring search starting at byte offset `from`.
fn find_ci(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || from + needle.len() > haystack.len() {
        return None;
    }

    haystack[from..]
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
        .map(|pos| from + pos)
}
