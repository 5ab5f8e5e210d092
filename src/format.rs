//! Formatting helpers that accept whatever the service layer hands over.
//! None of these panic; malformed input comes back as a legible string.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::model::{AgencySettings, TripRecord};

const PLACEHOLDER: &str = "-";

/// Shortest plausible data URI; anything shorter is a truncated or dummy value.
const MIN_IMAGE_URI_LEN: usize = 50;

const FILE_TOKEN_LEN: usize = 15;

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Parse an instant in any of the shapes the trip form or datastore produce.
/// Offsets are kept as written: the wall-clock time in the string is what prints.
fn parse_instant(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn present(iso: Option<&str>) -> Option<&str> {
    iso.filter(|s| !s.trim().is_empty())
}

/// `dd/mm/yyyy h:mm AM`, `-` when absent, the raw string with `T` spaced out otherwise.
pub fn format_date_time(iso: Option<&str>) -> String {
    let Some(raw) = present(iso) else {
        return PLACEHOLDER.to_string();
    };
    match parse_instant(raw) {
        Some(dt) => dt.format("%d/%m/%Y %-I:%M %p").to_string(),
        None => raw.replacen('T', " ", 1),
    }
}

/// `dd/mm/yyyy`, `-` when absent, the text before the first `T` otherwise.
pub fn format_date_only(iso: Option<&str>) -> String {
    let Some(raw) = present(iso) else {
        return PLACEHOLDER.to_string();
    };
    match parse_instant(raw) {
        Some(dt) => dt.format("%d/%m/%Y").to_string(),
        None => raw.split('T').next().unwrap_or(raw).to_string(),
    }
}

/// Cheap structural check run before any decode is attempted.
pub fn is_valid_image(value: Option<&str>) -> bool {
    value.is_some_and(|s| {
        s.starts_with("data:image/") && s.contains(";base64,") && s.len() > MIN_IMAGE_URI_LEN
    })
}

/// Numbers print like the admin table shows them: `1055`, `12.5`, `-3`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Replace everything except ASCII letters and digits with `_`.
pub fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// `Tripsheet_<vehicle>_<token>.pdf`, where the token is the booking id, else
/// the submission timestamp, else `now_millis`, cut to a fixed length.
pub fn trip_file_name(trip: &TripRecord, now_millis: u128) -> String {
    let token_source = [trip.id.as_str(), trip.timestamp.as_str()]
        .into_iter()
        .find(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| now_millis.to_string());
    let token: String = sanitize_component(&token_source)
        .chars()
        .take(FILE_TOKEN_LEN)
        .collect();
    format!(
        "Tripsheet_{}_{}.pdf",
        sanitize_component(&trip.vehicle_reg_no),
        token
    )
}

/// Characters no common filesystem accepts in a file name.
const FORBIDDEN_IN_FILE_NAME: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// `<Agency_Name>_Tripsheets.zip`. Whitespace runs collapse to one `_`;
/// path separators and other reserved characters become `_`.
pub fn archive_file_name(settings: &AgencySettings) -> String {
    let name = if settings.agency_name.is_empty() {
        "Vista"
    } else {
        settings.agency_name.as_str()
    };
    let mut out = String::with_capacity(name.len() + 16);
    let mut in_space = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
        } else if ch.is_control() || FORBIDDEN_IN_FILE_NAME.contains(&ch) {
            out.push('_');
            in_space = false;
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out.push_str("_Tripsheets.zip");
    out
}
