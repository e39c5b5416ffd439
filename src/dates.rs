//! Date normalization to `YYYY-MM-DD`
//!
//! Application documents carry dates in several shapes depending on which
//! client produced them. Formats are tried in a fixed order and the first one
//! that yields a real calendar date wins.

use crate::types::SqlValue;
use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// 2024-01-15T10:30:00.123456
static ISO_MICROS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})T(\d{1,2}):(\d{1,2}):(\d{1,2})\.(\d{1,6})$").unwrap()
});

static ISO_DATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").unwrap()
});

// 15/01/2024
static THAI_DATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").unwrap()
});

static COMPACT_DATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})(\d{2})(\d{2})$").unwrap()
});

/// Result of normalizing one date field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedDate {
    /// Parsed into a calendar date
    Canonical(NaiveDate),
    /// Non-empty but in no known format; kept as written
    Verbatim(String),
    /// Empty input
    Absent,
}

impl NormalizedDate {
    /// `YYYY-MM-DD` for parsed dates
    pub fn canonical(&self) -> Option<String> {
        match self {
            NormalizedDate::Canonical(date) => Some(date.format("%Y-%m-%d").to_string()),
            _ => None,
        }
    }

    /// Absent dates become NULL, unparseable ones keep their original text.
    pub fn into_value(self) -> SqlValue {
        match self {
            NormalizedDate::Canonical(date) => SqlValue::Date(date),
            NormalizedDate::Verbatim(raw) => SqlValue::Text(raw),
            NormalizedDate::Absent => SqlValue::Null,
        }
    }
}

/// Only the empty string is absent; any other input is parsed exactly as given.
pub fn normalize(input: &str) -> NormalizedDate {
    if input.is_empty() {
        return NormalizedDate::Absent;
    }
    match parse_date(input) {
        Some(date) => NormalizedDate::Canonical(date),
        None => {
            tracing::debug!(len = input.len(), "date in unknown format kept verbatim");
            NormalizedDate::Verbatim(input.to_string())
        }
    }
}

/// Try each supported format in order
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    if let Some(caps) = ISO_MICROS_REGEX.captures(input) {
        // the time of day must be valid too
        let (h, m, s) = (num(&caps, 4)?, num(&caps, 5)?, num(&caps, 6)?);
        if NaiveTime::from_hms_opt(h, m, s).is_some() {
            if let Some(date) = ymd(&caps, 1, 2, 3) {
                return Some(date);
            }
        }
    }

    [
        (&*ISO_DATE_REGEX, (1, 2, 3)),
        (&*THAI_DATE_REGEX, (3, 2, 1)),
        (&*COMPACT_DATE_REGEX, (1, 2, 3)),
    ]
    .into_iter()
    .find_map(|(regex, (y, m, d))| {
        regex.captures(input).and_then(|caps| ymd(&caps, y, m, d))
    })
}

fn num(caps: &Captures, idx: usize) -> Option<u32> {
    caps.get(idx)?.as_str().parse().ok()
}

fn ymd(caps: &Captures, y: usize, m: usize, d: usize) -> Option<NaiveDate> {
    let year = caps.get(y)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, num(caps, m)?, num(caps, d)?)
}
