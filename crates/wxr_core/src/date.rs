//! Publish timestamp handling.
//!
//! WXR items carry `pubDate` in RFC 2822 form, but hand-edited or older
//! exports also contain ISO-like stamps and occasionally garbage. Anything
//! that does not parse is kept verbatim so the record still renders.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

/// Outcome of interpreting a record's publish timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishDate {
    /// No timestamp on the record.
    Missing,
    /// Timestamp understood, normalized to UTC.
    Parsed(DateTime<Utc>),
    /// Timestamp present but not understood; kept as written.
    Raw(String),
}

impl PublishDate {
    /// ISO-8601 UTC with millisecond precision, e.g. `2024-09-14T10:00:00.000Z`.
    pub fn iso(&self) -> Option<String> {
        match self {
            PublishDate::Parsed(dt) => Some(dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            PublishDate::Missing | PublishDate::Raw(_) => None,
        }
    }

    /// Text shown to readers: a formatted date, the raw text, or nothing.
    pub fn display(&self) -> Option<String> {
        match self {
            PublishDate::Missing => None,
            PublishDate::Parsed(dt) => Some(dt.format("%B %-d, %Y %H:%M UTC").to_string()),
            PublishDate::Raw(raw) => Some(raw.clone()),
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, PublishDate::Raw(_))
    }
}

/// Interprets a publish timestamp. Never fails: see [`PublishDate`].
pub fn parse_publish_date(raw: &str) -> PublishDate {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return PublishDate::Missing;
    }
    match parse_flexible(trimmed) {
        Some(dt) => PublishDate::Parsed(dt),
        None => PublishDate::Raw(raw.to_string()),
    }
}

fn parse_flexible(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // wp:post_date style and friends, no offset: assume UTC.
    let naive_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];
    for fmt in &naive_formats {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}
