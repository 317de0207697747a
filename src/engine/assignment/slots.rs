//! Time-slot grammar for tenant-preferred times and vendor availability.
//!
//! Accepted shapes: `"Monday 09:00-12:00"` (full day names or Mon..Sun
//! abbreviations), `"2024-12-23 14:00-17:00"` (one-off date, folded to that
//! date's weekday), and a fixed set of emergency tokens treated as wildcard
//! windows for emergency-capable vendors.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Day component of a window. `Any` is the wildcard side used by vendors
/// advertising every-day coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPattern {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
    Any,
}

impl DayPattern {
    fn from_weekday(day: Weekday) -> Self {
        match day {
            Weekday::Mon => DayPattern::Monday,
            Weekday::Tue => DayPattern::Tuesday,
            Weekday::Wed => DayPattern::Wednesday,
            Weekday::Thu => DayPattern::Thursday,
            Weekday::Fri => DayPattern::Friday,
            Weekday::Sat => DayPattern::Saturday,
            Weekday::Sun => DayPattern::Sunday,
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "monday" | "mon" => Some(DayPattern::Monday),
            "tuesday" | "tue" => Some(DayPattern::Tuesday),
            "wednesday" | "wed" => Some(DayPattern::Wednesday),
            "thursday" | "thu" => Some(DayPattern::Thursday),
            "friday" | "fri" => Some(DayPattern::Friday),
            "saturday" | "sat" => Some(DayPattern::Saturday),
            "sunday" | "sun" => Some(DayPattern::Sunday),
            "any" => Some(DayPattern::Any),
            _ => None,
        }
    }

    fn matches(self, other: DayPattern) -> bool {
        self == DayPattern::Any || other == DayPattern::Any || self == other
    }
}

/// Half-open `[start, end)` interval of minutes-since-midnight on a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    pub day: DayPattern,
    pub start_min: u16,
    pub end_min: u16,
}

impl TimeWindow {
    /// Two windows overlap iff their days are compatible and the minute
    /// intervals intersect: `max(s1,s2) < min(e1,e2)`.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.day.matches(other.day)
            && self.start_min.max(other.start_min) < self.end_min.min(other.end_min)
    }

    /// Parse a `"Day HH:MM-HH:MM"` or `"YYYY-MM-DD HH:MM-HH:MM"` string.
    pub fn parse(raw: &str) -> Result<Self, SlotParseError> {
        let malformed = || SlotParseError::Malformed(raw.to_string());
        let mut parts = raw.split_whitespace();
        let day_part = parts.next().ok_or_else(malformed)?;
        let span_part = parts.next().ok_or_else(malformed)?;
        if parts.next().is_some() {
            return Err(malformed());
        }

        let day = match DayPattern::parse(day_part) {
            Some(day) => day,
            None => {
                // One-off date: fold to that date's weekday.
                let date = NaiveDate::parse_from_str(day_part, "%Y-%m-%d")
                    .map_err(|_| malformed())?;
                DayPattern::from_weekday(date.weekday())
            }
        };

        let (start_raw, end_raw) = span_part.split_once('-').ok_or_else(malformed)?;
        let start_min = parse_minutes(start_raw).ok_or_else(malformed)?;
        let end_min = parse_minutes(end_raw).ok_or_else(malformed)?;
        if start_min >= end_min {
            return Err(malformed());
        }

        Ok(TimeWindow {
            day,
            start_min,
            end_min,
        })
    }
}

fn parse_minutes(raw: &str) -> Option<u16> {
    let (hours_raw, minutes_raw) = raw.trim().split_once(':')?;
    if hours_raw.is_empty() || hours_raw.len() > 2 || minutes_raw.len() != 2 {
        return None;
    }
    let hours: u16 = hours_raw.parse().ok()?;
    let minutes: u16 = minutes_raw.parse().ok()?;
    if minutes > 59 {
        return None;
    }
    let total = hours * 60 + minutes;
    // 24:00 is a valid exclusive end of day.
    if total > 24 * 60 {
        return None;
    }
    Some(total)
}

/// One tenant-preferred time after tokenization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantSlot {
    /// Structured window; `original` keeps the literal string for
    /// `matched_times` reporting.
    Window { original: String, window: TimeWindow },
    /// Emergency wildcard: matches any day, but only vendors that handle
    /// emergency calls.
    Emergency { original: String },
}

impl TenantSlot {
    pub fn original(&self) -> &str {
        match self {
            TenantSlot::Window { original, .. } | TenantSlot::Emergency { original } => original,
        }
    }
}

const EMERGENCY_TOKENS: [&str; 4] = ["asap", "within 1 hour", "any time today", "any time tonight"];

/// Tokenize one tenant-preferred time string.
pub fn parse_tenant_slot(raw: &str) -> Result<TenantSlot, SlotParseError> {
    let trimmed = raw.trim();
    let lowered = trimmed.to_ascii_lowercase();
    if EMERGENCY_TOKENS.contains(&lowered.as_str()) {
        return Ok(TenantSlot::Emergency {
            original: trimmed.to_string(),
        });
    }

    TimeWindow::parse(trimmed).map(|window| TenantSlot::Window {
        original: trimmed.to_string(),
        window,
    })
}

/// A slot string that matches neither the grammar nor an emergency token.
/// Never fatal: the matcher drops the slot and records a warning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotParseError {
    #[error("malformed time slot '{0}'")]
    Malformed(String),
}
