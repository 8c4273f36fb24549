//! Lenient date parsing.
//! Unparseable values become `None`; a bad cell never fails a load.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Days from 0001-01-01 (CE) to 1970-01-01, the epoch of polars `Date`.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Tries a list of chrono formats in order.
///
/// Formats containing a time component are parsed as `NaiveDateTime` and
/// truncated to the date. Formats without a day (or month) resolve to the
/// first day of that period. RFC 3339 timestamps with an offset are always
/// accepted on top of the configured list.
#[derive(Debug, Clone)]
pub struct DateParser {
    formats: Vec<String>,
}

impl Default for DateParser {
    fn default() -> Self {
        Self::new(Self::default_formats())
    }
}

impl DateParser {
    pub fn new(formats: Vec<String>) -> Self {
        Self { formats }
    }

    /// Formats accepted when no configuration overrides them.
    /// Month-first precedes day-first for ambiguous slash dates.
    /// Partial dates come last so a full date is never cut short.
    pub fn default_formats() -> Vec<String> {
        [
            "%Y-%m-%d",
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%d %H:%M",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%dT%H:%M",
            "%Y/%m/%d",
            "%m/%d/%Y",
            "%d/%m/%Y",
            "%d-%m-%Y",
            "%d.%m.%Y",
            "%Y%m%d",
            "%d %b %Y",
            "%d %B %Y",
            "%Y-%m",
            "%Y/%m",
            "%Y",
        ]
        .iter()
        .map(|f| f.to_string())
        .collect()
    }

    pub fn parse(&self, raw: &str) -> Option<NaiveDate> {
        let value = raw.trim();
        if value.is_empty() {
            return None;
        }

        for format in &self.formats {
            let parsed = if has_time_component(format) {
                NaiveDateTime::parse_from_str(value, format)
                    .ok()
                    .map(|dt| dt.date())
            } else {
                parse_date(value, format)
            };
            if parsed.is_some() {
                return parsed;
            }
        }

        DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|dt| dt.date_naive())
    }
}

fn has_time_component(format: &str) -> bool {
    ["%H", "%M", "%S", "%T"].iter().any(|t| format.contains(t))
}

/// Date-only parse; a missing month or day is pinned to 1.
fn parse_date(value: &str, format: &str) -> Option<NaiveDate> {
    let mut value = value.to_string();
    let mut format = format.to_string();
    if !["%m", "%b", "%B", "%h", "%j"].iter().any(|t| format.contains(t)) {
        value.push_str(" 01");
        format.push_str(" %m");
    }
    if !["%d", "%e", "%j"].iter().any(|t| format.contains(t)) {
        value.push_str(" 01");
        format.push_str(" %d");
    }
    NaiveDate::parse_from_str(&value, &format).ok()
}

/// Physical value of a polars `Date` for `date`.
pub fn to_epoch_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

pub fn from_epoch_days(days: i32) -> Option<NaiveDate> {
    days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
}
