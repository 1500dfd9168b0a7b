// src/extract/date.rs

use chrono::{Datelike, NaiveDate};

use crate::error::{Error, Result};
use crate::text::fold_text;

/// Year of the first bulletin row; every resolution pass starts here.
pub const BASE_YEAR: i32 = 2020;

/// Spanish three-letter month abbreviation → month number.
pub fn month_from_abbrev(abbrev: &str) -> Option<u32> {
    let m = match abbrev {
        "ene" => 1,
        "feb" => 2,
        "mar" => 3,
        "abr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "ago" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dic" => 12,
        _ => return None,
    };
    Some(m)
}

/// Split a `"<day>-<month>"` label into day and month numbers.
/// Only the first three letters of the month part are significant (`"10-marzo"` is March).
pub fn parse_day_month(label: &str) -> Result<(u32, u32)> {
    let compact: String = label.chars().filter(|c| !c.is_whitespace()).collect();
    let (day, month) = compact
        .split_once('-')
        .ok_or_else(|| Error::MalformedDate(label.to_string()))?;
    let day: u32 = day
        .parse()
        .map_err(|_| Error::MalformedDate(label.to_string()))?;
    let abbrev: String = fold_text(month).chars().take(3).collect();
    let month = month_from_abbrev(&abbrev).ok_or_else(|| Error::UnknownMonthAbbrev(month.to_string()))?;
    Ok((day, month))
}

/// Turns year-less day labels into calendar dates.
///
/// Labels must arrive in strictly ascending chronological order. The only
/// year signal is a `1-ene` label: it bumps the running year before it is
/// resolved, unless it is the first label of the pass. Anything that would
/// make the sequence non-increasing, including a rollover that does not
/// follow a December date, is rejected rather than mis-dated.
#[derive(Debug, Clone)]
pub struct DateResolver {
    year: i32,
    previous: Option<NaiveDate>,
}

impl Default for DateResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DateResolver {
    pub fn new() -> Self {
        Self {
            year: BASE_YEAR,
            previous: None,
        }
    }

    /// Back to the base year with no history; call once per series.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn resolve(&mut self, label: &str) -> Result<NaiveDate> {
        let (day, month) = parse_day_month(label)?;

        let rollover = day == 1 && month == 1;
        if rollover {
            if let Some(prev) = self.previous {
                if prev.month() != 12 || prev.year() != self.year {
                    return Err(Error::DateOrderingViolation {
                        label: label.to_string(),
                        previous: prev,
                        resolved: NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
                            .ok_or_else(|| Error::MalformedDate(label.to_string()))?,
                    });
                }
                self.year += 1;
            }
        }

        let resolved = NaiveDate::from_ymd_opt(self.year, month, day)
            .ok_or_else(|| Error::MalformedDate(label.to_string()))?;

        if let Some(prev) = self.previous {
            if resolved <= prev {
                return Err(Error::DateOrderingViolation {
                    label: label.to_string(),
                    previous: prev,
                    resolved,
                });
            }
        }

        self.previous = Some(resolved);
        Ok(resolved)
    }
}
