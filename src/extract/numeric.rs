// src/extract/numeric.rs

use crate::error::{Error, Result};
use crate::region::REGION_COUNT;
use crate::series::Counts;

/// Parse a count cell. Blank → 0; `.` is a thousands separator, never a decimal point.
pub fn parse_count(raw: &str) -> Result<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    let cleaned: String = trimmed.chars().filter(|c| *c != '.').collect();
    if cleaned.is_empty() || !cleaned.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::MalformedNumber(raw.to_string()));
    }
    cleaned
        .parse()
        .map_err(|_| Error::MalformedNumber(raw.to_string()))
}

/// Parse a full row of region cells.
pub fn parse_counts(cells: &[String; REGION_COUNT]) -> Result<Counts> {
    let mut out = [0; REGION_COUNT];
    for (slot, cell) in out.iter_mut().zip(cells) {
        *slot = parse_count(cell)?;
    }
    Ok(out)
}
