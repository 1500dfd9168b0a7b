// src/extract/merge.rs

use chrono::NaiveDate;

use crate::region::REGION_COUNT;
use crate::series::{Counts, Series, EPOCH_START};

/// Combine freshly extracted points with the persisted baseline for one series.
///
/// The result holds exactly one entry for every date in `[EPOCH_START, as_of]`.
/// Precedence per date: fresh extraction, then baseline, then zeros. Anything
/// outside that range, from either input, is dropped.
pub fn merge_series(fresh: &[(NaiveDate, Counts)], baseline: &Series, as_of: NaiveDate) -> Series {
    let mut merged: Series = EPOCH_START
        .iter_days()
        .take_while(|d| *d <= as_of)
        .map(|d| (d, [0; REGION_COUNT]))
        .collect();

    let in_range = |d: NaiveDate| d >= EPOCH_START && d <= as_of;

    for (date, counts) in baseline.iter().filter(|(d, _)| in_range(*d)) {
        merged.insert(date, *counts);
    }
    for (date, counts) in fresh.iter().filter(|(d, _)| in_range(*d)) {
        merged.insert(*date, *counts);
    }
    merged
}
