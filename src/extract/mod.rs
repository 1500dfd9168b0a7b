// src/extract/mod.rs
//
// Bulletin page → typed series. Everything in here is synchronous and pure:
// no I/O, no shared state between calls.

pub mod classify;
pub mod date;
pub mod grouping;
pub mod merge;
pub mod numeric;

use chrono::NaiveDate;

use crate::error::Result;
use crate::series::{Counts, SeriesName};
use date::DateResolver;
use grouping::RawPoint;

/// The two table layouts a bulletin page can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layout {
    /// New confirmed, deaths and recovered per day.
    Daily,
    /// Running totals of confirmed, active, deaths and recovered.
    Cumulative,
}

impl Layout {
    pub const ALL: [Layout; 2] = [Layout::Daily, Layout::Cumulative];

    /// Output series in block row order; the first role always carries the date label.
    pub fn roles(&self) -> &'static [SeriesName] {
        match self {
            Layout::Daily => &[
                SeriesName::ConfirmadosDiarios,
                SeriesName::DecesosDiarios,
                SeriesName::RecuperadosDiarios,
            ],
            Layout::Cumulative => &[
                SeriesName::ConfirmadosAcumulados,
                SeriesName::ActivosAcumulados,
                SeriesName::DecesosAcumulados,
                SeriesName::RecuperadosAcumulados,
            ],
        }
    }

    /// Rows per date block.
    pub fn block_len(&self) -> usize {
        self.roles().len()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Daily => "daily",
            Layout::Cumulative => "cumulative",
        }
    }
}

/// Resolve dates and counts for one role's points, oldest first.
///
/// Each call starts a fresh `DateResolver`, so every series is dated from the base year.
pub fn resolve_points(points: &[RawPoint]) -> Result<Vec<(NaiveDate, Counts)>> {
    let mut resolver = DateResolver::new();
    points
        .iter()
        .map(|p| -> Result<(NaiveDate, Counts)> {
            Ok((resolver.resolve(&p.label)?, numeric::parse_counts(&p.cells)?))
        })
        .collect()
}
