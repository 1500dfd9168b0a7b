// src/series.rs

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;

use crate::region::REGION_COUNT;

/// First date of every output series.
pub const EPOCH_START: NaiveDate = match NaiveDate::from_ymd_opt(2020, 3, 10) {
    Some(d) => d,
    None => panic!("epoch start is a valid date"),
};

/// One count per region, indexed by `Region::index`.
pub type Counts = [u64; REGION_COUNT];

/// Date-keyed counts, one entry per date, iterated in ascending date order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Series {
    points: BTreeMap<NaiveDate, Counts>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the counts for `date`.
    pub fn insert(&mut self, date: NaiveDate, counts: Counts) {
        self.points.insert(date, counts);
    }

    pub fn get(&self, date: NaiveDate) -> Option<&Counts> {
        self.points.get(&date)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &Counts)> {
        self.points.iter().map(|(d, c)| (*d, c))
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.keys().copied()
    }
}

impl FromIterator<(NaiveDate, Counts)> for Series {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, Counts)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// The output datasets. The name doubles as the CSV file stem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeriesName {
    ConfirmadosDiarios,
    DecesosDiarios,
    RecuperadosDiarios,
    ConfirmadosAcumulados,
    ActivosAcumulados,
    DecesosAcumulados,
    RecuperadosAcumulados,
}

impl SeriesName {
    pub const ALL: [SeriesName; 7] = [
        SeriesName::ConfirmadosDiarios,
        SeriesName::DecesosDiarios,
        SeriesName::RecuperadosDiarios,
        SeriesName::ConfirmadosAcumulados,
        SeriesName::ActivosAcumulados,
        SeriesName::DecesosAcumulados,
        SeriesName::RecuperadosAcumulados,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesName::ConfirmadosDiarios => "confirmados_diarios",
            SeriesName::DecesosDiarios => "decesos_diarios",
            SeriesName::RecuperadosDiarios => "recuperados_diarios",
            SeriesName::ConfirmadosAcumulados => "confirmados_acumulados",
            SeriesName::ActivosAcumulados => "activos_acumulados",
            SeriesName::DecesosAcumulados => "decesos_acumulados",
            SeriesName::RecuperadosAcumulados => "recuperados_acumulados",
        }
    }
}

impl fmt::Display for SeriesName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
