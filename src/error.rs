// src/error.rs

use chrono::NaiveDate;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every way a run can fail. All of them abort the run before anything is saved.
#[derive(Debug, Error)]
pub enum Error {
    #[error("fetching {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("unreadable document: {0}")]
    UnreadableDocument(String),

    #[error("report name {0:?} does not encode a date")]
    UnrecognizedReportName(String),

    #[error("page {page}: table has no usable grid")]
    MissingTable { page: usize },

    #[error("page {page}: row {row:?} has {found} of {expected} cells")]
    RaggedRow {
        page: usize,
        row: String,
        expected: usize,
        found: usize,
    },

    #[error("page {page}: table header has no {column:?} column")]
    MissingColumn { page: usize, column: String },

    #[error("block {date:?} has {found} of {expected} rows")]
    IncompleteRowBlock {
        date: String,
        expected: usize,
        found: usize,
    },

    #[error("block {date:?} has more than {expected} rows")]
    OverfullRowBlock { date: String, expected: usize },

    #[error("unlabelled row {row} appears before any date label")]
    OrphanRow { row: usize },

    #[error("malformed number {0:?}")]
    MalformedNumber(String),

    #[error("malformed date {0:?}")]
    MalformedDate(String),

    #[error("unknown month abbreviation {0:?}")]
    UnknownMonthAbbrev(String),

    #[error("date {label:?} resolved to {resolved}, not after previous {previous}")]
    DateOrderingViolation {
        label: String,
        previous: NaiveDate,
        resolved: NaiveDate,
    },
}
