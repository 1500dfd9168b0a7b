// src/fetch/mod.rs

pub mod download;
pub mod listing;

use chrono::NaiveDate;
use url::Url;

use crate::error::{Error, Result};

pub use download::download_report;
pub use listing::discover_latest;

/// Marker that precedes the date in bulletin filenames.
const NAME_MARKER: &str = "COVID-2019_";

/// The bulletin currently linked from the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportIdentity {
    /// e.g. `Boletin_COVID-2019_21_09_2020.pdf`
    pub filename: String,
    /// Date the bulletin covers.
    pub as_of: NaiveDate,
    pub url: Url,
}

impl ReportIdentity {
    /// Derive the identity from a bulletin filename and the directory it is served from.
    pub fn from_filename(filename: &str, base: &Url) -> Result<Self> {
        let as_of = report_date_from_filename(filename)?;
        let url = base
            .join(filename)
            .map_err(|_| Error::UnrecognizedReportName(filename.to_string()))?;
        Ok(Self {
            filename: filename.to_string(),
            as_of,
            url,
        })
    }
}

/// `..._COVID-2019_DD_MM_YYYY.pdf` → date.
pub fn report_date_from_filename(filename: &str) -> Result<NaiveDate> {
    let (_, tail) = filename
        .split_once(NAME_MARKER)
        .ok_or_else(|| Error::UnrecognizedReportName(filename.to_string()))?;
    NaiveDate::parse_from_str(tail, "%d_%m_%Y.pdf")
        .map_err(|_| Error::UnrecognizedReportName(filename.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_date() {
        assert_eq!(
            report_date_from_filename("Boletin_COVID-2019_21_09_2020.pdf").unwrap(),
            NaiveDate::from_ymd_opt(2020, 9, 21).unwrap()
        );
        assert_eq!(
            report_date_from_filename("COVID-2019_5_1_2021.pdf").unwrap(),
            NaiveDate::from_ymd_opt(2021, 1, 5).unwrap()
        );
    }

    #[test]
    fn test_unrecognized_names() {
        for name in [
            "Boletin_21_09_2020.pdf",
            "COVID-2019_21_09_2020.docx",
            "COVID-2019_31_02_2020.pdf",
        ] {
            assert!(
                matches!(
                    report_date_from_filename(name),
                    Err(Error::UnrecognizedReportName(_))
                ),
                "{}",
                name
            );
        }
    }

    #[test]
    fn test_identity_url() {
        let base = Url::parse("https://example.org/ReporteCOVID/R_diario/").unwrap();
        let id = ReportIdentity::from_filename("Boletin_COVID-2019_21_09_2020.pdf", &base).unwrap();
        assert_eq!(
            id.url.as_str(),
            "https://example.org/ReporteCOVID/R_diario/Boletin_COVID-2019_21_09_2020.pdf"
        );
        assert_eq!(id.as_of, NaiveDate::from_ymd_opt(2020, 9, 21).unwrap());
    }
}
