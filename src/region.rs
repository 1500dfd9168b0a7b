// src/region.rs

use crate::text::fold_text;

/// Number of departments; every series carries one count per department.
pub const REGION_COUNT: usize = 9;

/// Bolivian departments, in the column order used by every output series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Chuquisaca,
    LaPaz,
    Cochabamba,
    Oruro,
    Potosi,
    Tarija,
    SantaCruz,
    Beni,
    Pando,
}

impl Region {
    pub const ALL: [Region; REGION_COUNT] = [
        Region::Chuquisaca,
        Region::LaPaz,
        Region::Cochabamba,
        Region::Oruro,
        Region::Potosi,
        Region::Tarija,
        Region::SantaCruz,
        Region::Beni,
        Region::Pando,
    ];

    /// Column header as written to the CSV files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Chuquisaca => "Chuquisaca",
            Region::LaPaz => "La Paz",
            Region::Cochabamba => "Cochabamba",
            Region::Oruro => "Oruro",
            Region::Potosi => "Potosí",
            Region::Tarija => "Tarija",
            Region::SantaCruz => "Santa Cruz",
            Region::Beni => "Beni",
            Region::Pando => "Pando",
        }
    }

    /// Position of this region in `Region::ALL`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Match a header cell, ignoring case, accents, extra spaces and `(*)` markers.
    pub fn from_header(s: &str) -> Option<Self> {
        let key = header_key(s);
        Region::ALL
            .into_iter()
            .find(|r| header_key(r.as_str()) == key)
    }
}

/// Normalized form of a table or CSV header cell.
pub fn header_key(s: &str) -> String {
    fold_text(&s.replace("(*)", ""))
}
