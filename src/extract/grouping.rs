// src/extract/grouping.rs

use tracing::trace;

use super::Layout;
use crate::document::Grid;
use crate::error::{Error, Result};
use crate::region::{header_key, Region, REGION_COUNT};
use crate::series::SeriesName;

/// Header of the column holding the date labels.
pub const LABEL_COLUMN: &str = "Departamento";

/// One table row after alignment: an optional date label plus the region cells in `Region::ALL` order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRow {
    pub label: Option<String>,
    pub cells: [String; REGION_COUNT],
}

/// A row attributed to a role, carrying its block's date label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawPoint {
    pub label: String,
    pub cells: [String; REGION_COUNT],
}

/// Turn a page grid in the bulletin's native orientation into `RawRow`s.
///
/// The native grid has one row per region and dates running across. After
/// transposing, the first row is the column header and column 1 (the role
/// sub-header) is ignored. Columns are located by header name, not position.
///
/// Every row below the sub-header must span the full table width. A short row
/// has lost cells somewhere and its values can no longer be placed.
pub fn align_rows(grid: &Grid, page: usize) -> Result<Vec<RawRow>> {
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    if grid.is_empty() || width < 2 {
        return Err(Error::MissingTable { page });
    }
    if let Some(short) = grid.iter().skip(2).find(|row| row.len() < width) {
        return Err(Error::RaggedRow {
            page,
            row: short
                .first()
                .and_then(|c| c.as_deref())
                .unwrap_or("")
                .trim()
                .to_string(),
            expected: width,
            found: short.len(),
        });
    }

    // transposed[j][i] == grid[i][j]
    let transposed: Vec<Vec<Option<&str>>> = (0..width)
        .map(|j| {
            grid.iter()
                .map(|row| row.get(j).and_then(|c| c.as_deref()))
                .collect()
        })
        .collect();

    let header: Vec<String> = transposed[0]
        .iter()
        .map(|c| header_key(c.unwrap_or("")))
        .collect();
    let find = |name: &str| -> Result<usize> {
        let key = header_key(name);
        header
            .iter()
            .enumerate()
            .find(|(i, h)| *i != 1 && **h == key)
            .map(|(i, _)| i)
            .ok_or_else(|| Error::MissingColumn {
                page,
                column: name.to_string(),
            })
    };

    let label_col = find(LABEL_COLUMN)?;
    let mut region_cols = [0usize; REGION_COUNT];
    for region in Region::ALL {
        region_cols[region.index()] = find(region.as_str())?;
    }

    let rows = transposed[1..]
        .iter()
        .map(|cols| {
            let label = cols[label_col]
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            let cells = region_cols.map(|i| cols[i].map(|s| s.trim().to_string()).unwrap_or_default());
            RawRow { label, cells }
        })
        .collect::<Vec<_>>();

    trace!(page, rows = rows.len(), "aligned table rows");
    Ok(rows)
}

/// Split one page's rows into per-role lists, in page order.
///
/// A labelled row opens a block and is role 0; each following unlabelled row
/// takes the next role. Every block must have exactly `layout.block_len()` rows.
pub fn group_rows(rows: &[RawRow], layout: Layout) -> Result<Vec<Vec<RawPoint>>> {
    let expected = layout.block_len();
    let mut roles: Vec<Vec<RawPoint>> = vec![Vec::new(); expected];
    // (date label of the open block, rows seen so far)
    let mut open: Option<(String, usize)> = None;

    for (i, row) in rows.iter().enumerate() {
        match &row.label {
            Some(label) => {
                if let Some((date, found)) = open.take() {
                    if found < expected {
                        return Err(Error::IncompleteRowBlock {
                            date,
                            expected,
                            found,
                        });
                    }
                }
                roles[0].push(RawPoint {
                    label: label.clone(),
                    cells: row.cells.clone(),
                });
                open = Some((label.clone(), 1));
            }
            None => {
                let (date, found) = open.as_mut().ok_or(Error::OrphanRow { row: i })?;
                if *found >= expected {
                    return Err(Error::OverfullRowBlock {
                        date: date.clone(),
                        expected,
                    });
                }
                roles[*found].push(RawPoint {
                    label: date.clone(),
                    cells: row.cells.clone(),
                });
                *found += 1;
            }
        }
    }

    if let Some((date, found)) = open {
        if found < expected {
            return Err(Error::IncompleteRowBlock {
                date,
                expected,
                found,
            });
        }
    }
    Ok(roles)
}

/// Per-role accumulation across the pages of one layout.
///
/// Bulletins put the newest page first and run dates ascending within a
/// page. Each page's lists are reversed on the way in and the whole
/// collection is reversed once on the way out, which leaves every role in
/// ascending date order across the document.
#[derive(Debug)]
pub struct RoleColumns {
    layout: Layout,
    roles: Vec<Vec<RawPoint>>,
}

impl RoleColumns {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            roles: vec![Vec::new(); layout.block_len()],
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Append one page's output of `group_rows`.
    pub fn push_page(&mut self, page_roles: Vec<Vec<RawPoint>>) {
        for (acc, mut page) in self.roles.iter_mut().zip(page_roles) {
            page.reverse();
            acc.extend(page);
        }
    }

    /// Points per role, oldest first.
    pub fn into_chronological(self) -> Vec<(SeriesName, Vec<RawPoint>)> {
        self.layout
            .roles()
            .iter()
            .copied()
            .zip(self.roles)
            .map(|(name, mut points)| {
                points.reverse();
                (name, points)
            })
            .collect()
    }
}
