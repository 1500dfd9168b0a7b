// src/document/text_table.rs
//
// Rebuild a bulletin table from the page's text lines. Bulletins print the
// table with one line per department and dates running across:
//
//   Departamento 10-mar 11-mar
//   Chuquisaca   1 0 0 2 0 0
//   La Paz       ...
//
// Text extraction loses blank cells. Department lines are kept at their
// printed length, so a line shorter than the widest one stays ragged and the
// table is rejected when it is aligned.

use super::Grid;
use crate::extract::grouping::LABEL_COLUMN;
use crate::region::{header_key, Region};

/// Native-orientation grid for the first table on the page, or `None` if the
/// text has no `Departamento` header followed by department lines, or if the
/// number of values is not a whole multiple of the number of dates.
pub fn grid_from_text(text: &str) -> Option<Grid> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let label_key = header_key(LABEL_COLUMN);
    let is_header = |line: &str| {
        line.split_whitespace()
            .next()
            .map_or(false, |w| header_key(w) == label_key)
    };

    let header_idx = lines.iter().position(|&l| is_header(l))?;
    let dates: Vec<&str> = lines[header_idx].split_whitespace().skip(1).collect();
    if dates.is_empty() {
        return None;
    }

    let mut seen = Vec::new();
    let mut region_rows: Vec<(Region, Vec<String>)> = Vec::new();
    for line in lines[header_idx + 1..].iter().take_while(|&&l| !is_header(l)) {
        if let Some((region, values)) = split_region_line(line) {
            if !seen.contains(&region) {
                seen.push(region);
                region_rows.push((region, values));
            }
        }
    }

    let width = region_rows.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
    if width == 0 || width % dates.len() != 0 {
        return None;
    }
    let span = width / dates.len();

    let mut header = vec![Some(LABEL_COLUMN.to_string())];
    for date in &dates {
        header.push(Some(date.to_string()));
        header.extend(std::iter::repeat(None).take(span - 1));
    }
    // role sub-header; its content is never read
    let mut grid = vec![header, vec![None]];
    for (region, values) in region_rows {
        let mut row = vec![Some(region.as_str().to_string())];
        row.extend(values.into_iter().map(Some));
        grid.push(row);
    }
    Some(grid)
}

/// A department name (one or two words, optional `(*)` marker) followed by values.
fn split_region_line(line: &str) -> Option<(Region, Vec<String>)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    Region::ALL.into_iter().find_map(|region| {
        let n = region.as_str().split_whitespace().count();
        if tokens.len() < n || header_key(&tokens[..n].join(" ")) != header_key(region.as_str()) {
            return None;
        }
        let mut rest = &tokens[n..];
        if rest.first() == Some(&"(*)") {
            rest = &rest[1..];
        }
        Some((region, rest.iter().map(|s| s.to_string()).collect()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::extract::grouping::{align_rows, group_rows};
    use crate::extract::Layout;

    const PAGE: &str = "\
BOLIVIA: CASOS CONFIRMADOS, FALLECIDOS Y RECUPERADOS POR DEPARTAMENTO POR DÍA, DEL 10/03/2020
Departamento 10-mar 11-mar
C F R C F R
Chuquisaca 0 0 0 0 0 0
La Paz 1 0 0 2 0 0
Cochabamba 0 0 0 0 0 0
Oruro 1 0 0 0 0 0
Potosí (*) 0 0 0 0 0 0
Tarija 0 0 0 0 0 0
Santa Cruz 1.020 3 4 0 0 1
Beni 0 0 0 0 0 0
Pando 0 0 0 0 0 0
Fuente: Ministerio de Salud";

    #[test]
    fn test_grid_shape() {
        let grid = grid_from_text(PAGE).unwrap();
        assert_eq!(grid.len(), 11);
        assert_eq!(
            grid[0],
            vec![
                Some("Departamento".to_string()),
                Some("10-mar".to_string()),
                None,
                None,
                Some("11-mar".to_string()),
                None,
                None,
            ]
        );
        assert_eq!(grid[6][0].as_deref(), Some("Potosí"));
        assert_eq!(grid[8][1].as_deref(), Some("1.020"));
    }

    #[test]
    fn test_grid_feeds_grouping() {
        let grid = grid_from_text(PAGE).unwrap();
        let rows = align_rows(&grid, 1).unwrap();
        let roles = group_rows(&rows, Layout::Daily).unwrap();
        assert_eq!(roles[0].len(), 2);
        assert_eq!(roles[0][0].label, "10-mar");
        assert_eq!(roles[0][0].cells[Region::SantaCruz.index()], "1.020");
        assert_eq!(roles[1][0].cells[Region::SantaCruz.index()], "3");
        assert_eq!(roles[2][1].cells[Region::SantaCruz.index()], "1");
        assert_eq!(roles[0][1].cells[Region::LaPaz.index()], "2");
    }

    #[test]
    fn test_blank_cell_rejects_page() {
        let mut text = String::from("Departamento 10-mar 11-mar\n");
        for region in Region::ALL {
            if region == Region::Beni {
                // printed as `5 _ 6 | 7 8 9`
                text.push_str("Beni 5 6 7 8 9\n");
            } else {
                text.push_str(&format!("{} 0 0 0 0 0 0\n", region.as_str()));
            }
        }
        let grid = grid_from_text(&text).unwrap();
        assert_eq!(grid[2 + Region::Beni.index()].len(), 6);
        assert!(matches!(
            align_rows(&grid, 5),
            Err(Error::RaggedRow { page: 5, row, expected: 7, found: 6 }) if row == "Beni"
        ));
    }

    #[test]
    fn test_no_header() {
        assert!(grid_from_text("Chuquisaca 1 2 3").is_none());
    }

    #[test]
    fn test_uneven_width() {
        let text = "Departamento 10-mar 11-mar\nChuquisaca 1 2 3";
        assert!(grid_from_text(text).is_none());
    }

    #[test]
    fn test_stops_at_second_table() {
        let text = "Departamento 10-mar\nBeni 1 2 3\nDepartamento 10-mar\nBeni 7 7 7 7\nPando 9 9 9 9";
        let grid = grid_from_text(text).unwrap();
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[2][1].as_deref(), Some("1"));
    }
}
