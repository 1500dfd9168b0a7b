// src/store.rs

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use csv::{ReaderBuilder, Writer};
use std::{
    fs::{self, File},
    io::{BufWriter, Read, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::Error;
use crate::region::{Region, REGION_COUNT};
use crate::series::{Series, SeriesName};

/// Header of the date column.
pub const DATE_COLUMN: &str = "Fecha";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// CSV-backed series storage: one `<name>.csv` per series in `dir`.
pub struct SeriesStore {
    dir: PathBuf,
}

impl SeriesStore {
    /// Open the store at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating data directory {:?}", &dir))?;
        Ok(Self { dir })
    }

    pub fn path(&self, name: SeriesName) -> PathBuf {
        self.dir.join(format!("{}.csv", name))
    }

    /// Load a series; a missing file is an empty series.
    pub fn load(&self, name: SeriesName) -> Result<Series> {
        let path = self.path(name);
        if !path.exists() {
            debug!(series = %name, "no persisted series");
            return Ok(Series::new());
        }
        let file = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
        read_series(file).with_context(|| format!("reading {}", path.display()))
    }

    /// Last persisted date of a series, if any.
    pub fn last_date(&self, name: SeriesName) -> Result<Option<NaiveDate>> {
        Ok(self.load(name)?.last_date())
    }

    /// Replace one series file atomically.
    pub fn save(&self, name: SeriesName, series: &Series) -> Result<()> {
        self.save_all(&[(name, series.clone())])
    }

    /// Write every series to a temporary file first, then move them all into place.
    ///
    /// A failure while writing, or a target that cannot be replaced (such as a
    /// directory in its place), leaves every existing file untouched. The
    /// renames themselves run one after another: if one fails at the OS level,
    /// the files already renamed keep their new content.
    pub fn save_all(&self, all: &[(SeriesName, Series)]) -> Result<()> {
        let mut staged = Vec::with_capacity(all.len());
        for (name, series) in all {
            let tmp = NamedTempFile::new_in(&self.dir)
                .with_context(|| format!("creating temp file in {}", self.dir.display()))?;
            let mut out = BufWriter::new(tmp);
            write_series(&mut out, series).with_context(|| format!("writing {}", name))?;
            let tmp = out
                .into_inner()
                .map_err(|e| anyhow!("flushing {}: {}", name, e.error()))?;
            staged.push((*name, tmp));
        }
        for (name, _) in &staged {
            let path = self.path(*name);
            if path.is_dir() {
                bail!("cannot replace {}: it is a directory", path.display());
            }
        }
        for (name, tmp) in staged {
            let path = self.path(name);
            tmp.persist(&path)
                .with_context(|| format!("replacing {}", path.display()))?;
            info!(series = %name, path = %path.display(), "saved series");
        }
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Write `Fecha,<regions...>` then one row per date, ascending.
pub fn write_series<W: Write>(w: W, series: &Series) -> Result<()> {
    let mut wtr = Writer::from_writer(w);
    let mut header = vec![DATE_COLUMN];
    header.extend(Region::ALL.iter().map(|r| r.as_str()));
    wtr.write_record(&header)?;

    for (date, counts) in series.iter() {
        let mut record = Vec::with_capacity(REGION_COUNT + 1);
        record.push(date.format(DATE_FORMAT).to_string());
        record.extend(counts.iter().map(|c| c.to_string()));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Read a series written by `write_series`. The first column is the date;
/// region columns are matched by name and any missing one reads as 0.
pub fn read_series<R: Read>(r: R) -> Result<Series> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(r);
    let headers = rdr.headers()?.clone();
    let columns: Vec<(usize, Region)> = headers
        .iter()
        .enumerate()
        .skip(1)
        .filter_map(|(i, h)| Region::from_header(h).map(|r| (i, r)))
        .collect();

    let mut series = Series::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("CSV parse error at record {}", idx))?;
        let raw_date = record.get(0).unwrap_or("").trim();
        // tolerate a trailing time component
        let date = NaiveDate::parse_from_str(raw_date.get(..10).unwrap_or(raw_date), DATE_FORMAT)
            .map_err(|_| Error::MalformedDate(raw_date.to_string()))?;

        let mut counts = [0; REGION_COUNT];
        for (i, region) in &columns {
            let cell = record.get(*i).unwrap_or("").trim();
            counts[region.index()] = if cell.is_empty() {
                0
            } else {
                cell.parse::<u64>()
                    .map_err(|_| Error::MalformedNumber(cell.to_string()))?
            };
        }
        series.insert(date, counts);
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample() -> Series {
        let mut s = Series::new();
        s.insert(d(2020, 3, 11), [0, 1, 2, 3, 4, 5, 6, 7, 8]);
        s.insert(d(2020, 3, 10), [10; REGION_COUNT]);
        s
    }

    #[test]
    fn test_csv_layout() {
        let mut buf = Vec::new();
        write_series(&mut buf, &sample()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Fecha,Chuquisaca,La Paz,Cochabamba,Oruro,Potosí,Tarija,Santa Cruz,Beni,Pando"
        );
        assert_eq!(lines[1], "2020-03-10,10,10,10,10,10,10,10,10,10");
        assert_eq!(lines[2], "2020-03-11,0,1,2,3,4,5,6,7,8");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_read_tolerates_reordered_and_missing_columns() {
        let text = "Fecha,Pando,Chuquisaca\n2020-03-10 00:00:00,4,2\n2020-03-11,,1\n";
        let s = read_series(text.as_bytes()).unwrap();
        let first = s.get(d(2020, 3, 10)).unwrap();
        assert_eq!(first[Region::Pando.index()], 4);
        assert_eq!(first[Region::Chuquisaca.index()], 2);
        assert_eq!(first[Region::Beni.index()], 0);
        assert_eq!(s.get(d(2020, 3, 11)).unwrap()[Region::Pando.index()], 0);
    }

    #[test]
    fn test_read_rejects_bad_cells() {
        let bad_number = "Fecha,Beni\n2020-03-10,x\n";
        let err = read_series(bad_number.as_bytes()).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::MalformedNumber(_))));

        let bad_date = "Fecha,Beni\n10/03/2020,1\n";
        let err = read_series(bad_date.as_bytes()).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::MalformedDate(_))));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let tmp = tempdir().unwrap();
        let store = SeriesStore::new(tmp.path()).unwrap();
        assert!(store.load(SeriesName::DecesosDiarios).unwrap().is_empty());
        assert_eq!(store.last_date(SeriesName::DecesosDiarios).unwrap(), None);
    }

    #[test]
    fn test_save_and_reload() {
        let tmp = tempdir().unwrap();
        let store = SeriesStore::new(tmp.path().join("data")).unwrap();
        store.save(SeriesName::ActivosAcumulados, &sample()).unwrap();

        assert!(tmp.path().join("data/activos_acumulados.csv").exists());
        let back = store.load(SeriesName::ActivosAcumulados).unwrap();
        assert_eq!(back, sample());
        assert_eq!(
            store.last_date(SeriesName::ActivosAcumulados).unwrap(),
            Some(d(2020, 3, 11))
        );

        // no temp files left behind
        let entries = fs::read_dir(store.dir()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_save_all_checks_every_target_first() {
        let tmp = tempdir().unwrap();
        let store = SeriesStore::new(tmp.path()).unwrap();
        fs::create_dir(store.path(SeriesName::DecesosDiarios)).unwrap();

        let all = [
            (SeriesName::ConfirmadosDiarios, sample()),
            (SeriesName::DecesosDiarios, sample()),
        ];
        assert!(store.save_all(&all).is_err());

        // nothing was moved into place and no temp files remain
        assert!(!store.path(SeriesName::ConfirmadosDiarios).exists());
        let entries = fs::read_dir(store.dir()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_save_is_byte_stable() {
        let tmp = tempdir().unwrap();
        let store = SeriesStore::new(tmp.path()).unwrap();
        store.save(SeriesName::ConfirmadosDiarios, &sample()).unwrap();
        let first = fs::read(store.path(SeriesName::ConfirmadosDiarios)).unwrap();
        let reloaded = store.load(SeriesName::ConfirmadosDiarios).unwrap();
        store.save(SeriesName::ConfirmadosDiarios, &reloaded).unwrap();
        let second = fs::read(store.path(SeriesName::ConfirmadosDiarios)).unwrap();
        assert_eq!(first, second);
    }
}
