use crate::error::DataError;
use crate::types::{RawRow, TourismRecord};
use crate::util::{canonical_month, parse_i32_safe, parse_month_year};
use chrono::Datelike;
use csv::{ReaderBuilder, Trim};
use once_cell::unsync::OnceCell;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub distinct_years: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
}

/// The loaded table. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<TourismRecord>,
}

impl Dataset {
    pub fn new(records: Vec<TourismRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TourismRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct states in order of first appearance.
    pub fn states(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.records
            .iter()
            .map(|r| r.state.as_str())
            .filter(|s| seen.insert(*s))
            .collect()
    }

    pub fn has_state(&self, state: &str) -> bool {
        self.records.iter().any(|r| r.state == state)
    }

    /// `(first, last)` observed year, `None` for an empty table.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let first = self.records.iter().map(|r| r.year).min()?;
        let last = self.records.iter().map(|r| r.year).max()?;
        Some((first, last))
    }

    pub fn report(&self) -> LoadReport {
        let years: BTreeSet<i32> = self.records.iter().map(|r| r.year).collect();
        LoadReport {
            total_rows: self.records.len(),
            distinct_years: years.len(),
            first_year: years.first().copied(),
            last_year: years.last().copied(),
        }
    }
}

/// Read and normalize the tourism CSV. Any malformed row aborts the load.
pub fn load_dataset(path: &Path) -> Result<Dataset, DataError> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)?;
    let mut records: Vec<TourismRecord> = Vec::new();

    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        let row = result?;

        let month_year = parse_month_year(&row.month_year).ok_or_else(|| {
            DataError::UnparsableTemporal { line, value: row.month_year.clone() }
        })?;
        // `ano` must agree with the year inside `mes_ano`.
        let year = parse_i32_safe(Some(&row.year))
            .filter(|y| *y == month_year.year())
            .ok_or_else(|| DataError::InvalidYear { line, value: row.year.clone() })?;
        let month = canonical_month(&row.month)
            .ok_or_else(|| DataError::UnknownMonth { line, value: row.month.clone() })?;

        records.push(TourismRecord {
            month_year,
            year,
            month,
            country: row.country,
            state: row.state,
            region: row.region,
            arrival_channel: row.arrival_channel,
        });
    }

    let dataset = Dataset::new(records);
    let report = dataset.report();
    log::info!(
        "Loaded {} records from {} ({} distinct years, {:?}..={:?})",
        report.total_rows,
        path.display(),
        report.distinct_years,
        report.first_year,
        report.last_year
    );
    Ok(dataset)
}

/// Single-slot, lazily filled cache for the one dataset of a run.
///
/// Owned by the composition root and handed to the pages by reference; the
/// file is read on the first `get` only.
pub struct DatasetCache {
    path: PathBuf,
    cell: OnceCell<Dataset>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), cell: OnceCell::new() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn get(&self) -> Result<&Dataset, DataError> {
        if let Some(dataset) = self.cell.get() {
            log::debug!("Dataset cache hit for {}", self.path.display());
            return Ok(dataset);
        }
        self.cell.get_or_try_init(|| load_dataset(&self.path))
    }
}
