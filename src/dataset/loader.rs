//! CSV Loader
//!
//! Reads the three source tables into memory. Only the columns the
//! dashboard needs are read; any extra columns in the files are ignored.
//!
//! Count cells are tolerant of the shapes found in public exports: blank
//! cells, float renderings (`"1234.0"`) and thousands separators
//! (`"1,234"`).

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::error::{DatasetError, DatasetResult};
use super::types::{CaseRecord, RegionTable, StateCodeLookup, StateRecord, StateTable};

const CASE_COLUMNS: &[&str] = &[
    "date",
    "iso_code",
    "location",
    "total_cases",
    "new_cases",
    "total_deaths",
    "new_deaths",
    "continent",
];
const STATE_COLUMNS: &[&str] = &["State", "Total Cases", "Total Deaths"];
const STATE_CODE_COLUMNS: &[&str] = &["State", "Code"];

/// Locations of the three source files
#[derive(Debug, Clone)]
pub struct DatasetPaths {
    pub covid_csv: PathBuf,
    pub usa_csv: PathBuf,
    pub state_codes_csv: PathBuf,
}

/// All tables the dashboard reads, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub cases: RegionTable,
    pub states: StateTable,
    pub state_codes: StateCodeLookup,
}

/// Row counts and coverage of a loaded dataset
#[derive(Debug, Clone, Serialize)]
pub struct DatasetStats {
    pub case_rows: usize,
    pub regions: usize,
    pub states: usize,
    pub state_codes: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl fmt::Display for DatasetStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} case rows across {} regions, {} states, {} state codes",
            self.case_rows, self.regions, self.states, self.state_codes
        )?;
        if let (Some(first), Some(last)) = (self.first_date, self.last_date) {
            write!(f, " ({} to {})", first, last)?;
        }
        Ok(())
    }
}

impl Dataset {
    pub fn new(cases: RegionTable, states: StateTable, state_codes: StateCodeLookup) -> Self {
        Self {
            cases,
            states,
            state_codes,
        }
    }

    /// Load all three tables, failing on the first unreadable file
    pub fn load(paths: &DatasetPaths) -> DatasetResult<Self> {
        let cases = load_cases(&paths.covid_csv)?;
        let states = load_states(&paths.usa_csv)?;
        let state_codes = load_state_codes(&paths.state_codes_csv)?;

        let dataset = Self::new(cases, states, state_codes);
        tracing::info!(stats = %dataset.stats(), "Dataset loaded");
        Ok(dataset)
    }

    pub fn stats(&self) -> DatasetStats {
        let range = self.cases.date_range();
        DatasetStats {
            case_rows: self.cases.len(),
            regions: self.cases.region_codes().len(),
            states: self.states.len(),
            state_codes: self.state_codes.len(),
            first_date: range.map(|(first, _)| first),
            last_date: range.map(|(_, last)| last),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CaseRow {
    date: NaiveDate,
    iso_code: String,
    location: String,
    #[serde(deserialize_with = "count")]
    total_cases: Option<i64>,
    #[serde(deserialize_with = "count")]
    new_cases: Option<i64>,
    #[serde(deserialize_with = "count")]
    total_deaths: Option<i64>,
    #[serde(deserialize_with = "count")]
    new_deaths: Option<i64>,
    continent: Option<String>,
}

impl From<CaseRow> for CaseRecord {
    fn from(row: CaseRow) -> Self {
        CaseRecord {
            date: row.date,
            region_code: row.iso_code,
            region_name: row.location,
            total_cases: row.total_cases,
            new_cases: row.new_cases,
            total_deaths: row.total_deaths,
            new_deaths: row.new_deaths,
            continent: row.continent,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StateRow {
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Total Cases", deserialize_with = "count")]
    total_cases: Option<i64>,
    #[serde(rename = "Total Deaths", deserialize_with = "count")]
    total_deaths: Option<i64>,
}

impl From<StateRow> for StateRecord {
    fn from(row: StateRow) -> Self {
        StateRecord::new(
            row.state,
            row.total_cases.unwrap_or(0),
            row.total_deaths.unwrap_or(0),
        )
    }
}

#[derive(Debug, Deserialize)]
struct StateCodeRow {
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Code")]
    code: String,
}

/// Load the global time series from a file
pub fn load_cases(path: &Path) -> DatasetResult<RegionTable> {
    let table = read_cases(open(path)?, &table_name(path))?;
    tracing::info!(path = %path.display(), rows = table.len(), "Loaded case table");
    Ok(table)
}

/// Load the US state summary from a file
pub fn load_states(path: &Path) -> DatasetResult<StateTable> {
    let table = read_states(open(path)?, &table_name(path))?;
    tracing::info!(path = %path.display(), rows = table.len(), "Loaded state table");
    Ok(table)
}

/// Load the state name to code lookup from a file
pub fn load_state_codes(path: &Path) -> DatasetResult<StateCodeLookup> {
    let lookup = read_state_codes(open(path)?, &table_name(path))?;
    tracing::info!(path = %path.display(), rows = lookup.len(), "Loaded state code lookup");
    Ok(lookup)
}

/// Read the global time series from any reader
pub fn read_cases<R: Read>(reader: R, table: &str) -> DatasetResult<RegionTable> {
    let rows: Vec<CaseRow> = read_rows(reader, table, CASE_COLUMNS)?;
    Ok(RegionTable::from_records(
        rows.into_iter().map(CaseRecord::from).collect(),
    ))
}

/// Read the US state summary from any reader
pub fn read_states<R: Read>(reader: R, table: &str) -> DatasetResult<StateTable> {
    let rows: Vec<StateRow> = read_rows(reader, table, STATE_COLUMNS)?;
    Ok(StateTable::from_records(
        rows.into_iter().map(StateRecord::from).collect(),
    ))
}

/// Read the state code lookup from any reader
pub fn read_state_codes<R: Read>(reader: R, table: &str) -> DatasetResult<StateCodeLookup> {
    let rows: Vec<StateCodeRow> = read_rows(reader, table, STATE_CODE_COLUMNS)?;
    Ok(StateCodeLookup::from_pairs(
        rows.into_iter().map(|r| (r.state, r.code)),
    ))
}

fn open(path: &Path) -> DatasetResult<File> {
    File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn table_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn read_rows<T, R>(reader: R, table: &str, required: &[&str]) -> DatasetResult<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
    R: Read,
{
    let csv_err = |source| DatasetError::Csv {
        table: table.to_string(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(csv_err)?.clone();
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(DatasetError::MissingColumn {
                table: table.to_string(),
                column: column.to_string(),
            });
        }
    }

    reader
        .deserialize::<T>()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(csv_err)
}

fn count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) => parse_count(&s).map_err(serde::de::Error::custom),
    }
}

/// Parse a count cell: blank is `None`, floats are rounded, separators stripped
pub fn parse_count(raw: &str) -> Result<Option<i64>, String> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Ok(None);
    }
    if let Ok(value) = cleaned.parse::<i64>() {
        return Ok(Some(value));
    }
    let value: f64 = cleaned
        .parse()
        .map_err(|_| format!("invalid count: {}", raw))?;
    let rounded = value.round();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if !rounded.is_finite() || rounded < i64::MIN as f64 || rounded >= i64::MAX as f64 {
        return Err(format!("count out of range: {}", raw));
    }
    Ok(Some(rounded as i64))
}
