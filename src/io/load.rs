//! CSV loading of the per-day forecast series.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::config::DataConfig;
use crate::error::DataError;
use crate::forecast::ForecastSet;

/// Largest float period that converts to an integer day without rounding (2^53).
const MAX_EXACT_PERIOD: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open \"{}\": {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("missing column `{column}` (found: {found})")]
    MissingColumn { column: String, found: String },
    #[error("row {row}: invalid {column} value \"{value}\"")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
    #[error("row {row}: period {period} appears more than once")]
    DuplicatePeriod { row: usize, period: usize },
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Reads one day-keyed series from CSV.
///
/// The reader must have a header row containing `period_column` and
/// `value_column`; other columns are ignored. Periods may be written as
/// integers or integral floats (`"3"` or `"3.0"`).
///
/// # Errors
///
/// Returns a [`LoadError`] for malformed CSV, a missing column, an
/// unparseable cell, or a repeated period.
pub fn read_series<R: Read>(
    reader: R,
    period_column: &str,
    value_column: &str,
) -> Result<BTreeMap<usize, f64>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    let period_idx = column_index(&headers, period_column)?;
    let value_idx = column_index(&headers, value_column)?;

    let mut series = BTreeMap::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        // header is row 1
        let row = i + 2;
        let period_raw = record.get(period_idx).unwrap_or("");
        let value_raw = record.get(value_idx).unwrap_or("");

        let period = parse_period(period_raw).ok_or_else(|| LoadError::InvalidValue {
            row,
            column: period_column.to_string(),
            value: period_raw.to_string(),
        })?;
        let value = value_raw
            .parse::<f64>()
            .map_err(|_| LoadError::InvalidValue {
                row,
                column: value_column.to_string(),
                value: value_raw.to_string(),
            })?;

        if series.insert(period, value).is_some() {
            return Err(LoadError::DuplicatePeriod { row, period });
        }
    }
    Ok(series)
}

/// Reads one series from a CSV file on disk.
///
/// # Errors
///
/// See [`read_series`]; also fails if the file cannot be opened.
pub fn read_series_file(
    path: &Path,
    period_column: &str,
    value_column: &str,
) -> Result<BTreeMap<usize, f64>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_series(io::BufReader::new(file), period_column, value_column)
}

/// Loads the production, price and coefficient files named in `data` and
/// validates them into a [`ForecastSet`].
///
/// # Errors
///
/// Returns a [`LoadError`] if a file is unreadable or malformed, or
/// [`LoadError::Data`] if the series are inconsistent.
pub fn load_forecast(data: &DataConfig) -> Result<ForecastSet, LoadError> {
    let cols = &data.columns;
    let production = read_series_file(&data.production_csv, &cols.period, &cols.production)?;
    let price = read_series_file(&data.price_csv, &cols.period, &cols.price)?;
    let coeff = read_series_file(&data.coeff_csv, &cols.period, &cols.coeff)?;
    let forecast = ForecastSet::from_series(&production, &price, &coeff)?;
    info!(horizon = forecast.horizon(), "loaded forecast from CSV");
    Ok(forecast)
}

fn column_index(headers: &csv::StringRecord, column: &str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| LoadError::MissingColumn {
            column: column.to_string(),
            found: headers.iter().collect::<Vec<_>>().join(", "),
        })
}

fn parse_period(raw: &str) -> Option<usize> {
    if let Ok(n) = raw.parse::<usize>() {
        return Some(n);
    }
    let f = raw.parse::<f64>().ok()?;
    if f.is_finite() && (0.0..=MAX_EXACT_PERIOD).contains(&f) && f.fract() == 0.0 {
        usize::try_from(f as u64).ok()
    } else {
        None
    }
}
