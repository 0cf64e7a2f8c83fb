//! Dataset loading with synthetic fallback

use super::synthetic::{generate_synthetic, DEFAULT_SYNTHETIC_ROWS, SYNTHETIC_SEED};
use super::{
    EmployeeRecord, SalaryDataset, COL_AGE, COL_EDUCATION, COL_EXPERIENCE, COL_GENDER,
    COL_JOB_TITLE, COL_SALARY, REQUIRED_COLUMNS,
};
use crate::error::{Result, SalaryError};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::{info, warn};

/// Load a salary CSV, validating the required columns.
///
/// Rows with a null in any required field are dropped, matching the source
/// application's behavior. Fails with [`SalaryError::DatasetUnavailable`] if
/// the file is missing, unreadable, lacks required columns, or yields no
/// usable rows.
pub fn load_csv(path: &Path) -> Result<SalaryDataset> {
    let file = File::open(path)
        .map_err(|e| SalaryError::DatasetUnavailable(format!("{}: {e}", path.display())))?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .into_reader_with_file_handle(file)
        .finish()
        .map_err(|e| SalaryError::DatasetUnavailable(format!("{}: {e}", path.display())))?;

    for col in REQUIRED_COLUMNS {
        if df.column(col).is_err() {
            return Err(SalaryError::DatasetUnavailable(format!(
                "missing required column '{col}'"
            )));
        }
    }

    let records = extract_records(&df)?;
    if records.is_empty() {
        return Err(SalaryError::DatasetUnavailable(
            "no complete rows in dataset".to_string(),
        ));
    }

    info!(rows = records.len(), path = %path.display(), "loaded salary dataset");
    SalaryDataset::new(records)
}

/// Load the dataset at `path`, falling back to the deterministic synthetic
/// table when the source is absent or malformed. Never fatal.
pub fn load_or_synthesize(path: Option<&Path>) -> Result<SalaryDataset> {
    if let Some(p) = path {
        match load_csv(p) {
            Ok(ds) => return Ok(ds),
            Err(e) => {
                warn!(error = %e, "falling back to synthetic dataset");
            }
        }
    }
    generate_synthetic(DEFAULT_SYNTHETIC_ROWS, SYNTHETIC_SEED)
}

fn numeric_column(df: &DataFrame, name: &str) -> Result<Float64Chunked> {
    let series = df
        .column(name)
        .map_err(|e| SalaryError::DataError(e.to_string()))?
        .as_materialized_series()
        .cast(&DataType::Float64)
        .map_err(|_| SalaryError::DatasetUnavailable(format!("column '{name}' is not numeric")))?;
    series
        .f64()
        .map(|ca| ca.clone())
        .map_err(|e| SalaryError::DataError(e.to_string()))
}

fn string_column(df: &DataFrame, name: &str) -> Result<StringChunked> {
    let column = df
        .column(name)
        .map_err(|e| SalaryError::DataError(e.to_string()))?;
    column
        .as_materialized_series()
        .str()
        .map(|ca| ca.clone())
        .map_err(|_| SalaryError::DatasetUnavailable(format!("column '{name}' is not textual")))
}

fn extract_records(df: &DataFrame) -> Result<Vec<EmployeeRecord>> {
    let ages = numeric_column(df, COL_AGE)?;
    let experience = numeric_column(df, COL_EXPERIENCE)?;
    let salaries = numeric_column(df, COL_SALARY)?;
    let genders = string_column(df, COL_GENDER)?;
    let education = string_column(df, COL_EDUCATION)?;
    let titles = string_column(df, COL_JOB_TITLE)?;

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        // dropna: skip any row with a missing required field
        let (age, exp, salary) = match (ages.get(i), experience.get(i), salaries.get(i)) {
            (Some(a), Some(e), Some(s)) => (a, e, s),
            _ => continue,
        };
        let (gender, edu, title) = match (genders.get(i), education.get(i), titles.get(i)) {
            (Some(g), Some(e), Some(t)) => (g, e, t),
            _ => continue,
        };

        if !age.is_finite() || !exp.is_finite() || !salary.is_finite() {
            continue;
        }

        records.push(EmployeeRecord {
            age: age as u32,
            gender: gender.to_string(),
            education: edu.to_string(),
            job_title: title.to_string(),
            years_experience: exp as u32,
            salary,
        });
    }

    Ok(records)
}
