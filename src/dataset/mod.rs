//! Employee salary dataset
//!
//! Owns the raw tabular records, their canonical CSV rendering (used both for
//! export and for content hashing), and the descriptive aggregates behind the
//! original dashboard views.

mod loader;
pub mod summary;
pub mod synthetic;

pub use loader::{load_csv, load_or_synthesize};
pub use summary::{pearson, DatasetSummary};
pub use synthetic::{generate_synthetic, JOB_TITLE_CATALOG, SYNTHETIC_SEED};

use crate::error::{Result, SalaryError};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Required dataset columns, in canonical order
pub const COL_AGE: &str = "Age";
pub const COL_GENDER: &str = "Gender";
pub const COL_EDUCATION: &str = "Education Level";
pub const COL_JOB_TITLE: &str = "Job Title";
pub const COL_EXPERIENCE: &str = "Years of Experience";
pub const COL_SALARY: &str = "Salary";

/// All required columns in canonical order
pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_AGE,
    COL_GENDER,
    COL_EDUCATION,
    COL_JOB_TITLE,
    COL_EXPERIENCE,
    COL_SALARY,
];

/// One raw employee record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub age: u32,
    pub gender: String,
    pub education: String,
    pub job_title: String,
    pub years_experience: u32,
    pub salary: f64,
}

/// Experience bucket used by the dashboard aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExperienceBand {
    Y0to5,
    Y6to10,
    Y11to15,
    Y16to20,
    Y20plus,
}

impl ExperienceBand {
    /// Bucket a raw experience value
    pub fn from_years(years: u32) -> Self {
        match years {
            0..=5 => Self::Y0to5,
            6..=10 => Self::Y6to10,
            11..=15 => Self::Y11to15,
            16..=20 => Self::Y16to20,
            _ => Self::Y20plus,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Y0to5 => "0-5 yrs",
            Self::Y6to10 => "6-10 yrs",
            Self::Y11to15 => "11-15 yrs",
            Self::Y16to20 => "16-20 yrs",
            Self::Y20plus => "20+ yrs",
        }
    }
}

impl std::fmt::Display for ExperienceBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// In-memory salary dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryDataset {
    records: Vec<EmployeeRecord>,
}

impl SalaryDataset {
    /// Build a dataset from records
    pub fn new(records: Vec<EmployeeRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(SalaryError::ValidationError(
                "dataset must contain at least one record".to_string(),
            ));
        }
        Ok(Self { records })
    }

    /// Access the raw records
    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Observed (min, max) of the Salary column
    pub fn salary_range(&self) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for r in &self.records {
            if r.salary < min {
                min = r.salary;
            }
            if r.salary > max {
                max = r.salary;
            }
        }
        (min, max)
    }

    /// Canonical CSV rendering: fixed column order, fixed salary precision.
    /// The same records always render to the same bytes.
    pub fn to_canonical_csv(&self) -> String {
        let mut out = String::with_capacity(self.records.len() * 64);
        out.push_str(&REQUIRED_COLUMNS.join(","));
        out.push('\n');
        for r in &self.records {
            out.push_str(&format!(
                "{},{},{},{},{},{:.2}\n",
                r.age, r.gender, r.education, r.job_title, r.years_experience, r.salary
            ));
        }
        out
    }

    /// SHA-256 over the canonical CSV rendering; used as the model-cache key
    pub fn content_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.to_canonical_csv().as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Convert to a polars DataFrame with the canonical columns
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let ages: Vec<i64> = self.records.iter().map(|r| r.age as i64).collect();
        let genders: Vec<&str> = self.records.iter().map(|r| r.gender.as_str()).collect();
        let education: Vec<&str> = self.records.iter().map(|r| r.education.as_str()).collect();
        let titles: Vec<&str> = self.records.iter().map(|r| r.job_title.as_str()).collect();
        let experience: Vec<i64> = self
            .records
            .iter()
            .map(|r| r.years_experience as i64)
            .collect();
        let salaries: Vec<f64> = self.records.iter().map(|r| r.salary).collect();

        DataFrame::new(vec![
            Column::new(COL_AGE.into(), ages),
            Column::new(COL_GENDER.into(), genders),
            Column::new(COL_EDUCATION.into(), education),
            Column::new(COL_JOB_TITLE.into(), titles),
            Column::new(COL_EXPERIENCE.into(), experience),
            Column::new(COL_SALARY.into(), salaries),
        ])
        .map_err(|e| SalaryError::DataError(e.to_string()))
    }

    /// Write the dataset as CSV
    pub fn write_csv(&self, path: &std::path::Path) -> Result<()> {
        let mut df = self.to_dataframe()?;
        let mut file = std::fs::File::create(path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)
            .map_err(|e| SalaryError::DataError(e.to_string()))?;
        Ok(())
    }
}
