//! Feature schema and category mappings
//!
//! The schema is the ordered list of feature column names frozen at fit time.
//! Every inference input is projected onto exactly this schema, in this
//! order, before reaching the model.

mod encoder;

pub use encoder::FeatureEncoder;

use crate::dataset::EmployeeRecord;
use crate::error::{Result, SalaryError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A raw what-if input, one prospective employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub age: u32,
    pub gender: String,
    pub education: String,
    pub job_title: String,
    pub years_experience: u32,
}

impl From<&EmployeeRecord> for PredictionRequest {
    fn from(r: &EmployeeRecord) -> Self {
        Self {
            age: r.age,
            gender: r.gender.clone(),
            education: r.education.clone(),
            job_title: r.job_title.clone(),
            years_experience: r.years_experience,
        }
    }
}

/// Frozen ordered list of feature column names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    columns: Vec<String>,
}

impl FeatureSchema {
    pub(crate) fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Column names, in schema order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of feature columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column in the schema, if present
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Deterministic mapping from a categorical field's levels to numeric codes.
///
/// Levels are ordered lexicographically at fit time and the mapping is stored
/// for reuse; it is never re-derived at inference time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMap {
    field: String,
    levels: BTreeMap<String, f64>,
}

impl CategoryMap {
    /// Build a map from the observed category set (codes follow sort order)
    pub fn from_observed<I, S>(field: &str, observed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = observed.into_iter().map(Into::into).collect();
        unique.sort();
        unique.dedup();

        let levels = unique
            .into_iter()
            .enumerate()
            .map(|(i, level)| (level, i as f64))
            .collect();

        Self {
            field: field.to_string(),
            levels,
        }
    }

    /// Encode a value using the stored mapping
    pub fn encode(&self, value: &str) -> Result<f64> {
        self.levels
            .get(value)
            .copied()
            .ok_or_else(|| SalaryError::UnknownCategory {
                field: self.field.clone(),
                value: value.to_string(),
            })
    }

    /// Known levels, in code order
    pub fn levels(&self) -> Vec<&str> {
        let mut entries: Vec<(&str, f64)> = self
            .levels
            .iter()
            .map(|(k, &v)| (k.as_str(), v))
            .collect();
        entries.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        entries.into_iter().map(|(k, _)| k).collect()
    }

    /// Field this map encodes
    pub fn field(&self) -> &str {
        &self.field
    }
}
