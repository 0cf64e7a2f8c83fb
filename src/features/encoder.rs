//! Feature encoding and schema alignment
//!
//! Fit-time behavior: expand every observed category. Inference-time
//! behavior: project onto the frozen schema, dropping indicator columns the
//! schema does not know and zero-filling schema columns the input lacks.
//! This asymmetry is the load-bearing invariant of the whole pipeline.

use super::{CategoryMap, FeatureSchema, PredictionRequest};
use crate::dataset::{SalaryDataset, COL_AGE, COL_EDUCATION, COL_EXPERIENCE, COL_GENDER, COL_JOB_TITLE};
use crate::error::{Result, SalaryError};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Encodes raw employee attributes into the frozen numeric feature schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureEncoder {
    /// Numeric passthrough columns, in schema order
    numeric_columns: Vec<String>,
    /// Stored gender mapping, established at fit time
    gender_map: Option<CategoryMap>,
    /// Sorted category levels per one-hot field; the first level is the
    /// dropped reference category
    categorical_levels: BTreeMap<String, Vec<String>>,
    /// Frozen ordered schema
    schema: Option<FeatureSchema>,
    is_fitted: bool,
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureEncoder {
    pub fn new() -> Self {
        Self {
            numeric_columns: vec![COL_AGE.to_string(), COL_EXPERIENCE.to_string()],
            gender_map: None,
            categorical_levels: BTreeMap::new(),
            schema: None,
            is_fitted: false,
        }
    }

    /// Derive category sets from the training data and freeze the schema.
    ///
    /// Deterministic: levels are sorted lexicographically, so the same
    /// dataset always yields the same schema and the same gender mapping.
    pub fn fit(&mut self, dataset: &SalaryDataset) -> Result<&mut Self> {
        let records = dataset.records();

        let genders: BTreeSet<&str> = records.iter().map(|r| r.gender.as_str()).collect();
        let education: BTreeSet<&str> = records.iter().map(|r| r.education.as_str()).collect();
        let titles: BTreeSet<&str> = records.iter().map(|r| r.job_title.as_str()).collect();

        self.gender_map = Some(CategoryMap::from_observed(COL_GENDER, genders));
        self.categorical_levels.clear();
        self.categorical_levels.insert(
            COL_EDUCATION.to_string(),
            education.into_iter().map(str::to_string).collect(),
        );
        self.categorical_levels.insert(
            COL_JOB_TITLE.to_string(),
            titles.into_iter().map(str::to_string).collect(),
        );

        // Schema order: numeric passthroughs, encoded gender, then indicator
        // columns per field with the reference (first) level dropped.
        let mut columns = self.numeric_columns.clone();
        columns.push(COL_GENDER.to_string());
        for field in [COL_EDUCATION, COL_JOB_TITLE] {
            let levels = &self.categorical_levels[field];
            for level in levels.iter().skip(1) {
                columns.push(indicator_name(field, level));
            }
        }

        let schema = FeatureSchema::new(columns);
        debug!(n_features = schema.len(), "froze feature schema");
        self.schema = Some(schema);
        self.is_fitted = true;
        Ok(self)
    }

    /// Encode the full dataset into the feature matrix (rows follow the
    /// dataset, columns follow the frozen schema)
    pub fn transform(&self, dataset: &SalaryDataset) -> Result<Array2<f64>> {
        let schema = self.schema()?;
        let n = dataset.len();
        let mut x = Array2::zeros((n, schema.len()));

        for (i, record) in dataset.records().iter().enumerate() {
            let row = self.encode_record(&PredictionRequest::from(record))?;
            for (j, &v) in row.iter().enumerate() {
                x[[i, j]] = v;
            }
        }

        Ok(x)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, dataset: &SalaryDataset) -> Result<Array2<f64>> {
        self.fit(dataset)?;
        self.transform(dataset)
    }

    /// Project a single raw record onto the frozen schema.
    ///
    /// Unknown Gender fails with `UnknownCategory`. Unknown education or job
    /// categories are tolerated: their indicator column is not in the schema
    /// and is silently dropped, so the category contributes no signal.
    pub fn encode_record(&self, request: &PredictionRequest) -> Result<Array1<f64>> {
        let schema = self.schema()?;
        let gender_map = self.gender_map.as_ref().ok_or(SalaryError::ModelNotFitted)?;

        // Freshly encoded input: feature name -> value
        let mut values: BTreeMap<String, f64> = BTreeMap::new();
        values.insert(COL_AGE.to_string(), request.age as f64);
        values.insert(COL_EXPERIENCE.to_string(), request.years_experience as f64);
        values.insert(COL_GENDER.to_string(), gender_map.encode(&request.gender)?);

        for (field, raw) in [
            (COL_EDUCATION, request.education.as_str()),
            (COL_JOB_TITLE, request.job_title.as_str()),
        ] {
            let reference = self
                .categorical_levels
                .get(field)
                .and_then(|levels| levels.first());
            // The reference category is represented by all-zero indicators;
            // anything else gets an indicator that projection either keeps
            // (known level) or drops (level never seen at fit time).
            if reference.map(|r| r.as_str()) != Some(raw) {
                values.insert(indicator_name(field, raw), 1.0);
            }
        }

        // Align to the schema: keep schema columns (zero-filling the absent
        // ones), drop everything the schema does not know.
        let mut aligned = Vec::with_capacity(schema.len());
        for column in schema.columns() {
            aligned.push(values.remove(column).unwrap_or(0.0));
        }

        if !values.is_empty() {
            debug!(dropped = values.len(), "dropped encoder columns not in schema");
        }

        if aligned.len() != schema.len() {
            return Err(SalaryError::SchemaMismatch {
                expected: format!("{} columns", schema.len()),
                actual: format!("{} columns", aligned.len()),
            });
        }

        Ok(Array1::from_vec(aligned))
    }

    /// Extract the regression target (Salary)
    pub fn target(&self, dataset: &SalaryDataset) -> Array1<f64> {
        Array1::from_iter(dataset.records().iter().map(|r| r.salary))
    }

    /// The frozen schema
    pub fn schema(&self) -> Result<&FeatureSchema> {
        self.schema.as_ref().ok_or(SalaryError::ModelNotFitted)
    }

    /// The stored gender mapping
    pub fn gender_map(&self) -> Result<&CategoryMap> {
        self.gender_map.as_ref().ok_or(SalaryError::ModelNotFitted)
    }

    /// Category levels observed at fit time for a one-hot field
    pub fn levels(&self, field: &str) -> Option<&[String]> {
        self.categorical_levels.get(field).map(Vec::as_slice)
    }
}

fn indicator_name(field: &str, level: &str) -> String {
    format!("{field}_{level}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::EmployeeRecord;

    fn record(gender: &str, education: &str, title: &str) -> EmployeeRecord {
        EmployeeRecord {
            age: 30,
            gender: gender.to_string(),
            education: education.to_string(),
            job_title: title.to_string(),
            years_experience: 5,
            salary: 70000.0,
        }
    }

    fn small_dataset() -> SalaryDataset {
        SalaryDataset::new(vec![
            record("Male", "Bachelor's", "Data Analyst"),
            record("Female", "Master's", "Software Engineer"),
            record("Female", "PhD", "Director"),
        ])
        .unwrap()
    }

    #[test]
    fn test_schema_layout() {
        let mut encoder = FeatureEncoder::new();
        encoder.fit(&small_dataset()).unwrap();
        let schema = encoder.schema().unwrap();

        // Numeric passthroughs first, then gender, then indicators with the
        // lexicographically first level of each field dropped.
        assert_eq!(
            schema.columns(),
            &[
                "Age".to_string(),
                "Years of Experience".to_string(),
                "Gender".to_string(),
                "Education Level_Master's".to_string(),
                "Education Level_PhD".to_string(),
                "Job Title_Director".to_string(),
                "Job Title_Software Engineer".to_string(),
            ]
        );
    }

    #[test]
    fn test_fit_is_deterministic() {
        let ds = small_dataset();
        let mut a = FeatureEncoder::new();
        let mut b = FeatureEncoder::new();
        a.fit(&ds).unwrap();
        b.fit(&ds).unwrap();

        assert_eq!(a.schema().unwrap(), b.schema().unwrap());
        assert_eq!(a.gender_map().unwrap(), b.gender_map().unwrap());
    }

    #[test]
    fn test_reference_category_encodes_to_zero_indicators() {
        let mut encoder = FeatureEncoder::new();
        encoder.fit(&small_dataset()).unwrap();

        // Bachelor's and Data Analyst are the reference levels
        let row = encoder
            .encode_record(&PredictionRequest {
                age: 30,
                gender: "Male".to_string(),
                education: "Bachelor's".to_string(),
                job_title: "Data Analyst".to_string(),
                years_experience: 5,
            })
            .unwrap();

        assert_eq!(row.to_vec(), vec![30.0, 5.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_known_category_sets_indicator() {
        let mut encoder = FeatureEncoder::new();
        encoder.fit(&small_dataset()).unwrap();
        let schema = encoder.schema().unwrap().clone();

        let row = encoder
            .encode_record(&PredictionRequest {
                age: 41,
                gender: "Female".to_string(),
                education: "PhD".to_string(),
                job_title: "Director".to_string(),
                years_experience: 12,
            })
            .unwrap();

        let phd = schema.index_of("Education Level_PhD").unwrap();
        let director = schema.index_of("Job Title_Director").unwrap();
        assert_eq!(row[phd], 1.0);
        assert_eq!(row[director], 1.0);
        assert_eq!(row[schema.index_of("Gender").unwrap()], 0.0);
    }

    #[test]
    fn test_unknown_gender_is_an_error() {
        let mut encoder = FeatureEncoder::new();
        encoder.fit(&small_dataset()).unwrap();

        let err = encoder
            .encode_record(&PredictionRequest {
                age: 30,
                gender: "Nonbinary".to_string(),
                education: "PhD".to_string(),
                job_title: "Director".to_string(),
                years_experience: 5,
            })
            .unwrap_err();
        assert!(matches!(err, SalaryError::UnknownCategory { .. }));
    }

    #[test]
    fn test_unseen_job_title_is_dropped_silently() {
        let mut encoder = FeatureEncoder::new();
        encoder.fit(&small_dataset()).unwrap();
        let schema = encoder.schema().unwrap().clone();

        let row = encoder
            .encode_record(&PredictionRequest {
                age: 30,
                gender: "Male".to_string(),
                education: "Master's".to_string(),
                job_title: "Chief Vibes Officer".to_string(),
                years_experience: 5,
            })
            .unwrap();

        // Vector still matches the schema exactly; all job indicators zero
        assert_eq!(row.len(), schema.len());
        for level in ["Director", "Software Engineer"] {
            let idx = schema.index_of(&format!("Job Title_{level}")).unwrap();
            assert_eq!(row[idx], 0.0);
        }
    }

    #[test]
    fn test_unfitted_encoder_errors() {
        let encoder = FeatureEncoder::new();
        let err = encoder
            .encode_record(&PredictionRequest {
                age: 30,
                gender: "Male".to_string(),
                education: "PhD".to_string(),
                job_title: "Director".to_string(),
                years_experience: 5,
            })
            .unwrap_err();
        assert!(matches!(err, SalaryError::ModelNotFitted));
    }

    #[test]
    fn test_transform_shape() {
        let ds = small_dataset();
        let mut encoder = FeatureEncoder::new();
        let x = encoder.fit_transform(&ds).unwrap();
        assert_eq!(x.nrows(), 3);
        assert_eq!(x.ncols(), encoder.schema().unwrap().len());

        let y = encoder.target(&ds);
        assert_eq!(y.len(), 3);
    }
}
