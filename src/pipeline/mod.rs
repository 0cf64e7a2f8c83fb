//! Salary prediction pipeline
//!
//! Ties the feature encoder and the regression forest together: fit once per
//! dataset, then answer any number of what-if requests. A fitted predictor is
//! immutable and safe to share across threads.

mod cache;

pub use cache::ModelCache;

use crate::dataset::SalaryDataset;
use crate::error::{Result, SalaryError};
use crate::features::{FeatureEncoder, FeatureSchema, PredictionRequest};
use crate::model::{ForestRegressor, MaxFeatures, DEFAULT_N_TREES};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

/// Training configuration for the salary model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// Ensemble size
    pub n_trees: usize,
    /// Maximum tree depth
    pub max_depth: Option<usize>,
    /// Minimum samples in leaf
    pub min_samples_leaf: usize,
    /// Base random seed
    pub seed: u64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            n_trees: DEFAULT_N_TREES,
            max_depth: None,
            min_samples_leaf: 1,
            seed: 42,
        }
    }
}

/// A single salary estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Scalar estimate
    pub salary: f64,
    /// Currency-formatted estimate
    pub formatted: String,
    /// The request this answers
    pub request: PredictionRequest,
}

/// Fitted salary model: forest + frozen schema + stored category mappings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryPredictor {
    encoder: FeatureEncoder,
    forest: ForestRegressor,
    /// Observed (min, max) of the training salaries
    salary_range: (f64, f64),
    n_samples: usize,
    fit_seconds: f64,
}

impl SalaryPredictor {
    /// Train on a dataset. The returned predictor is immutable; replacing the
    /// dataset means fitting a fresh predictor, never mutating this one.
    pub fn fit(dataset: &SalaryDataset, config: &PredictorConfig) -> Result<Self> {
        if config.n_trees == 0 {
            return Err(SalaryError::ValidationError(
                "n_trees must be at least 1".to_string(),
            ));
        }

        let start = Instant::now();

        let mut encoder = FeatureEncoder::new();
        let x = encoder.fit_transform(dataset)?;
        let y = encoder.target(dataset);

        let mut forest = ForestRegressor::new(config.n_trees)
            .with_min_samples_leaf(config.min_samples_leaf)
            .with_max_features(MaxFeatures::All)
            .with_random_state(config.seed);
        if let Some(d) = config.max_depth {
            forest = forest.with_max_depth(d);
        }
        forest.fit(&x, &y)?;

        let fit_seconds = start.elapsed().as_secs_f64();
        info!(
            rows = dataset.len(),
            features = encoder.schema()?.len(),
            trees = config.n_trees,
            secs = format!("{fit_seconds:.2}"),
            "trained salary model"
        );

        Ok(Self {
            encoder,
            forest,
            salary_range: dataset.salary_range(),
            n_samples: dataset.len(),
            fit_seconds,
        })
    }

    /// Answer a what-if request. Pure function of (request, schema, mapping,
    /// model); no state is touched.
    pub fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult> {
        let features = self.encoder.encode_record(request)?;
        let salary = self
            .forest
            .predict_one(features.as_slice().ok_or_else(|| {
                SalaryError::ComputationError("non-contiguous feature vector".to_string())
            })?)?;

        if !salary.is_finite() {
            return Err(SalaryError::ComputationError(format!(
                "model produced a non-finite estimate: {salary}"
            )));
        }

        Ok(PredictionResult {
            salary,
            formatted: format_currency(salary),
            request: request.clone(),
        })
    }

    /// The frozen feature schema
    pub fn schema(&self) -> Result<&FeatureSchema> {
        self.encoder.schema()
    }

    /// The encoder (schema + stored mappings)
    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    /// Observed (min, max) of the training salaries
    pub fn salary_range(&self) -> (f64, f64) {
        self.salary_range
    }

    /// Number of training rows
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Wall-clock seconds spent fitting
    pub fn fit_seconds(&self) -> f64 {
        self.fit_seconds
    }

    /// Feature importances paired with schema column names, descending
    pub fn feature_importances(&self) -> Result<Vec<(String, f64)>> {
        let schema = self.encoder.schema()?;
        let importances = self
            .forest
            .feature_importances()
            .ok_or(SalaryError::ModelNotFitted)?;

        let mut pairs: Vec<(String, f64)> = schema
            .columns()
            .iter()
            .cloned()
            .zip(importances.iter().copied())
            .collect();
        pairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        Ok(pairs)
    }
}

/// Format a salary estimate as currency, e.g. `$112,000`
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round().max(0.0) as u64;
    let digits = rounded.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::synthetic::generate_synthetic;

    fn quick_config() -> PredictorConfig {
        PredictorConfig {
            n_trees: 25,
            max_depth: Some(8),
            ..PredictorConfig::default()
        }
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(950.4), "$950");
        assert_eq!(format_currency(1000.0), "$1,000");
        assert_eq!(format_currency(112499.6), "$112,500");
        assert_eq!(format_currency(1234567.0), "$1,234,567");
        assert_eq!(format_currency(-5.0), "$0");
    }

    #[test]
    fn test_predict_within_training_range() {
        let ds = generate_synthetic(300, 42).unwrap();
        let predictor = SalaryPredictor::fit(&ds, &quick_config()).unwrap();

        let result = predictor
            .predict(&PredictionRequest {
                age: 30,
                gender: "Male".to_string(),
                education: "Master's".to_string(),
                job_title: "Data Analyst".to_string(),
                years_experience: 5,
            })
            .unwrap();

        let (min, max) = predictor.salary_range();
        assert!(result.salary.is_finite());
        assert!(result.salary >= min && result.salary <= max);
        assert!(result.formatted.starts_with('$'));
    }

    #[test]
    fn test_zero_trees_rejected() {
        let ds = generate_synthetic(50, 42).unwrap();
        let config = PredictorConfig {
            n_trees: 0,
            ..PredictorConfig::default()
        };
        assert!(matches!(
            SalaryPredictor::fit(&ds, &config),
            Err(SalaryError::ValidationError(_))
        ));
    }

    #[test]
    fn test_importances_cover_schema() {
        let ds = generate_synthetic(120, 42).unwrap();
        let predictor = SalaryPredictor::fit(&ds, &quick_config()).unwrap();

        let importances = predictor.feature_importances().unwrap();
        assert_eq!(importances.len(), predictor.schema().unwrap().len());
        let total: f64 = importances.iter().map(|(_, v)| v).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }
}
