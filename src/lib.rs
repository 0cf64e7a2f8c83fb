//! salarycast - Employee salary exploration and prediction
//!
//! Loads (or deterministically synthesizes) a tabular salary dataset, fits a
//! bagged regression forest over a frozen feature schema, and answers what-if
//! salary predictions. The one subtle invariant lives in [`features`]: the
//! encoding established at fit time is authoritative, and every inference
//! input is projected onto that exact schema before reaching the model.
//!
//! # Modules
//!
//! - [`dataset`] - CSV loading, synthetic fallback, descriptive aggregates
//! - [`features`] - Frozen feature schema, category maps, record alignment
//! - [`model`] - Regression tree and bagged forest
//! - [`pipeline`] - Fit/predict orchestration and the content-hash model cache
//! - [`report`] - Report artifact (text and PDF)
//! - [`cli`] - Command-line interface

pub mod error;

pub mod dataset;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod report;

pub mod cli;

pub use dataset::{EmployeeRecord, SalaryDataset};
pub use error::{Result, SalaryError};
pub use features::{FeatureEncoder, FeatureSchema, PredictionRequest};
pub use model::ForestRegressor;
pub use pipeline::{ModelCache, PredictionResult, PredictorConfig, SalaryPredictor};
