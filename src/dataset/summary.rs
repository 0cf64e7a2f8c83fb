//! Descriptive aggregates over the salary dataset
//!
//! Pure computations behind the dashboard views: central tendency of age,
//! salary spread, group averages, and the numeric correlation matrix.

use super::{ExperienceBand, SalaryDataset};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Labels of the numeric columns in the correlation matrix, in order
pub const CORRELATION_COLUMNS: [&str; 3] = ["Age", "Years of Experience", "Salary"];

/// Descriptive statistics for a salary dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub n_rows: usize,
    pub mean_age: f64,
    pub median_age: f64,
    pub salary_min: f64,
    pub salary_max: f64,
    pub salary_mean: f64,
    /// Average salary keyed by gender
    pub salary_by_gender: BTreeMap<String, f64>,
    /// Average salary keyed by education level
    pub salary_by_education: BTreeMap<String, f64>,
    /// Average salary per experience band, ascending
    pub salary_by_experience: Vec<(ExperienceBand, f64)>,
    /// Pearson correlation over (Age, Years of Experience, Salary)
    pub correlation: [[f64; 3]; 3],
}

impl DatasetSummary {
    /// Compute all aggregates in one pass over the records
    pub fn compute(dataset: &SalaryDataset) -> Result<Self> {
        let records = dataset.records();
        let n = records.len();

        let ages: Vec<f64> = records.iter().map(|r| r.age as f64).collect();
        let experience: Vec<f64> = records.iter().map(|r| r.years_experience as f64).collect();
        let salaries: Vec<f64> = records.iter().map(|r| r.salary).collect();

        let mean_age = ages.iter().sum::<f64>() / n as f64;
        let median_age = median(&ages);
        let (salary_min, salary_max) = dataset.salary_range();
        let salary_mean = salaries.iter().sum::<f64>() / n as f64;

        let mut by_gender: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        let mut by_education: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        let mut by_band: BTreeMap<ExperienceBand, (f64, usize)> = BTreeMap::new();

        for r in records {
            let g = by_gender.entry(r.gender.clone()).or_insert((0.0, 0));
            g.0 += r.salary;
            g.1 += 1;

            let e = by_education.entry(r.education.clone()).or_insert((0.0, 0));
            e.0 += r.salary;
            e.1 += 1;

            let band = ExperienceBand::from_years(r.years_experience);
            let b = by_band.entry(band).or_insert((0.0, 0));
            b.0 += r.salary;
            b.1 += 1;
        }

        let numeric = [&ages, &experience, &salaries];
        let mut correlation = [[0.0; 3]; 3];
        for (i, xs) in numeric.iter().enumerate() {
            for (j, ys) in numeric.iter().enumerate() {
                correlation[i][j] = pearson(xs, ys);
            }
        }

        Ok(Self {
            n_rows: n,
            mean_age,
            median_age,
            salary_min,
            salary_max,
            salary_mean,
            salary_by_gender: averages(by_gender),
            salary_by_education: averages(by_education),
            salary_by_experience: averages(by_band).into_iter().collect(),
            correlation,
        })
    }
}

fn averages<K: Ord>(sums: BTreeMap<K, (f64, usize)>) -> BTreeMap<K, f64> {
    sums.into_iter()
        .map(|(k, (sum, count))| (k, sum / count as f64))
        .collect()
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Pearson correlation coefficient; 0.0 for degenerate (constant) inputs
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return 0.0;
    }
    let mean_x = xs[..n].iter().sum::<f64>() / n as f64;
    let mean_y = ys[..n].iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..n {
        let dx = xs[i] - mean_x;
        let dy = ys[i] - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return 0.0;
    }
    cov / (var_x.sqrt() * var_y.sqrt())
}
