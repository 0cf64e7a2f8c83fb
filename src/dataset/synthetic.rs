//! Deterministic synthetic salary data
//!
//! Fallback used whenever the source CSV is missing or malformed. The
//! generator is seeded, so the same seed always produces the same table.

use super::{EmployeeRecord, SalaryDataset};
use crate::error::Result;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Default seed for the fallback dataset
pub const SYNTHETIC_SEED: u64 = 42;

/// Default number of fallback records
pub const DEFAULT_SYNTHETIC_ROWS: usize = 300;

/// Fixed job title catalog sampled by the generator
pub const JOB_TITLE_CATALOG: [&str; 18] = [
    "Software Engineer",
    "Data Analyst",
    "Senior Manager",
    "Sales Associate",
    "Director",
    "Marketing Analyst",
    "Product Manager",
    "Sales Manager",
    "Marketing Coordinator",
    "Senior Scientist",
    "Business Analyst",
    "Project Manager",
    "Operations Coordinator",
    "Financial Analyst",
    "HR Manager",
    "Senior Developer",
    "Marketing Manager",
    "Quality Assurance",
];

/// Generate a deterministic synthetic dataset of `n` records
pub fn generate_synthetic(n: usize, seed: u64) -> Result<SalaryDataset> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut records = Vec::with_capacity(n);

    for _ in 0..n {
        let age: u32 = rng.gen_range(22..=60);
        let gender = if rng.gen_bool(0.5) { "Male" } else { "Female" };

        let education = match rng.gen::<f64>() {
            p if p < 0.6 => "Bachelor's",
            p if p < 0.9 => "Master's",
            _ => "PhD",
        };

        let job_title = JOB_TITLE_CATALOG[rng.gen_range(0..JOB_TITLE_CATALOG.len())];

        let experience = rng.gen_range(0..=(age - 20)).min(40);

        let mut base = 40000.0 + experience as f64 * 3000.0;
        match education {
            "Master's" => base += 20000.0,
            "PhD" => base += 40000.0,
            _ => {}
        }
        if job_title.contains("Manager") || job_title.contains("Senior") {
            base *= 1.2;
        }
        if job_title.contains("Director") {
            base *= 1.4;
        }

        // Uniform noise in [0.9, 1.2], rounded to the nearest 1000
        let noisy = base * (0.9 + rng.gen::<f64>() * 0.3);
        let salary = (noisy / 1000.0).round() * 1000.0;

        records.push(EmployeeRecord {
            age,
            gender: gender.to_string(),
            education: education.to_string(),
            job_title: job_title.to_string(),
            years_experience: experience,
            salary,
        });
    }

    debug!(rows = n, seed, "generated synthetic salary dataset");
    SalaryDataset::new(records)
}
