//! Command-line interface
//!
//! Commands for generating the synthetic table, summarizing a dataset,
//! making what-if predictions, and writing report artifacts.

use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

use crate::dataset::summary::CORRELATION_COLUMNS;
use crate::dataset::{generate_synthetic, load_or_synthesize, DatasetSummary};
use crate::error::Result;
use crate::features::PredictionRequest;
use crate::pipeline::{format_currency, PredictorConfig, SalaryPredictor};
use crate::report::SalaryReport;

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString {
    s.truecolor(120, 120, 120)
}

fn kv(key: &str, val: &str) {
    println!("  {:<26} {}", dim(key), val.white());
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(48)));
}

fn step_ok(msg: &str) {
    println!("  {} {}", "✓".green(), msg);
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "salarycast")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Explore and predict employee salaries from tabular data")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the deterministic synthetic dataset to CSV
    Generate {
        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// Number of records
        #[arg(long, default_value = "300")]
        rows: usize,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Show descriptive statistics for a dataset
    Summary {
        /// Input CSV (synthetic fallback when absent or malformed)
        #[arg(short, long)]
        data: Option<PathBuf>,
    },

    /// Predict a salary for a what-if input
    Predict {
        /// Input CSV to train on (synthetic fallback when absent)
        #[arg(short, long)]
        data: Option<PathBuf>,

        #[arg(long)]
        age: u32,

        #[arg(long)]
        gender: String,

        #[arg(long)]
        education: String,

        #[arg(long = "title")]
        job_title: String,

        #[arg(long)]
        experience: u32,

        /// Ensemble size
        #[arg(long, default_value = "500")]
        trees: usize,
    },

    /// Predict and write a report artifact
    Report {
        /// Input CSV to train on (synthetic fallback when absent)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Employee name on the report
        #[arg(long)]
        name: String,

        #[arg(long)]
        age: u32,

        #[arg(long)]
        gender: String,

        #[arg(long)]
        education: String,

        #[arg(long = "title")]
        job_title: String,

        #[arg(long)]
        experience: u32,

        /// Output file (.pdf with --font-dir, plain text otherwise)
        #[arg(short, long)]
        output: PathBuf,

        /// Directory containing the TTF font family for PDF output
        #[arg(long)]
        font_dir: Option<PathBuf>,

        /// Font family name inside --font-dir
        #[arg(long, default_value = "LiberationSans")]
        font_name: String,

        /// Ensemble size
        #[arg(long, default_value = "500")]
        trees: usize,
    },
}

pub fn cmd_generate(output: &PathBuf, rows: usize, seed: u64) -> Result<()> {
    let ds = generate_synthetic(rows, seed)?;
    ds.write_csv(output)?;

    section("generate");
    kv("rows", &ds.len().to_string());
    kv("seed", &seed.to_string());
    kv("content hash", &ds.content_hash()[..16]);
    step_ok(&format!("wrote {}", output.display()));
    Ok(())
}

pub fn cmd_summary(data: Option<&PathBuf>) -> Result<()> {
    let ds = load_or_synthesize(data.map(|p| p.as_path()))?;
    let summary = DatasetSummary::compute(&ds)?;

    section("dataset");
    kv("rows", &summary.n_rows.to_string());
    kv("mean age", &format!("{:.1}", summary.mean_age));
    kv("median age", &format!("{:.1}", summary.median_age));
    kv("salary mean", &format_currency(summary.salary_mean));
    kv(
        "salary range",
        &format!(
            "{} - {}",
            format_currency(summary.salary_min),
            format_currency(summary.salary_max)
        ),
    );

    section("average salary by gender");
    for (gender, avg) in &summary.salary_by_gender {
        kv(gender, &format_currency(*avg));
    }

    section("average salary by education");
    for (level, avg) in &summary.salary_by_education {
        kv(level, &format_currency(*avg));
    }

    section("average salary by experience");
    for (band, avg) in &summary.salary_by_experience {
        kv(band.label(), &format_currency(*avg));
    }

    section("correlation");
    for (i, row) in summary.correlation.iter().enumerate() {
        let cells = row
            .iter()
            .map(|v| format!("{v:+.2}"))
            .collect::<Vec<_>>()
            .join("  ");
        kv(CORRELATION_COLUMNS[i], &cells);
    }

    Ok(())
}

pub fn cmd_predict(
    data: Option<&PathBuf>,
    request: &PredictionRequest,
    trees: usize,
) -> Result<()> {
    let ds = load_or_synthesize(data.map(|p| p.as_path()))?;
    let config = PredictorConfig {
        n_trees: trees,
        ..PredictorConfig::default()
    };
    let predictor = SalaryPredictor::fit(&ds, &config)?;
    let result = predictor.predict(request)?;

    section("prediction");
    kv("estimated salary", &result.formatted.green().bold());
    let (min, max) = predictor.salary_range();
    kv(
        "training range",
        &format!("{} - {}", format_currency(min), format_currency(max)),
    );
    kv("trees", &trees.to_string());
    kv("features", &predictor.schema()?.len().to_string());

    section("top features");
    for (name, importance) in predictor.feature_importances()?.into_iter().take(5) {
        kv(&name, &format!("{:.1}%", importance * 100.0));
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_report(
    data: Option<&PathBuf>,
    name: &str,
    request: &PredictionRequest,
    output: &PathBuf,
    font_dir: Option<&PathBuf>,
    font_name: &str,
    trees: usize,
) -> Result<()> {
    let ds = load_or_synthesize(data.map(|p| p.as_path()))?;
    let config = PredictorConfig {
        n_trees: trees,
        ..PredictorConfig::default()
    };
    let predictor = SalaryPredictor::fit(&ds, &config)?;
    let result = predictor.predict(request)?;

    let report = SalaryReport::new(name, result);
    match font_dir {
        Some(fonts) => report.write_pdf(output, fonts, font_name)?,
        None => report.write_text(output)?,
    }

    section("report");
    kv("employee", name);
    kv("predicted salary", &report.result.formatted);
    step_ok(&format!("wrote {}", output.display()));
    Ok(())
}
