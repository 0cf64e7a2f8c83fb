//! Integration test: end-to-end fit/predict pipeline and model cache

use std::sync::Arc;

use salarycast::dataset::synthetic::generate_synthetic;
use salarycast::features::PredictionRequest;
use salarycast::pipeline::format_currency;
use salarycast::report::SalaryReport;
use salarycast::{ModelCache, PredictorConfig, SalaryError, SalaryPredictor};

fn quick_config() -> PredictorConfig {
    PredictorConfig {
        n_trees: 30,
        max_depth: Some(10),
        ..PredictorConfig::default()
    }
}

fn analyst_request() -> PredictionRequest {
    PredictionRequest {
        age: 30,
        gender: "Male".to_string(),
        education: "Master's".to_string(),
        job_title: "Data Analyst".to_string(),
        years_experience: 5,
    }
}

#[test]
fn test_prediction_is_finite_and_within_training_range() {
    let ds = generate_synthetic(300, 42).unwrap();
    let predictor = SalaryPredictor::fit(&ds, &quick_config()).unwrap();

    let result = predictor.predict(&analyst_request()).unwrap();
    let (min, max) = predictor.salary_range();

    assert!(result.salary.is_finite());
    assert!(result.salary >= 0.0);
    // A bagged forest averages leaf means, so it cannot extrapolate past
    // the observed salary extremes.
    assert!(
        result.salary >= min && result.salary <= max,
        "{} outside [{min}, {max}]",
        result.salary
    );
    assert_eq!(result.formatted, format_currency(result.salary));
}

#[test]
fn test_fit_is_deterministic_for_a_fixed_seed() {
    let ds = generate_synthetic(150, 42).unwrap();
    let a = SalaryPredictor::fit(&ds, &quick_config()).unwrap();
    let b = SalaryPredictor::fit(&ds, &quick_config()).unwrap();

    let pa = a.predict(&analyst_request()).unwrap();
    let pb = b.predict(&analyst_request()).unwrap();
    assert_eq!(pa.salary, pb.salary);
}

#[test]
fn test_unknown_gender_propagates_from_predict() {
    let ds = generate_synthetic(150, 42).unwrap();
    let predictor = SalaryPredictor::fit(&ds, &quick_config()).unwrap();

    let mut request = analyst_request();
    request.gender = "Other".to_string();
    let err = predictor.predict(&request).unwrap_err();
    assert!(matches!(err, SalaryError::UnknownCategory { .. }));
}

#[test]
fn test_unseen_title_still_yields_an_estimate() {
    let ds = generate_synthetic(150, 42).unwrap();
    let predictor = SalaryPredictor::fit(&ds, &quick_config()).unwrap();

    let mut request = analyst_request();
    request.job_title = "Space Plumber".to_string();
    let result = predictor.predict(&request).unwrap();
    assert!(result.salary.is_finite());
}

#[test]
fn test_cache_returns_the_same_triple_for_the_same_dataset() {
    let cache = ModelCache::new();
    let ds = generate_synthetic(80, 42).unwrap();

    let a = cache.get_or_fit(&ds, &quick_config()).unwrap();
    let b = cache.get_or_fit(&ds, &quick_config()).unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(cache.stats(), (1, 1));

    // A different dataset invalidates nothing; it simply gets its own entry
    let other = generate_synthetic(80, 7).unwrap();
    let c = cache.get_or_fit(&other, &quick_config()).unwrap();
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_experience_moves_the_estimate_up() {
    let ds = generate_synthetic(600, 42).unwrap();
    let predictor = SalaryPredictor::fit(&ds, &quick_config()).unwrap();

    let junior = predictor
        .predict(&PredictionRequest {
            age: 25,
            years_experience: 1,
            ..analyst_request()
        })
        .unwrap();
    let senior = predictor
        .predict(&PredictionRequest {
            age: 50,
            years_experience: 25,
            ..analyst_request()
        })
        .unwrap();

    assert!(
        senior.salary > junior.salary,
        "senior {} <= junior {}",
        senior.salary,
        junior.salary
    );
}

#[test]
fn test_report_text_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.txt");

    let ds = generate_synthetic(150, 42).unwrap();
    let predictor = SalaryPredictor::fit(&ds, &quick_config()).unwrap();
    let result = predictor.predict(&analyst_request()).unwrap();
    let formatted = result.formatted.clone();

    let report = SalaryReport::new("Jordan Example", result);
    report.write_text(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("Jordan Example"));
    assert!(text.contains(&formatted));
    assert!(text.contains("Data Analyst"));
}
