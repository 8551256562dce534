//! Unit tests for Pearson correlation and one-way ANOVA

use autoprice::pipeline::{correlation_scan, one_way_anova, pearson_with_p_value};
use polars::prelude::*;

#[test]
fn test_pearson_exact_linear_relation() {
    let x: Vec<f64> = (0..20).map(|i| i as f64).collect();
    let y: Vec<f64> = x.iter().map(|v| 3.0 * v + 1.0).collect();

    let (r, p) = pearson_with_p_value(&x, &y).unwrap();

    assert!((r - 1.0).abs() < 1e-12, "Exact linear data should give r = 1, got {}", r);
    assert!(p < 1e-9, "Perfect correlation should have p ~ 0, got {}", p);
}

#[test]
fn test_pearson_negative_relation() {
    let x: Vec<f64> = (0..20).map(|i| i as f64).collect();
    let y: Vec<f64> = x.iter().map(|v| 100.0 - 2.0 * v).collect();

    let (r, _) = pearson_with_p_value(&x, &y).unwrap();

    assert!((r + 1.0).abs() < 1e-12, "Should be perfectly anti-correlated, got {}", r);
}

#[test]
fn test_pearson_weak_relation_has_large_p() {
    // Alternating pattern with essentially no linear trend.
    let x: Vec<f64> = (0..30).map(|i| i as f64).collect();
    let y: Vec<f64> = (0..30).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();

    let (r, p) = pearson_with_p_value(&x, &y).unwrap();

    assert!(r.abs() < 0.2, "Expected near-zero correlation, got {}", r);
    assert!(p > 0.05, "Weak correlation should not be significant, got p = {}", p);
}

#[test]
fn test_pearson_rejects_constant_column() {
    let x = vec![5.0; 10];
    let y: Vec<f64> = (0..10).map(|i| i as f64).collect();
    assert!(pearson_with_p_value(&x, &y).is_err());
}

#[test]
fn test_pearson_needs_three_rows() {
    assert!(pearson_with_p_value(&[1.0, 2.0], &[1.0, 2.0]).is_err());
}

#[test]
fn test_correlation_scan_preserves_feature_order() {
    let df = df! {
        "a" => [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0],
        "b" => [6.0f64, 5.0, 4.0, 3.0, 2.0, 1.0],
        "price" => [10.0f64, 20.0, 30.0, 40.0, 50.0, 60.0],
    }
    .unwrap();

    let results = correlation_scan(&df, &["a", "b"], "price").unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].feature, "a");
    assert_eq!(results[1].feature, "b");
    assert!(results[0].coefficient > 0.99);
    assert!(results[1].coefficient < -0.99);
}

#[test]
fn test_anova_separated_groups() {
    let df = df! {
        "drive-wheels" => ["fwd", "fwd", "fwd", "rwd", "rwd", "rwd", "4wd", "4wd", "4wd"],
        "price" => [10.0f64, 11.0, 9.0, 50.0, 51.0, 49.0, 100.0, 101.0, 99.0],
    }
    .unwrap();

    let result = one_way_anova(&df, "drive-wheels", &["fwd", "rwd", "4wd"], "price").unwrap();

    assert!(
        result.f_statistic > 100.0,
        "Well-separated groups should give a large F, got {}",
        result.f_statistic
    );
    assert!(result.p_value < 0.001);
}

#[test]
fn test_anova_similar_groups() {
    let df = df! {
        "drive-wheels" => ["fwd", "fwd", "fwd", "rwd", "rwd", "rwd"],
        "price" => [10.0f64, 20.0, 30.0, 11.0, 21.0, 29.0],
    }
    .unwrap();

    let result = one_way_anova(&df, "drive-wheels", &["fwd", "rwd"], "price").unwrap();

    assert!(result.f_statistic < 1.0);
    assert!(result.p_value > 0.5);
}

#[test]
fn test_anova_empty_group_is_fatal() {
    let df = df! {
        "drive-wheels" => ["fwd", "fwd", "rwd", "rwd"],
        "price" => [10.0f64, 11.0, 50.0, 51.0],
    }
    .unwrap();

    let result = one_way_anova(&df, "drive-wheels", &["fwd", "rwd", "4wd"], "price");

    let err = result.unwrap_err().to_string();
    assert!(
        err.contains("4wd"),
        "Error should name the empty group, got: {}",
        err
    );
}
