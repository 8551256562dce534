//! Autoprice: Automobile Price Analysis CLI
//!
//! A one-shot pipeline: load the automobile CSV, impute missing values,
//! inspect correlations and group variance, fit four regression models, and
//! tune the ridge penalty by cross-validated grid search.

mod cli;
mod pipeline;
mod report;
mod utils;

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Table};
use console::style;

use cli::Cli;
use pipeline::{
    clean_dataset, correlation_scan, feature_matrix, grid_search_ridge, load_dataset,
    missing_value_counts, one_way_anova, polynomial_features, select_rows, target_vector,
    train_test_split, display_dataset_stats, LinearModel, Metrics, RidgeModel, ALPHA_GRID,
    ANOVA_COLUMN, ANOVA_GROUPS, CORRELATION_FEATURES, MULTIPLE_FEATURES, SIMPLE_FEATURE,
    TUNING_FEATURES,
};
use report::{HoldoutEntry, ModelEntry, RunReport, RunSummary};
use utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_info, print_step_header, print_step_time, print_success,
};

/// How many predictions to show next to the actual prices per model.
const SAMPLE_PREDICTIONS: usize = 5;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let target = cli.target.as_str();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        &cli.input,
        target,
        cli.test_fraction,
        cli.seed,
        cli.alpha,
        cli.cv_folds,
    );

    let mut summary = RunSummary::new();

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Reading CSV...");
    let df = load_dataset(&cli.input, cli.infer_schema_length)?;
    finish_with_success(&spinner, "Dataset loaded");
    display_dataset_stats(&df);

    let missing_counts = missing_value_counts(&df);
    let total_missing: usize = missing_counts.iter().map(|(_, n)| n).sum();
    println!("\n    Missing values per column:");
    for (name, count) in &missing_counts {
        if *count > 0 {
            println!("      {:<20} {}", name, style(count).yellow().bold());
        }
    }
    if total_missing == 0 {
        print_info("No missing values in the raw data");
    }
    summary.load_time = step_start.elapsed();
    print_step_time(summary.load_time);

    // Step 2: Clean and impute
    print_step_header(2, "Clean and Impute");
    let step_start = Instant::now();
    let (df, clean_report) = clean_dataset(df, target)?;
    for (name, mean) in &clean_report.imputed_means {
        println!("      {:<20} imputed with mean {:.2}", name, mean);
    }
    println!(
        "      {:<20} imputed with mode '{}'",
        pipeline::MODE_IMPUTED_COLUMN,
        clean_report.imputed_mode
    );
    if clean_report.rows_dropped > 0 {
        println!(
            "      Dropped {} row(s) without a '{}' value",
            style(clean_report.rows_dropped).yellow().bold(),
            target
        );
    }
    print_success("Dataset cleaned");
    summary.clean_time = step_start.elapsed();
    print_step_time(summary.clean_time);

    // Step 3: Correlation and ANOVA
    print_step_header(3, "Correlation and ANOVA");
    let step_start = Instant::now();
    let correlations = correlation_scan(&df, &CORRELATION_FEATURES, target)?;
    for result in &correlations {
        println!(
            "      {:<14} r = {:>7.4}   p = {:.3e}",
            result.feature,
            style(result.coefficient).cyan(),
            result.p_value
        );
    }
    let anova = one_way_anova(&df, ANOVA_COLUMN, &ANOVA_GROUPS, target)?;
    println!(
        "      ANOVA across {:?}: F = {:.2}, p = {:.3e}",
        ANOVA_GROUPS, anova.f_statistic, anova.p_value
    );
    summary.analyze_time = step_start.elapsed();
    print_step_time(summary.analyze_time);

    // Step 4: Model development (metrics are over the training data)
    print_step_header(4, "Model Development");
    let step_start = Instant::now();
    let y = target_vector(&df, target)?;
    let mut model_entries = Vec::new();

    let x_simple = feature_matrix(&df, &[SIMPLE_FEATURE])?;
    let model = LinearModel::fit(&x_simple, &y)?;
    let predictions = model.predict(&x_simple);
    report_model(
        "Simple OLS (horsepower)",
        &y,
        &predictions,
        &mut summary,
        &mut model_entries,
    );

    let x_multiple = feature_matrix(&df, &MULTIPLE_FEATURES)?;
    let model = LinearModel::fit(&x_multiple, &y)?;
    let predictions = model.predict(&x_multiple);
    report_model(
        "Multiple OLS (4 features)",
        &y,
        &predictions,
        &mut summary,
        &mut model_entries,
    );

    let x_poly = polynomial_features(&x_simple, cli.degree);
    let model = LinearModel::fit(&x_poly, &y)?;
    let predictions = model.predict(&x_poly);
    report_model(
        &format!("Polynomial OLS (horsepower, deg {})", cli.degree),
        &y,
        &predictions,
        &mut summary,
        &mut model_entries,
    );
    summary.model_time = step_start.elapsed();
    print_step_time(summary.model_time);

    // Step 5: Evaluation and refinement
    print_step_header(5, "Evaluation and Refinement");
    let step_start = Instant::now();

    let x_tuning = feature_matrix(&df, &TUNING_FEATURES)?;
    let (train_idx, test_idx) = train_test_split(df.height(), cli.test_fraction, cli.seed)?;

    let x_train = select_rows(&x_tuning, &train_idx);
    let x_test = select_rows(&x_tuning, &test_idx);
    let y_train: Vec<f64> = train_idx.iter().map(|&i| y[i]).collect();
    let y_test: Vec<f64> = test_idx.iter().map(|&i| y[i]).collect();

    // The expansion is stateless, so expanding each partition independently
    // matches expanding once and then splitting.
    let x_train_poly = polynomial_features(&x_train, cli.degree);
    let x_test_poly = polynomial_features(&x_test, cli.degree);

    let ridge = RidgeModel::fit(&x_train_poly, &y_train, cli.alpha)?;
    let ridge_predictions = ridge.predict(&x_test_poly);
    let holdout_r_squared = Metrics::compute(&y_test, &ridge_predictions).r_squared;

    println!(
        "      Ridge (α = {}) on degree-{} basis of {} features",
        cli.alpha,
        cli.degree,
        TUNING_FEATURES.len()
    );
    print_sample_predictions(&ridge_predictions, &y_test, 4);
    println!(
        "      Test R² = {}",
        style(format!("{:.4}", holdout_r_squared)).cyan().bold()
    );
    summary.holdout_r_squared = Some(holdout_r_squared);

    // Grid search runs on the entire unexpanded feature set, scored by k-fold
    // cross-validation; the winner is then scored on the earlier test split.
    let spinner = create_spinner("Grid search over ridge alphas...");
    let grid = grid_search_ridge(&x_tuning, &y, &ALPHA_GRID, cli.cv_folds)?;
    finish_with_success(&spinner, "Grid search complete");

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("alpha").add_attribute(Attribute::Bold),
        Cell::new(format!("mean CV R² ({}-fold)", cli.cv_folds)).add_attribute(Attribute::Bold),
    ]);
    for score in &grid.scores {
        table.add_row(vec![
            Cell::new(score.alpha),
            Cell::new(format!("{:.4}", score.mean_cv_r_squared)),
        ]);
    }
    for line in table.to_string().lines() {
        println!("      {}", line);
    }
    println!(
        "      Best alpha: {}",
        style(grid.best_alpha).yellow().bold()
    );

    let best_ridge = RidgeModel::fit(&x_tuning, &y, grid.best_alpha)?;
    let best_test_r_squared = best_ridge.score(&x_test, &y_test);
    println!(
        "      Best estimator test R² = {}",
        style(format!("{:.4}", best_test_r_squared)).cyan().bold()
    );
    summary.best_alpha = Some(grid.best_alpha);
    summary.best_alpha_test_r_squared = Some(best_test_r_squared);
    summary.tune_time = step_start.elapsed();
    print_step_time(summary.tune_time);

    summary.display();

    if let Some(export_path) = &cli.export {
        let run_report = RunReport {
            metadata: RunReport::metadata(
                &cli.input,
                target,
                cli.seed,
                cli.test_fraction,
                cli.degree,
                cli.cv_folds,
            ),
            missing_counts,
            cleaning: clean_report,
            correlations,
            anova,
            models: model_entries,
            holdout: HoldoutEntry {
                alpha: cli.alpha,
                test_r_squared: holdout_r_squared,
                sample_predicted: ridge_predictions
                    .iter()
                    .take(SAMPLE_PREDICTIONS)
                    .copied()
                    .collect(),
                sample_actual: y_test.iter().take(SAMPLE_PREDICTIONS).copied().collect(),
            },
            grid_search: grid,
            best_alpha_test_r_squared: best_test_r_squared,
        };
        run_report.write_json(export_path)?;
        print_success(&format!("Report exported to {}", export_path.display()));
    }

    print_completion();
    Ok(())
}

/// Print one model's metrics and sample predictions, and record it for the
/// summary table and the JSON export.
fn report_model(
    name: &str,
    y_true: &[f64],
    predictions: &[f64],
    summary: &mut RunSummary,
    entries: &mut Vec<ModelEntry>,
) {
    let metrics = Metrics::compute(y_true, predictions);
    println!("      {}", style(name).white().bold());
    println!(
        "        R² = {:.4}   MSE = {:.1}",
        metrics.r_squared, metrics.mse
    );
    print_sample_predictions(predictions, y_true, SAMPLE_PREDICTIONS);

    summary.add_model(name, metrics);
    entries.push(ModelEntry {
        name: name.to_string(),
        metrics,
        sample_predicted: predictions.iter().take(SAMPLE_PREDICTIONS).copied().collect(),
        sample_actual: y_true.iter().take(SAMPLE_PREDICTIONS).copied().collect(),
    });
}

/// Print the first few predicted values next to the actual prices.
fn print_sample_predictions(predictions: &[f64], actual: &[f64], count: usize) {
    let shown = count.min(predictions.len());
    let predicted: Vec<String> = predictions[..shown].iter().map(|v| format!("{:.0}", v)).collect();
    let actuals: Vec<String> = actual[..shown].iter().map(|v| format!("{:.0}", v)).collect();
    println!("        predicted: [{}]", predicted.join(", "));
    println!("        actual:    [{}]", actuals.join(", "));
}
