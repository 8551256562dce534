//! Run summary report generation

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::Metrics;

/// Summary of the analysis run: per-model metrics and stage timings.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub models: Vec<(String, Metrics)>,
    pub holdout_r_squared: Option<f64>,
    pub best_alpha: Option<f64>,
    pub best_alpha_test_r_squared: Option<f64>,
    pub load_time: Duration,
    pub clean_time: Duration,
    pub analyze_time: Duration,
    pub model_time: Duration,
    pub tune_time: Duration,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_model(&mut self, name: &str, metrics: Metrics) {
        self.models.push((name.to_string(), metrics));
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("RUN SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Model").add_attribute(Attribute::Bold),
            Cell::new("R²").add_attribute(Attribute::Bold),
            Cell::new("MSE").add_attribute(Attribute::Bold),
        ]);

        for (name, metrics) in &self.models {
            table.add_row(vec![
                Cell::new(name),
                Cell::new(format!("{:.4}", metrics.r_squared)).fg(color_for_r2(metrics.r_squared)),
                Cell::new(format!("{:.1}", metrics.mse)),
            ]);
        }

        if let Some(r2) = self.holdout_r_squared {
            table.add_row(vec![
                Cell::new("Ridge (holdout test)"),
                Cell::new(format!("{:.4}", r2)).fg(color_for_r2(r2)),
                Cell::new("—"),
            ]);
        }

        if let (Some(alpha), Some(r2)) = (self.best_alpha, self.best_alpha_test_r_squared) {
            table.add_row(vec![
                Cell::new(format!("Best ridge (α = {})", alpha)).add_attribute(Attribute::Bold),
                Cell::new(format!("{:.4}", r2)).fg(color_for_r2(r2)),
                Cell::new("—"),
            ]);
        }

        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        let total = self.load_time
            + self.clean_time
            + self.analyze_time
            + self.model_time
            + self.tune_time;
        println!();
        println!(
            "    Total time: {} (load {:.2}s, clean {:.2}s, analyze {:.2}s, model {:.2}s, tune {:.2}s)",
            style(format!("{:.2}s", total.as_secs_f64())).yellow().bold(),
            self.load_time.as_secs_f64(),
            self.clean_time.as_secs_f64(),
            self.analyze_time.as_secs_f64(),
            self.model_time.as_secs_f64(),
            self.tune_time.as_secs_f64(),
        );
    }
}

fn color_for_r2(r2: f64) -> Color {
    if r2 >= 0.7 {
        Color::Green
    } else if r2 >= 0.4 {
        Color::Yellow
    } else {
        Color::Red
    }
}
