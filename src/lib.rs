//! Autoprice: Automobile Price Analysis Library
//!
//! A library for exploratory data analysis and regression modeling of
//! automobile prices: cleaning and imputation, correlation and ANOVA
//! diagnostics, OLS/ridge fits, and cross-validated hyperparameter search.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
