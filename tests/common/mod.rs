//! Shared test utilities and fixture generators

use polars::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Raw automobile-like frame with `"?"` sentinels in the imputed columns.
///
/// Horsepower is `[100, 150, ?, 120, 130]` whose imputed
/// mean must be 125.0; `num-of-doors` carries a four/two tie that must break
/// to "four" (first encountered); row 3 lacks a price and must be dropped.
pub fn create_raw_dataframe() -> DataFrame {
    df! {
        "normalized-losses" => ["164", "?", "158", "?", "192"],
        "bore" => ["3.47", "3.47", "2.68", "?", "3.19"],
        "stroke" => ["2.68", "2.68", "3.47", "3.40", "?"],
        "horsepower" => ["100", "150", "?", "120", "130"],
        "peak-rpm" => ["5000", "5000", "?", "5500", "5500"],
        "num-of-doors" => ["four", "two", "?", "four", "two"],
        "price" => [Some(13495.0f64), Some(16500.0), Some(16500.0), None, Some(17450.0)],
    }
    .unwrap()
}

/// Clean numeric frame with a monotone horsepower → price relation.
pub fn create_clean_dataframe() -> DataFrame {
    let horsepower: Vec<f64> = (0..20).map(|i| 60.0 + 10.0 * i as f64).collect();
    let price: Vec<f64> = horsepower.iter().map(|h| 120.0 * h + 2000.0).collect();
    df! {
        "horsepower" => horsepower,
        "price" => price,
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Write a synthetic full-schema automobile CSV with `"?"` sentinels.
///
/// Covers every column the pipeline touches. The price follows a noisy but
/// deterministic function of the features, so every fit stays well-posed and
/// the simple OLS R² lands in (0, 1).
pub fn write_synthetic_csv(path: &std::path::Path, rows: usize) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(
        file,
        "normalized-losses,bore,stroke,horsepower,peak-rpm,num-of-doors,price,\
         drive-wheels,wheel-base,length,width,curb-weight,engine-size,city-mpg,highway-mpg"
    )?;

    let doors = ["two", "four"];
    let wheels = ["fwd", "rwd", "4wd"];
    for i in 0..rows {
        // Independent deterministic pseudo-noise per feature, so the design
        // matrices stay full rank.
        let wobble = |m: usize, p: usize| ((i * m) % p) as f64;
        let horsepower = 60.0 + 3.0 * i as f64 + wobble(7919, 13);
        let curb_weight = 1800.0 + 25.0 * i as f64 + 12.0 * wobble(104_729, 17);
        let engine_size = 90.0 + 2.0 * i as f64 + wobble(15_485_863, 11);
        let highway_mpg = 45.0 - 0.5 * i as f64 + 0.3 * wobble(32_452_843, 7);
        let wheel_base = 88.0 + 0.4 * i as f64 + 0.2 * wobble(49_979_687, 5);
        let bore = 2.9 + 0.02 * i as f64 + 0.01 * wobble(67_867_967, 3);
        let price = 95.0 * horsepower + 3.5 * curb_weight + 40.0 * engine_size
            - 60.0 * highway_mpg
            + 150.0 * wobble(7919, 13);

        // A couple of sentinels to exercise imputation end to end.
        let horsepower_field = if i == 2 {
            "?".to_string()
        } else {
            format!("{:.0}", horsepower)
        };
        let doors_field = if i == 5 { "?" } else { doors[i % 2] };

        writeln!(
            file,
            "{},{:.3},{:.2},{},{},{},{:.0},{},{:.2},{:.1},{:.1},{:.0},{:.0},{:.1},{:.1}",
            100 + i,
            bore,
            3.1 + 0.01 * i as f64,
            horsepower_field,
            4800 + 10 * i,
            doors_field,
            price,
            wheels[i % 3],
            wheel_base,
            160.0 + 0.8 * i as f64,
            63.0 + 0.1 * i as f64,
            curb_weight,
            engine_size,
            30.0 - 0.3 * i as f64,
            highway_mpg,
        )?;
    }

    Ok(())
}

/// Assert that a DataFrame has expected shape
#[allow(dead_code)]
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(
        rows, expected_rows,
        "Row count mismatch: expected {}, got {}",
        expected_rows, rows
    );
    assert_eq!(
        cols, expected_cols,
        "Column count mismatch: expected {}, got {}",
        expected_cols, cols
    );
}
