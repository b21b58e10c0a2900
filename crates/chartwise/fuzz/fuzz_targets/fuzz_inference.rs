//! Fuzz target for type inference and quality statistics.

#![no_main]

use arbitrary::Arbitrary;
use chartwise::{Cell, DataQualityAnalyzer, Row, TypeInferencer};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum FuzzCell {
    Null,
    Boolean(bool),
    Number(f64),
    Text(String),
}

impl From<FuzzCell> for Cell {
    fn from(cell: FuzzCell) -> Self {
        match cell {
            FuzzCell::Null => Cell::Null,
            FuzzCell::Boolean(b) => Cell::Boolean(b),
            FuzzCell::Number(n) => Cell::Number(n),
            FuzzCell::Text(s) => Cell::Text(s),
        }
    }
}

fuzz_target!(|rows: Vec<Vec<(u8, FuzzCell)>>| {
    if rows.len() > 500 {
        return;
    }

    let rows: Vec<Row> = rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|(key, cell)| (format!("c{}", key % 8), Cell::from(cell)))
                .collect()
        })
        .collect();

    let dataset = TypeInferencer::new().infer_dataset(rows);
    let analyzer = DataQualityAnalyzer::new();
    let _ = analyzer.statistics(&dataset);
    let _ = analyzer.profiles(&dataset);
    for column in dataset.column_names() {
        let _ = analyzer.outliers(&dataset, column);
        let _ = analyzer.correlation(&dataset, column, column);
        let _ = analyzer.frequency(&dataset, column, 10);
    }
});
