//! Analysis pipeline performance benchmarks.
//!
//! Measures inference, statistics, suggestion and chart generation over
//! generated sales-like data of increasing size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chartwise::{ChartRequest, Chartwise, DataQualityAnalyzer, Dataset, Parser, SuggestionEngine};

/// Generate a sales CSV with dates, categories, numbers and a few gaps.
fn generate_sales_data(rows: usize) -> String {
    let regions = ["north", "south", "east", "west"];
    let products = ["widget", "gadget", "gizmo", "doohickey", "thing"];

    let mut data = String::from("date,region,product,units,revenue,discount\n");
    for row in 0..rows {
        let units = if row % 97 == 0 { 5000 } else { 10 + (row % 40) };
        let discount = if row % 13 == 0 {
            String::new()
        } else {
            format!("{:.2}", (row % 20) as f64 * 0.01)
        };
        data.push_str(&format!(
            "2024-{:02}-{:02},{},{},{},{:.2},{}\n",
            (row % 12) + 1,
            (row % 28) + 1,
            regions[row % regions.len()],
            products[row % products.len()],
            units,
            units as f64 * 9.99,
            discount
        ));
    }
    data
}

fn dataset(rows: usize) -> Dataset {
    let parsed = Parser::new()
        .parse_str(&generate_sales_data(rows))
        .expect("generated data parses");
    Chartwise::new().infer(parsed)
}

fn bench_full_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_analysis");

    for rows in [100, 1_000, 10_000] {
        let text = generate_sales_data(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &text, |b, text| {
            let chartwise = Chartwise::new();
            b.iter(|| {
                let parsed = Parser::new().parse_str(black_box(text)).unwrap();
                chartwise.analyze_rows(parsed)
            });
        });
    }

    group.finish();
}

fn bench_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");
    let analyzer = DataQualityAnalyzer::new();

    for rows in [1_000, 10_000] {
        let data = dataset(rows);
        group.bench_with_input(BenchmarkId::new("snapshot", rows), &data, |b, data| {
            b.iter(|| analyzer.statistics(black_box(data)));
        });
        group.bench_with_input(BenchmarkId::new("outliers", rows), &data, |b, data| {
            b.iter(|| analyzer.outliers(black_box(data), "units"));
        });
    }

    group.finish();
}

fn bench_suggestions_and_charts(c: &mut Criterion) {
    let data = dataset(5_000);
    let engine = SuggestionEngine::new();
    let chartwise = Chartwise::new();

    c.bench_function("suggest_5000", |b| b.iter(|| engine.suggest(black_box(&data))));

    let requests = [
        ChartRequest::new("bar", "region", "revenue"),
        ChartRequest::new("treemap", "region,product", "units"),
        ChartRequest::new("heatmap", "region", "product").with_value_column("revenue"),
    ];
    for request in requests {
        c.bench_function(&format!("chart_{}_5000", request.chart_type), |b| {
            b.iter(|| chartwise.chart(black_box(&request), black_box(&data)))
        });
    }
}

criterion_group!(
    benches,
    bench_full_analysis,
    bench_statistics,
    bench_suggestions_and_charts
);
criterion_main!(benches);
