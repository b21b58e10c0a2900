//! Fuzz target for suggestion and chart generation on parsed text.
//!
//! Every suggestion is rendered, then every chart type is requested with
//! arbitrary column strings.

#![no_main]

use arbitrary::Arbitrary;
use chartwise::{ChartRequest, ChartType, Chartwise, Parser};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    csv: String,
    x: String,
    y: String,
    value: Option<String>,
}

fuzz_target!(|input: Input| {
    if input.csv.len() > 50_000 {
        return;
    }

    let Ok(rows) = Parser::new().parse_str(&input.csv) else {
        return;
    };

    let chartwise = Chartwise::new();
    let result = chartwise.analyze_rows(rows);

    for suggestion in &result.suggestions {
        let _ = chartwise.chart(&ChartRequest::from(suggestion), &result.dataset);
    }

    for chart_type in ChartType::ALL {
        let mut request = ChartRequest::new(chart_type.as_str(), input.x.clone(), input.y.clone());
        request.value_column = input.value.clone();
        let _ = chartwise.preview_chart(&request, &result.dataset);
    }
});
