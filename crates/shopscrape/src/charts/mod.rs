//! Aggregation of persisted records into the four summary charts.

pub mod font;
pub mod render;

pub use render::{ChartRenderer, PngRenderer};

use crate::error::{Result, ScrapeError};
use crate::pipeline::load;
use crate::record::ProductRecord;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::info;

pub const PRICE_CHART_FILE: &str = "price_bar_chart.png";
pub const QUANTITY_CHART_FILE: &str = "quantity_line_chart.png";
pub const WEIGHT_CHART_FILE: &str = "weight_bar_chart.png";
pub const CATEGORY_CHART_FILE: &str = "categories_pie_chart.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
}

/// One labelled value of a chart series.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
}

/// Everything a renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    /// Legend name of the series. Pie charts use per-point labels instead.
    pub series_name: String,
    pub points: Vec<DataPoint>,
    pub file_name: &'static str,
}

/// Numeric and categorical series derived from the records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregates {
    pub prices: Vec<f64>,
    pub quantities: Vec<f64>,
    pub weights: Vec<f64>,
    /// Category label to occurrence count, in first-seen order.
    pub category_counts: Vec<(String, usize)>,
}

impl Aggregates {
    pub fn from_records(records: &[ProductRecord]) -> Self {
        let mut category_counts: Vec<(String, usize)> = Vec::new();
        for record in records {
            match category_counts
                .iter_mut()
                .find(|(label, _)| *label == record.categories)
            {
                Some((_, count)) => *count += 1,
                None => category_counts.push((record.categories.clone(), 1)),
            }
        }

        Self {
            prices: records.iter().map(|r| parse_price(&r.price)).collect(),
            quantities: records.iter().map(|r| f64::from(r.quantity)).collect(),
            weights: records.iter().map(|r| parse_weight(&r.weight)).collect(),
            category_counts,
        }
    }

    /// The four charts, in output order.
    pub fn charts(&self) -> Vec<ChartSpec> {
        vec![
            ChartSpec {
                kind: ChartKind::Bar,
                title: "Distribution of Product Prices".to_string(),
                series_name: "Product Prices".to_string(),
                points: indexed(&self.prices),
                file_name: PRICE_CHART_FILE,
            },
            ChartSpec {
                kind: ChartKind::Line,
                title: "Product Quantity Variation".to_string(),
                series_name: "Quantities".to_string(),
                points: indexed(&self.quantities),
                file_name: QUANTITY_CHART_FILE,
            },
            ChartSpec {
                kind: ChartKind::Bar,
                title: "Product Weights".to_string(),
                series_name: "Weights".to_string(),
                points: indexed(&self.weights),
                file_name: WEIGHT_CHART_FILE,
            },
            ChartSpec {
                kind: ChartKind::Pie,
                title: "Product Categories".to_string(),
                series_name: String::new(),
                points: self
                    .category_counts
                    .iter()
                    .map(|(label, count)| DataPoint {
                        label: label.clone(),
                        value: *count as f64,
                    })
                    .collect(),
                file_name: CATEGORY_CHART_FILE,
            },
        ]
    }
}

fn indexed(values: &[f64]) -> Vec<DataPoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| DataPoint {
            label: i.to_string(),
            value: *v,
        })
        .collect()
}

/// Numeric price: drop everything but digits and dots, then read the leading
/// float. `"63.00"` → 63.0, `"£1,299.50"` → 1299.5, `""` → 0.0.
pub fn parse_price(price: &str) -> f64 {
    let digits: String = price
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    leading_float(&digits)
}

/// Numeric weight: the leading float of the string, 0.0 when there is none.
pub fn parse_weight(weight: &str) -> f64 {
    leading_float(weight)
}

/// Longest float literal at the start of `text` (after leading whitespace).
/// Trailing junk is ignored; no literal at all yields 0.0.
fn leading_float(text: &str) -> f64 {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^\s*([+-]?(?:\d+(?:\.\d+)?|\.\d+)(?:[eE][+-]?\d+)?)")
            .expect("float regex is valid")
    });

    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0)
}

/// Render the four charts for `records` into `out_dir`, stopping at the first
/// failure. Returns the written paths in chart order.
pub fn render_charts(
    renderer: &dyn ChartRenderer,
    records: &[ProductRecord],
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .map_err(|e| ScrapeError::io("failed to create chart directory", out_dir, e))?;

    let aggregates = Aggregates::from_records(records);
    let mut written = Vec::new();
    for chart in aggregates.charts() {
        let path = out_dir.join(chart.file_name);
        renderer.render(&chart, &path)?;
        info!("wrote chart {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Chart phase: reload the record file and render PNG charts into `out_dir`.
pub fn generate_charts(json_path: &Path, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let records = load(json_path)?;
    render_charts(&PngRenderer::default(), &records, out_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn record(price: &str, quantity: u32, categories: &str, weight: &str) -> ProductRecord {
        ProductRecord {
            name: format!("p{quantity}"),
            price: price.to_string(),
            quantity,
            categories: categories.to_string(),
            weight: weight.to_string(),
            dimensions: String::new(),
        }
    }

    /// Records calls and fails on the chart named in `fail_on`.
    struct RecordingRenderer {
        calls: RefCell<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl ChartRenderer for RecordingRenderer {
        fn render(&self, chart: &ChartSpec, path: &Path) -> Result<()> {
            self.calls.borrow_mut().push(chart.title.clone());
            if self.fail_on == Some(chart.file_name) {
                return Err(ScrapeError::io(
                    "failed to write",
                    path,
                    std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
                ));
            }
            Ok(())
        }
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("63.00"), 63.0);
        assert_eq!(parse_price("£1,299.50"), 1299.5);
        assert_eq!(parse_price(""), 0.0);
        assert_eq!(parse_price("free"), 0.0);
        assert_eq!(parse_price("1.2.3"), 1.2);
    }

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight("6.9"), 6.9);
        assert_eq!(parse_weight("100"), 100.0);
        assert_eq!(parse_weight(" 1.5 x"), 1.5);
        assert_eq!(parse_weight(".5"), 0.5);
        assert_eq!(parse_weight("abc"), 0.0);
        assert_eq!(parse_weight(""), 0.0);
    }

    #[test]
    fn test_aggregates_from_records() {
        let records = vec![
            record("63.00", 918, "Seed", "6.9"),
            record("87.00", 500, "Seed", "13"),
            record("", 0, "Lizard Fire", "n/a"),
        ];

        let agg = Aggregates::from_records(&records);
        assert_eq!(agg.prices, vec![63.0, 87.0, 0.0]);
        assert_eq!(agg.quantities, vec![918.0, 500.0, 0.0]);
        assert_eq!(agg.weights, vec![6.9, 13.0, 0.0]);
        assert_eq!(
            agg.category_counts,
            vec![("Seed".to_string(), 2), ("Lizard Fire".to_string(), 1)]
        );
    }

    #[test]
    fn test_chart_specs() {
        let records = vec![record("63.00", 918, "Seed", "6.9"), record("87.00", 500, "Seed", "13")];
        let charts = Aggregates::from_records(&records).charts();

        let summary: Vec<(ChartKind, &str, &str)> = charts
            .iter()
            .map(|c| (c.kind, c.title.as_str(), c.file_name))
            .collect();
        assert_eq!(
            summary,
            vec![
                (ChartKind::Bar, "Distribution of Product Prices", "price_bar_chart.png"),
                (ChartKind::Line, "Product Quantity Variation", "quantity_line_chart.png"),
                (ChartKind::Bar, "Product Weights", "weight_bar_chart.png"),
                (ChartKind::Pie, "Product Categories", "categories_pie_chart.png"),
            ]
        );

        assert_eq!(charts[0].series_name, "Product Prices");
        assert_eq!(charts[0].points[1], DataPoint { label: "1".to_string(), value: 87.0 });
        assert_eq!(charts[1].points.len(), 2);
        assert_eq!(charts[2].points[0].value, 6.9);
        assert_eq!(charts[3].points, vec![DataPoint { label: "Seed".to_string(), value: 2.0 }]);
    }

    #[test]
    fn test_render_charts_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = RecordingRenderer {
            calls: RefCell::new(Vec::new()),
            fail_on: None,
        };

        let written = render_charts(&renderer, &[record("1", 1, "a", "1")], dir.path()).unwrap();
        assert_eq!(written.len(), 4);
        assert_eq!(written[3], dir.path().join("categories_pie_chart.png"));
        assert_eq!(renderer.calls.borrow().len(), 4);
    }

    #[test]
    fn test_render_failure_halts_remaining_charts() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = RecordingRenderer {
            calls: RefCell::new(Vec::new()),
            fail_on: Some(QUANTITY_CHART_FILE),
        };

        let result = render_charts(&renderer, &[record("1", 1, "a", "1")], dir.path());
        assert!(result.is_err());
        assert_eq!(
            *renderer.calls.borrow(),
            vec!["Distribution of Product Prices", "Product Quantity Variation"]
        );
    }
}
