use crate::domain::model::{DeliveryReport, Dispatch, OutputFormat, PackageEstimate};
use crate::utils::error::{CourierError, Result};
use serde::Serialize;

/// 輸出時才做四捨五入，內部計算保留原值
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRow {
    pub package_id: String,
    pub discount: i64,
    pub total_cost: i64,
    pub delivery_time: Option<f64>,
}

impl From<&PackageEstimate> for OutputRow {
    fn from(estimate: &PackageEstimate) -> Self {
        Self {
            package_id: estimate.package_id.clone(),
            discount: estimate.discount.round() as i64,
            total_cost: estimate.total_cost.round() as i64,
            delivery_time: estimate.delivery_time.map(round_hundredths),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    packages: Vec<OutputRow>,
    dispatches: &'a [Dispatch],
    unscheduled: &'a [String],
}

pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn format_delivery_time(delivery_time: Option<f64>) -> String {
    match delivery_time {
        Some(hours) => format!("{:.2}", hours),
        None => "-".to_string(),
    }
}

pub fn render(report: &DeliveryReport, format: OutputFormat) -> Result<String> {
    let rows: Vec<OutputRow> = report.estimates.iter().map(OutputRow::from).collect();

    match format {
        OutputFormat::Text => Ok(render_text(&rows)),
        OutputFormat::Csv => render_csv(&rows),
        OutputFormat::Json => {
            let json = JsonReport {
                packages: rows,
                dispatches: &report.dispatches,
                unscheduled: &report.unscheduled,
            };
            let mut output = serde_json::to_string_pretty(&json)?;
            output.push('\n');
            Ok(output)
        }
    }
}

fn render_text(rows: &[OutputRow]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "{} {} {} {}\n",
                row.package_id,
                row.discount,
                row.total_cost,
                format_delivery_time(row.delivery_time)
            )
        })
        .collect()
}

fn render_csv(rows: &[OutputRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["package_id", "discount", "total_cost", "delivery_time"])?;
    for row in rows {
        writer.write_record([
            row.package_id.clone(),
            row.discount.to_string(),
            row.total_cost.to_string(),
            format_delivery_time(row.delivery_time),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CourierError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| CourierError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> DeliveryReport {
        DeliveryReport {
            estimates: vec![
                PackageEstimate {
                    package_id: "PKG1".to_string(),
                    discount: 0.0,
                    total_cost: 750.0,
                    delivery_time: Some(3.2857142857),
                },
                PackageEstimate {
                    package_id: "PKG4".to_string(),
                    discount: 104.7,
                    total_cost: 1390.3,
                    delivery_time: Some(4.5),
                },
                PackageEstimate {
                    package_id: "PKG9".to_string(),
                    discount: 0.0,
                    total_cost: 2600.0,
                    delivery_time: None,
                },
            ],
            dispatches: vec![Dispatch {
                vehicle: 0,
                departs_at: 0.0,
                returns_at: 6.43,
                total_weight: 125.0,
                package_ids: vec!["PKG1".to_string(), "PKG4".to_string()],
            }],
            unscheduled: vec!["PKG9".to_string()],
        }
    }

    #[test]
    fn test_render_text() {
        let output = render(&sample_report(), OutputFormat::Text).unwrap();
        assert_eq!(
            output,
            "PKG1 0 750 3.29\nPKG4 105 1390 4.50\nPKG9 0 2600 -\n"
        );
    }

    #[test]
    fn test_render_csv() {
        let output = render(&sample_report(), OutputFormat::Csv).unwrap();
        let mut lines = output.lines();
        assert_eq!(
            lines.next(),
            Some("package_id,discount,total_cost,delivery_time")
        );
        assert_eq!(lines.next(), Some("PKG1,0,750,3.29"));
        assert_eq!(lines.next(), Some("PKG4,105,1390,4.50"));
        assert_eq!(lines.next(), Some("PKG9,0,2600,-"));
    }

    #[test]
    fn test_render_json() {
        let output = render(&sample_report(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["packages"][0]["package_id"], "PKG1");
        assert_eq!(value["packages"][0]["delivery_time"], 3.29);
        assert_eq!(value["packages"][1]["discount"], 105);
        assert!(value["packages"][2]["delivery_time"].is_null());
        assert_eq!(value["dispatches"][0]["package_ids"][1], "PKG4");
        assert_eq!(value["unscheduled"][0], "PKG9");
    }

    #[test]
    fn test_round_hundredths() {
        assert_eq!(round_hundredths(1.4285714), 1.43);
        assert_eq!(round_hundredths(1.3571428), 1.36);
    }
}
