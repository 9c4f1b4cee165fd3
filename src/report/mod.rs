//! HTML summary report: rendering and export to a temporary location.

mod svg;

use chrono::NaiveDateTime;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::{AdditionalMetrics, Chart, RoiMetrics, format_amount};

pub use svg::render_chart_svg;

pub const REPORT_FILE_NAME: &str = "roi_summary_report.html";

const EXPLANATION: &str = "This ROI summary provides the key financial metrics derived from \
adopting AI services, highlighting cost reductions, time savings, and overall financial \
benefits. The ROI status indicates whether the investment yields a positive or negative \
return, helping stakeholders assess its financial impact.";

pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn table_row(index: usize, label: &str, value: &str) -> String {
    let shade = if index % 2 == 0 {
        r#" style="background-color: #f2f2f2;""#
    } else {
        ""
    };
    format!(
        "<tr{shade}><td><strong>{}:</strong></td><td>{}</td></tr>",
        escape_html(label),
        escape_html(value)
    )
}

fn render_chart_section(chart: &Chart) -> String {
    format!(
        r#"<figure class="chart-figure">
      {svg}
      <figcaption><strong>Graph Explanation:</strong> {explanation}</figcaption>
    </figure>"#,
        svg = render_chart_svg(chart),
        explanation = escape_html(chart.explanation),
    )
}

/// Renders the standalone summary report.
pub fn render_summary_html(
    metrics: &RoiMetrics,
    additional: &AdditionalMetrics,
    charts: &[Chart],
    generated_at: NaiveDateTime,
) -> String {
    let display = metrics.display();
    let roi = format!("{}% ({})", display.roi_percent, metrics.status().as_str());
    let rows = [
        ("Total Benefits", format!("${}", display.total_benefits)),
        ("Total Costs", format!("${}", display.total_costs)),
        ("Net Benefits", format!("${}", display.net_benefits)),
        ("ROI", roi),
        (
            "People Cost Reduction",
            format!("${}", display.people_cost_reduction),
        ),
        ("Time Saved Value", format!("${}", display.time_saved_value)),
    ]
    .iter()
    .enumerate()
    .map(|(idx, (label, value))| table_row(idx, label, value))
    .collect::<Vec<_>>()
    .join("\n            ");

    let additional_rows = [
        (
            "Miscellaneous Costs",
            format!("${}", format_amount(additional.miscellaneous_costs)),
        ),
        (
            "Miscellaneous Savings",
            format!("${}", format_amount(additional.miscellaneous_savings)),
        ),
    ]
    .iter()
    .enumerate()
    .map(|(idx, (label, value))| table_row(idx, label, value))
    .collect::<Vec<_>>()
    .join("\n            ");

    let chart_sections = charts
        .iter()
        .map(render_chart_section)
        .collect::<Vec<_>>()
        .join("\n    ");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>ROI Summary Report</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6;">
    <h2 style="color: #2E86C1;">ROI Summary Report</h2>
    <hr>
    <table border="1" cellpadding="10" style="border-collapse: collapse; width: 100%;">
            {rows}
    </table>
    <h3>Additional Metrics</h3>
    <p>Reported for reference; not included in the ROI calculation.</p>
    <table border="1" cellpadding="10" style="border-collapse: collapse; width: 100%;">
            {additional_rows}
    </table>
    <h3>Charts</h3>
    {chart_sections}
    <hr>
    <p>Generated on {timestamp}</p>
    <p><strong>Explanation:</strong> {EXPLANATION}</p>
</body>
</html>
"#,
        timestamp = generated_at.format("%Y-%m-%d %H:%M:%S"),
    )
}

/// Plain-text rendering of the metrics for terminal output.
pub fn render_text_summary(metrics: &RoiMetrics) -> String {
    let display = metrics.display();
    let rows = [
        ("Total Benefits", display.total_benefits),
        ("Total Costs", display.total_costs),
        ("Net Benefits", display.net_benefits),
        ("ROI (%)", display.roi_percent),
        ("People Cost Reduction", display.people_cost_reduction),
        ("Time Saved Value", display.time_saved_value),
    ];
    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

    let mut out = String::new();
    for (label, value) in &rows {
        out.push_str(&format!("{label:<label_width$}  {value:>value_width$}\n"));
    }
    out.push_str(&format!("ROI status: {}\n", metrics.status().as_str()));
    out
}

/// Writes the report into `dir` and returns the file path.
pub fn export_report(html: &str, dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(REPORT_FILE_NAME);
    fs::write(&path, html)?;
    log::info!("ROI summary report written to {}", path.display());
    Ok(path)
}

/// The location reports go to when the caller does not choose one.
pub fn default_report_dir() -> PathBuf {
    std::env::temp_dir()
}

pub fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}
