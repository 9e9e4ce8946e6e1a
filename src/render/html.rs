//! HTML dashboard rendering

use crate::domain::Report;
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Placeholder for indicators without a threshold
pub const NO_THRESHOLD: &str = "—";

const HEAD: &str = r#"<html>
<head>
  <title>Bitcoin Cycle Dashboard</title>
  <style>
    body { font-family: Arial, sans-serif; }
    table { border-collapse: collapse; width: 80%; margin:auto; }
    th, td { border: 1px solid #ccc; padding: 8px; text-align: center; }
    th { background-color: #f2f2f2; }
  </style>
</head>
<body>
  <h2 style="text-align:center;">Bitcoin Cycle Dashboard</h2>
  <table>
    <tr><th>Indicator</th><th>Reading</th><th>Threshold</th></tr>
"#;

/// Generation stamp, UTC to the minute
pub fn format_timestamp(generated_at: DateTime<Utc>) -> String {
    generated_at.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Escape text for an HTML element body
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the report as a self-contained HTML page
///
/// Output depends only on the arguments.
pub fn render_html(report: &Report, generated_at: DateTime<Utc>) -> String {
    let mut html = String::from(HEAD);

    for row in report.rows() {
        let threshold = row
            .threshold
            .map(|t| t.to_string())
            .unwrap_or_else(|| NO_THRESHOLD.to_string());
        // Writing into a String cannot fail
        let _ = writeln!(
            html,
            "    <tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&row.name),
            row.reading,
            threshold
        );
    }

    let _ = write!(
        html,
        "  </table>\n  <p style=\"text-align:center;\">Last updated: {}</p>\n</body>\n</html>\n",
        format_timestamp(generated_at)
    );

    html
}
