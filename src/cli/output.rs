//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use crate::cli::args::OutputFormat;
use crate::services::RunSummary;
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(handle, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

impl TableDisplay for RunSummary {
    fn to_table(&self) -> String {
        let mut output = format!(
            "Bitcoin Cycle Dashboard ({})\n\n",
            crate::render::format_timestamp(self.generated_at)
        );

        output.push_str(&format!(
            "  {:<16} {:>12} {:>10}\n",
            "Indicator", "Reading", "Threshold"
        ));
        for row in self.report.rows() {
            let threshold = row
                .threshold
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string());
            let marker = if self.breaches.iter().any(|b| b.name == row.name) {
                " !"
            } else {
                ""
            };
            output.push_str(&format!(
                "  {:<16} {:>12} {:>10}{}\n",
                row.name,
                row.reading.to_string(),
                threshold,
                marker
            ));
        }

        if !self.failures.is_empty() {
            output.push_str("\nUnavailable:\n");
            for failure in &self.failures {
                output.push_str(&format!("  {}: {}\n", failure.indicator, failure.error));
            }
        }

        output.push_str(&format!("\nDashboard: {}\n", self.output_path.display()));
        output.push_str(&format!("Alert: {}", self.dispatch));

        output
    }

    fn to_compact(&self) -> String {
        let readings = self
            .report
            .rows()
            .iter()
            .map(|r| format!("{}={}", r.name, r.reading))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} | breaches: {} | {}", readings, self.breaches.len(), self.dispatch)
    }
}

/// Result of `config check`
#[derive(Debug, Clone, Serialize)]
pub struct ConfigCheck {
    pub indicators: Vec<String>,
    pub thresholds: usize,
    pub output_path: String,
    pub alerts_enabled: bool,
}

impl TableDisplay for ConfigCheck {
    fn to_table(&self) -> String {
        format!(
            "Configuration OK\n  Indicators: {}\n  Thresholds: {}\n  Output: {}\n  SMS alerts: {}",
            self.indicators.join(", "),
            self.thresholds,
            self.output_path,
            if self.alerts_enabled { "enabled" } else { "disabled" }
        )
    }
}
