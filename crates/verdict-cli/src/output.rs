//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use serde_json;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Modify, Style, Width},
};
use verdict_normalizer::{Normalization, NormalizedAnalysis, Verdict};

/// One normalized payload and where it came from.
#[derive(Debug, Clone)]
pub struct Report {
    /// File path, or `-` for stdin
    pub source: String,

    /// Normalization outcome
    pub outcome: Normalization,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format normalization reports.
    pub fn format_reports(&self, reports: &[Report], show_strategy: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_reports_json(reports, show_strategy),
            OutputFormat::Table => Ok(self.format_reports_table(reports, show_strategy)),
            OutputFormat::Quiet => Ok(self.format_reports_quiet(reports)),
        }
    }

    /// Format reports as JSON.
    fn format_reports_json(&self, reports: &[Report], show_strategy: bool) -> Result<String> {
        let values = reports
            .iter()
            .map(|report| -> Result<serde_json::Value> {
                let mut value = serde_json::to_value(&report.outcome.analysis)?;
                if let Some(map) = value.as_object_mut() {
                    map.insert("source".to_string(), report.source.clone().into());
                    if show_strategy {
                        let strategy = report.outcome.strategy.map(|s| s.name());
                        map.insert("strategy".to_string(), strategy.into());
                    }
                }
                Ok(value)
            })
            .collect::<Result<Vec<_>>>()?;

        if values.len() == 1 {
            return Ok(serde_json::to_string_pretty(&values[0])?);
        }
        Ok(serde_json::to_string_pretty(&values)?)
    }

    /// Format reports as one key/value table each.
    fn format_reports_table(&self, reports: &[Report], show_strategy: bool) -> String {
        reports
            .iter()
            .map(|report| self.format_report_table(report, show_strategy))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn format_report_table(&self, report: &Report, show_strategy: bool) -> String {
        let analysis = &report.outcome.analysis;
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);

        builder.push_record(["Source", report.source.as_str()]);
        if show_strategy {
            let strategy = report.outcome.strategy.map_or("none", |s| s.name());
            builder.push_record(["Strategy", strategy]);
        }
        if !analysis.resource_name().is_empty() {
            builder.push_record(["Resource", analysis.resource_name()]);
        }
        builder.push_record(["Verdict".to_string(), self.verdict(analysis.verdict())]);
        builder.push_record(["Justification", analysis.justification()]);

        if let Some(score) = analysis.efficiency_score() {
            builder.push_record(["Efficiency score".to_string(), format!("{:.1}", score)]);
        }
        for (label, value) in [
            ("Cost impact", analysis.cost_impact()),
            ("Application tier", analysis.application_tier()),
            ("Guardrails", analysis.guardrails_text()),
        ] {
            if let Some(value) = value {
                builder.push_record([label, value]);
            }
        }

        if !analysis.reasons().is_empty() {
            builder.push_record(["Reasons".to_string(), bullets(analysis.reasons())]);
        }
        for (category, items) in analysis.recommendations_by_category() {
            builder.push_record([category.label().to_string(), bullets(items)]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Columns::last()).with(Width::wrap(90)));

        table.to_string()
    }

    /// Format reports in quiet mode (one verdict per line).
    fn format_reports_quiet(&self, reports: &[Report]) -> String {
        reports
            .iter()
            .map(|report| quiet_line(&report.outcome.analysis))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Verdict label, colored by polarity.
    pub fn verdict(&self, verdict: Verdict) -> String {
        let color = match verdict.is_positive() {
            Some(true) => "green",
            Some(false) => "red",
            None => "yellow",
        };
        self.colorize(verdict.label(), color)
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn quiet_line(analysis: &NormalizedAnalysis) -> String {
    if analysis.resource_name().is_empty() {
        analysis.verdict().label().to_string()
    } else {
        format!("{}\t{}", analysis.resource_name(), analysis.verdict().label())
    }
}
