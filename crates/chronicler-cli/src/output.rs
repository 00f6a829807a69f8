//! Output formatting for the CLI.

use crate::cli::CliFormat;
use crate::error::Result;
use chronicler_dispatch::DispatchOutcome;
use chronicler_domain::RecordCollection;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const SUMMARY_COLUMN_WIDTH: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: CliFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: CliFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a record collection.
    pub fn format_records(&self, records: &RecordCollection) -> Result<String> {
        match self.format {
            CliFormat::Json => Ok(serde_json::to_string_pretty(records)?),
            CliFormat::Table => Ok(self.format_records_table(records)),
            CliFormat::Quiet => Ok(records.topic_ids().join("\n")),
        }
    }

    fn format_records_table(&self, records: &RecordCollection) -> String {
        if records.is_empty() {
            return self.colorize("No records extracted.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Topic", "Techniques", "Applications", "Summary"]);

        for record in records.iter() {
            builder.push_record([
                record.topic_id.as_str(),
                &record.main_techniques.len().to_string(),
                &record.applications.len().to_string(),
                &truncate(&record.summary, SUMMARY_COLUMN_WIDTH),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format one answered query.
    pub fn format_answer(&self, query: &str, outcome: &DispatchOutcome) -> String {
        match self.format {
            CliFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
                "query": query,
                "status": status_label(outcome),
                "message": outcome.message(),
            }))
            .unwrap_or_default(),
            _ => {
                let question = self.colorize(&format!("Q: {}", query), "cyan");
                let color = match outcome {
                    DispatchOutcome::Answered(_) => "green",
                    DispatchOutcome::Failed(_) => "red",
                    _ => "yellow",
                };
                let answer = self.colorize(&format!("A: {}", outcome.message()), color);
                format!("{}\n{}", question, answer)
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("! {}", message), "yellow")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }
        match color {
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            "red" => text.red().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn status_label(outcome: &DispatchOutcome) -> &'static str {
    match outcome {
        DispatchOutcome::Answered(_) => "answered",
        DispatchOutcome::Declined => "declined",
        DispatchOutcome::NotFound { .. } => "not found",
        DispatchOutcome::Failed(_) => "error",
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", head)
}
