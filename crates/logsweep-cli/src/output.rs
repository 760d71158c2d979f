//! Output formatting for the CLI.

use crate::cli::CliFormat;
use crate::error::Result;
use colored::{Color, Colorize};
use logsweep_janitor::{SweepEvent, SweepResult};
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
};

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

    /// Progress line for one sweep event.
    ///
    /// Only the table format prints progress; JSON and quiet keep stdout for
    /// the summary alone.
    pub fn progress(&self, event: &SweepEvent) -> Option<String> {
        if self.format != CliFormat::Table {
            return None;
        }

        let line = match event {
            SweepEvent::GroupEmpty { group } => {
                format!("no streams in group {} (gonna skip)", group)
            }
            SweepEvent::GroupLive { group } => {
                self.colorize(&format!("ignoring group {}", group), Color::Blue)
            }
            SweepEvent::GroupDeleting { group, streams } => format!(
                "{} {} ({} streams)",
                self.colorize("deleting group", Color::Red),
                self.colorize(group, Color::Blue),
                streams
            ),
            SweepEvent::GroupDeleted { total, .. } => {
                format!("{} (total: {})", self.ok(), total)
            }
            SweepEvent::GroupDeleteFailed { error, .. } => {
                format!("{} {}", self.failed(), error)
            }
            SweepEvent::StreamDeleting { group, stream } => format!(
                "{} {} from group {}",
                self.colorize("deleting stream", Color::Red),
                stream,
                group
            ),
            SweepEvent::StreamDeleted { total, .. } => format!(
                "{} {}",
                self.ok(),
                self.colorize(&format!("(total: {})", total), Color::Blue)
            ),
            SweepEvent::StreamDeleteFailed { error, .. } => {
                format!("{} {}", self.failed(), error)
            }
            SweepEvent::StreamIgnored { group, stream } => self.colorize(
                &format!("ignoring stream {} of group {}", stream, group),
                Color::Blue,
            ),
            SweepEvent::StreamListFailed { group, error } => format!(
                "{} listing streams of group {}: {}",
                self.failed(),
                group,
                error
            ),
            SweepEvent::EntitySkipped { entity, error } => format!(
                "{} one entry may have been skipped ({}) - {}",
                self.warn(),
                entity,
                error
            ),
            SweepEvent::OrderingViolated { group } => format!(
                "{} streams of group {} are not ordered newest-first",
                self.warn(),
                group
            ),
            SweepEvent::AfterListingFailed { error } => format!(
                "{} could not measure log size after execution: {}",
                self.warn(),
                error
            ),
        };

        Some(line)
    }

    /// Format the end-of-run summary.
    pub fn summary(&self, result: &SweepResult) -> Result<String> {
        match self.format {
            CliFormat::Table => Ok(self.summary_table(result)),
            CliFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            CliFormat::Quiet => Ok(self.summary_quiet(result)),
        }
    }

    fn summary_table(&self, result: &SweepResult) -> String {
        let after = result
            .bytes_after
            .map(|b| b.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let reclaimed = result
            .bytes_reclaimed()
            .map(|b| b.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let mut builder = Builder::default();
        let rows = [
            ("deleted log groups", result.groups_deleted.to_string()),
            ("deleted log streams", result.streams_deleted.to_string()),
            ("failed store calls", result.failed_calls.to_string()),
            ("log size before (bytes)", result.bytes_before.to_string()),
            ("log size after (bytes)", after),
            ("reclaimed (bytes)", reclaimed),
        ];
        for (label, value) in rows {
            builder.push_record([label.to_string(), value]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Columns::last()).with(Alignment::right()));

        let mut lines = vec![table.to_string()];

        if result.dry_run {
            lines.push(self.colorize("dry run: nothing was actually deleted", Color::Yellow));
        }

        if result.has_skips() {
            lines.push(format!(
                "{} skipped due to unexpected errors, please review manually:",
                self.warn()
            ));
            for entity in &result.skipped {
                lines.push(format!("  {}", entity));
            }
        }

        lines.join("\n")
    }

    fn summary_quiet(&self, result: &SweepResult) -> String {
        let after = result
            .bytes_after
            .map(|b| b.to_string())
            .unwrap_or_else(|| "?".to_string());
        format!(
            "groups={} streams={} bytes={}->{} failed={} skipped={}",
            result.groups_deleted,
            result.streams_deleted,
            result.bytes_before,
            after,
            result.failed_calls,
            result.skipped.len()
        )
    }

    /// Format a fatal error together with the exit code it causes.
    pub fn fatal(&self, message: &str, code: i32) -> String {
        format!(
            "{} {} [exit code: {}]",
            self.colorize("[ERROR]", Color::Red),
            message,
            code
        )
    }

    fn ok(&self) -> String {
        self.colorize("[OK]", Color::Green)
    }

    fn failed(&self) -> String {
        self.colorize("[FAILED]", Color::Red)
    }

    fn warn(&self) -> String {
        self.colorize("[WARN]", Color::Yellow)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: Color) -> String {
        if !self.color_enabled {
            return text.to_string();
        }
        text.color(color).to_string()
    }
}
