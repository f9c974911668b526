//! Summary and table report generators for shell output.
//!
//! Provides compact, human-readable output for terminal usage.

use super::{RecordDiff, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{ChangeKind, ClassifiedPair};
use crate::records::RecordKey;
use serde_json::Value;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn kind_color(kind: ChangeKind) -> &'static str {
    match kind {
        ChangeKind::Added => "green",
        ChangeKind::Removed => "red",
        ChangeKind::Updated => "yellow",
        ChangeKind::Unchanged => "dim",
    }
}

const fn plural(count: usize) -> &'static str {
    if count == 1 {
        "record"
    } else {
        "records"
    }
}

/// Kinds listed by a report, in group order.
fn listed_kinds(config: &ReportConfig) -> impl Iterator<Item = ChangeKind> + '_ {
    ChangeKind::ALL
        .into_iter()
        .filter(|kind| kind.is_change() || config.include_unchanged)
}

/// Pairs of `kind`, capped at `max_items`, plus the number left out.
fn capped<'r, 'a>(
    result: &'r RecordDiff<'a>,
    kind: ChangeKind,
    config: &ReportConfig,
) -> (
    &'r [ClassifiedPair<'a, RecordKey, Value, Value>],
    usize,
) {
    let group = result.group(kind);
    let shown = config.max_items.map_or(group.len(), |max| max.min(group.len()));
    (&group[..shown], group.len() - shown)
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(
        &self,
        result: &RecordDiff<'_>,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let summary = result.summary();
        let mut lines = Vec::new();

        // Header
        lines.push(self.color("Collection Diff Summary", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        // File info
        let meta = &config.metadata;
        if meta.base_path.is_some() || meta.working_path.is_some() {
            lines.push(format!(
                "{}  {} → {}",
                self.color("Files:", "cyan"),
                meta.base_path.as_deref().unwrap_or("base"),
                meta.working_path.as_deref().unwrap_or("working")
            ));
        }
        if !meta.key_fields.is_empty() {
            lines.push(format!(
                "{}  {}",
                self.color("Key:", "cyan"),
                meta.key_fields.join(", ")
            ));
        }

        // Distinct key counts per side
        let base_keys = summary.removed + summary.updated + summary.unchanged;
        let working_keys = summary.added + summary.updated + summary.unchanged;
        lines.push(format!(
            "{}  {} → {} keys",
            self.color("Size:", "cyan"),
            base_keys,
            working_keys
        ));

        lines.push(String::new());

        // Changes
        lines.push(self.color("Changes:", "bold"));
        for kind in ChangeKind::ALL.into_iter().filter(ChangeKind::is_change) {
            let count = summary.count(kind);
            if count > 0 {
                lines.push(format!(
                    "  {} {} {}",
                    self.color(&format!("{}{count}", kind.symbol()), kind_color(kind)),
                    plural(count),
                    kind
                ));
            }
        }
        if !result.has_changes() {
            lines.push(format!("  {}", self.color("No changes", "dim")));
        }
        if config.include_unchanged {
            lines.push(format!(
                "  {} {} unchanged",
                self.color(&format!("={}", summary.unchanged), "dim"),
                plural(summary.unchanged)
            ));
        }

        // Listing
        let has_listing =
            result.has_changes() || (config.include_unchanged && summary.unchanged > 0);
        if has_listing && !config.summary_only {
            lines.push(String::new());
            for kind in listed_kinds(config) {
                let (pairs, hidden) = capped(result, kind, config);
                for pair in pairs {
                    lines.push(format!(
                        "  {} {}",
                        self.color(&kind.symbol().to_string(), kind_color(kind)),
                        pair.key()
                    ));
                }
                if hidden > 0 {
                    lines.push(self.color(&format!("  ... and {hidden} more {kind}"), "dim"));
                }
            }
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

/// Table reporter for terminal output
pub struct TableReporter {
    /// Use colored output
    colored: bool,
}

impl TableReporter {
    /// Create a new table reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn status(&self, kind: ChangeKind) -> String {
        let label = match kind {
            ChangeKind::Added => "+ Added",
            ChangeKind::Removed => "- Removed",
            ChangeKind::Updated => "~ Updated",
            ChangeKind::Unchanged => "= Same",
        };
        // Pad before coloring so escape codes do not break alignment.
        self.color(&format!("{label:<12}"), kind_color(kind))
    }
}

impl Default for TableReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TableReporter {
    fn generate(
        &self,
        result: &RecordDiff<'_>,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        // Header
        lines.push(format!(
            "{} {} {}",
            self.color(&format!("{:<12}", "STATUS"), "bold"),
            self.color(&format!("{:<30}", "KEY"), "bold"),
            self.color("RECORD", "bold")
        ));
        lines.push("─".repeat(85));

        for kind in listed_kinds(config).filter(|_| !config.summary_only) {
            let (pairs, hidden) = capped(result, kind, config);
            for pair in pairs {
                let record = pair.latest().into_inner().to_string();
                lines.push(format!(
                    "{} {:<30} {}",
                    self.status(kind),
                    truncate(&pair.key().to_string(), 30),
                    truncate(&record, 41)
                ));
            }
            if hidden > 0 {
                lines.push(self.color(&format!("{:<12} ... {hidden} more", ""), "dim"));
            }
        }

        if !result.has_changes() && !config.include_unchanged {
            lines.push(self.color("No changes", "dim"));
        }

        lines.push("─".repeat(85));
        lines.push(format!(
            "Total: {} added, {} removed, {} updated",
            result.added().len(),
            result.removed().len(),
            result.updated().len()
        ));

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let end = floor_char_boundary(s, max_len - 3);
        format!("{}...", &s[..end])
    } else {
        let end = floor_char_boundary(s, max_len);
        s[..end].to_string()
    }
}

/// Find the largest byte index <= `index` that is a valid UTF-8 char boundary.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    (0..=index).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::test_support;

    #[test]
    fn test_summary_counts_and_listing() {
        let (base, working) = (test_support::base(), test_support::working());
        let result = test_support::diff(&base, &working);

        let report = SummaryReporter::new()
            .no_color()
            .generate(&result, &ReportConfig::default())
            .expect("report");

        assert!(report.contains("-1 record removed"), "{report}");
        assert!(report.contains("+1 record added"), "{report}");
        assert!(report.contains("~1 record updated"), "{report}");
        assert!(report.contains("3 → 3 keys"), "{report}");
        assert!(report.contains("  - \"1\""), "{report}");
        assert!(!report.contains("= \"3\""), "{report}");
    }

    #[test]
    fn test_summary_include_unchanged() {
        let (base, working) = (test_support::base(), test_support::working());
        let result = test_support::diff(&base, &working);

        let report = SummaryReporter::new()
            .no_color()
            .generate(&result, &ReportConfig::with_unchanged())
            .expect("report");
        assert!(report.contains("  = \"3\""), "{report}");
    }

    #[test]
    fn test_summary_no_changes() {
        let base = test_support::base();
        let result = test_support::diff(&base, &base);
        let report = SummaryReporter::new()
            .no_color()
            .generate(&result, &ReportConfig::default())
            .expect("report");
        assert!(report.contains("No changes"));
    }

    #[test]
    fn test_summary_max_items() {
        let (base, working) = (test_support::base(), Vec::new());
        let result = test_support::diff(&base, &working);
        let config = ReportConfig {
            max_items: Some(1),
            ..Default::default()
        };
        let report = SummaryReporter::new()
            .no_color()
            .generate(&result, &config)
            .expect("report");
        assert!(report.contains("... and 2 more removed"), "{report}");
    }

    #[test]
    fn test_summary_only_omits_listing() {
        let (base, working) = (test_support::base(), test_support::working());
        let result = test_support::diff(&base, &working);
        let config = ReportConfig {
            summary_only: true,
            ..Default::default()
        };

        let report = SummaryReporter::new()
            .no_color()
            .generate(&result, &config)
            .expect("report");
        assert!(report.contains("+1 record added"), "{report}");
        assert!(!report.contains("  + \"4\""), "{report}");

        let table = TableReporter::new()
            .no_color()
            .generate(&result, &config)
            .expect("report");
        assert!(!table.contains("~ Updated"), "{table}");
        assert!(table.contains("Total: 1 added, 1 removed, 1 updated"));
    }

    #[test]
    fn test_colored_output_has_escapes() {
        let (base, working) = (test_support::base(), test_support::working());
        let result = test_support::diff(&base, &working);
        let report = SummaryReporter::new()
            .generate(&result, &ReportConfig::default())
            .expect("report");
        assert!(report.contains("\x1b[32m"));
    }

    #[test]
    fn test_table_rows() {
        let (base, working) = (test_support::base(), test_support::working());
        let result = test_support::diff(&base, &working);
        let report = TableReporter::new()
            .no_color()
            .generate(&result, &ReportConfig::default())
            .expect("report");

        assert!(report.contains("~ Updated"));
        assert!(report.contains(r#"{"id":"2","v":9}"#), "{report}");
        assert!(report.contains("Total: 1 added, 1 removed, 1 updated"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer string", 8), "a lon...");
        assert_eq!(truncate("ééé", 3), "é");
    }
}
