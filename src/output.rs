//! CLI output formatting.
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.
//!
//! ## Scan
//!
//! ```text
//! Posts
//! 001 [2024-06-01] Elsewhere
//!     Target: /~friend/phlog/2024-06-01.txt	friend.example.org	70
//! 002 [2024-05-09] Second Post
//!     Target: 2024-05-09__Second_Post.md
//!
//! Archives
//! 001 2023
//!     Target: AR_2023
//!
//! Skipped
//!     2024-02-02__Broken.glink (empty)
//! ```

use crate::generate::GenerateReport;
use crate::types::{Entry, EntryKind, ScanResult, SkipReason};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn entry_lines(entry: &Entry, index: usize) -> [String; 2] {
    let marker = match entry.kind() {
        EntryKind::Directory => "/",
        EntryKind::File | EntryKind::Archive => "",
    };
    [
        format!("{} {}{}", format_index(index), entry.title(), marker),
        format!("    Target: {}", entry.target()),
    ]
}

fn section(lines: &mut Vec<String>, heading: &str, entries: &[Entry]) {
    if entries.is_empty() {
        return;
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(heading.to_string());
    for (i, entry) in entries.iter().enumerate() {
        lines.extend(entry_lines(entry, i + 1));
    }
}

/// Format the entries found by a scan, in gophermap order.
pub fn format_scan_output(result: &ScanResult) -> Vec<String> {
    let mut lines = Vec::new();
    section(&mut lines, "Posts", &result.regular);
    section(&mut lines, "Archives", &result.archive);

    if !result.skipped.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Skipped".to_string());
        for skipped in &result.skipped {
            let reason = match &skipped.reason {
                SkipReason::Empty => "empty".to_string(),
                SkipReason::Unreadable(msg) => msg.clone(),
            };
            lines.push(format!("    {} ({})", skipped.name, reason));
        }
    }

    if lines.is_empty() {
        lines.push("Nothing found".to_string());
    }
    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(result: &ScanResult) {
    for line in format_scan_output(result) {
        println!("{}", line);
    }
}

/// Format the one-line summary of a generate run.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let destination = report
        .output
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdout".to_string());
    let mut line = format!(
        "Wrote {} lines to {} ({} posts, {} archives",
        report.lines_written, destination, report.regular_entries, report.archive_entries
    );
    if !report.skipped.is_empty() {
        line.push_str(&format!(", {} skipped", report.skipped.len()));
    }
    line.push(')');
    vec![line]
}

/// Print the generate summary to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}
