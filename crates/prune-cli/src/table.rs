use prune_core::FunctionReport;

use crate::color;

const COUNT_WIDTH: usize = 8;

/// Print one row per function with its version counts.
pub fn print_prune_table(reports: &[FunctionReport], dry_run: bool) {
    let name_width = reports
        .iter()
        .map(|r| function_name(&r.function).chars().count())
        .max()
        .unwrap_or(8)
        .clamp(8, 48);
    let widths = [name_width, COUNT_WIDTH, COUNT_WIDTH, COUNT_WIDTH, COUNT_WIDTH];

    println!("{}", color::muted(&border('┌', '┬', '┐', &widths)));
    println!(
        "│ {} │ {} │ {} │ {} │ {} │",
        color::bold(&truncate("Function", name_width)),
        color::bold(&truncate("Versions", COUNT_WIDTH)),
        color::bold(&truncate("Retained", COUNT_WIDTH)),
        color::bold(&truncate("Orphaned", COUNT_WIDTH)),
        color::bold(&truncate("Deleted", COUNT_WIDTH)),
    );
    println!("{}", color::muted(&border('├', '┼', '┤', &widths)));

    for report in reports {
        // Pad before coloring so escape codes don't skew the column widths.
        println!(
            "│ {} │ {} │ {} │ {} │ {} │",
            color::ice(&truncate(function_name(&report.function), name_width)),
            truncate(&report.candidates.len().to_string(), COUNT_WIDTH),
            color::aurora(&truncate(&report.retained.len().to_string(), COUNT_WIDTH)),
            orphan_cell(report.orphaned.len(), dry_run),
            deleted_cell(report, dry_run),
        );
    }

    println!("{}", color::muted(&border('└', '┴', '┘', &widths)));
}

/// Print the versions of a single function, one group per line.
pub fn print_version_breakdown(report: &FunctionReport) {
    println!("{}", color::ice(function_name(&report.function)));
    println!("  Published: {}", join_or_dash(&report.candidates));
    println!("  Aliased:   {}", color::aurora(&join_or_dash(&report.retained)));
    println!("  Orphaned:  {}", color::copper(&join_or_dash(&report.orphaned)));
}

/// Bare function name from an ARN, or the input unchanged when it has no `:`.
pub fn function_name(function: &str) -> &str {
    function.rsplit(':').next().unwrap_or(function)
}

/// Truncate a string to a maximum display width, adding "..." if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_len)
    }
}

fn border(left: char, mid: char, right: char, widths: &[usize]) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}", left, segments.join(&mid.to_string()), right)
}

fn orphan_cell(count: usize, dry_run: bool) -> String {
    let padded = truncate(&count.to_string(), COUNT_WIDTH);
    match (count, dry_run) {
        (0, _) => color::muted(&padded),
        (_, true) => color::copper(&padded),
        (_, false) => padded,
    }
}

fn deleted_cell(report: &FunctionReport, dry_run: bool) -> String {
    if dry_run {
        return color::muted(&truncate("-", COUNT_WIDTH));
    }
    let padded = truncate(&report.deleted.len().to_string(), COUNT_WIDTH);
    if report.deleted.is_empty() {
        color::muted(&padded)
    } else {
        color::ember(&padded)
    }
}

fn join_or_dash(versions: &[String]) -> String {
    if versions.is_empty() {
        "-".to_string()
    } else {
        versions.join(", ")
    }
}
