use console::style;

use crate::cli::GenerationReport;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print the usage line to stderr.
pub fn display_usage(usage: &str) {
    eprintln!("Usage: {}", usage);
}

/// Summarise a finished run: version, tip, and the two files written.
pub fn display_report(report: &GenerationReport) {
    display_success(&format!(
        "Version {}",
        style(&report.version.full_string).bold()
    ));
    display_status(&format!(
        "{} commits, tip {} ({})",
        report.state.commit_count, report.state.short_hash, report.state.long_hash
    ));
    for path in [&report.header_path, &report.release_path] {
        println!("  - {}", path.display());
    }
}
