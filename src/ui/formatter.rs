//! Pure formatting functions for UI output.
//!
//! Everything here writes to stderr: stdout is reserved for the values the
//! tools hand to their callers, such as the next version tag.

use console::style;

use crate::boundary::BoundaryWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Render a question with its two accepted answers, e.g.
/// `Extract x.tar.gz or exit? (extract/exit): `
pub fn format_question(text: &str, positive: &str, negative: &str) -> String {
    format!("{} ({}/{}): ", text, positive, negative)
}
