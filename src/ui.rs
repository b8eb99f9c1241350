//! Terminal output for the `autotag` binary.
//!
//! Only the resolved version goes to stdout so the binary can be used in
//! shell substitutions; everything else goes to stderr.

use console::style;

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

/// Print the resolved version on stdout.
pub fn display_version(version: &str) {
    println!("{}", version);
}

