//! Terminal message formatting.
//!
//! Every user-facing line is routed through [`format_message`], a pure
//! function from severity + text to a styled line. Commands call the
//! convenience printers below; info and success go to stdout, warnings and
//! errors to stderr so scripted consumers can keep the streams apart.

use crossterm::style::Stylize;

/// Severity of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Progress and neutral status lines.
    Info,
    /// A completed operation.
    Success,
    /// Something was skipped or degraded but the run continues.
    Warning,
    /// The operation failed.
    Error,
}

impl Severity {
    /// Status symbol rendered in front of the message, already styled.
    fn symbol(self) -> String {
        match self {
            Severity::Info => "→".blue().to_string(),
            Severity::Success => "✓".green().to_string(),
            Severity::Warning => "⚠".yellow().to_string(),
            Severity::Error => "✗".red().to_string(),
        }
    }
}

/// Format a single message line for the given severity.
pub fn format_message(severity: Severity, msg: &str) -> String {
    format!("{} {msg}", severity.symbol())
}

/// Print an informational message to stdout.
pub fn info(msg: &str) {
    println!("{}", format_message(Severity::Info, msg));
}

/// Print a success message to stdout.
pub fn success(msg: &str) {
    println!("{}", format_message(Severity::Success, msg));
}

/// Print a warning to stderr.
pub fn warning(msg: &str) {
    eprintln!("{}", format_message(Severity::Warning, msg));
}

/// Print an error to stderr.
pub fn error(msg: &str) {
    eprintln!("{}", format_message(Severity::Error, msg));
}
