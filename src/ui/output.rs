//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag. Results go
//! to stdout; diagnostics (warnings, errors, debug lines) go to stderr.

use std::fmt::Display;

use crate::core::types::{FieldCheck, MetadataSet};
use crate::engine::trace::LogSink;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Print a success message (respects quiet mode).
pub fn success(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Format a metadata set as one `key = value` line per entry.
pub fn format_metadata(set: &MetadataSet) -> String {
    if set.is_empty() {
        return "(no metadata)".to_string();
    }
    set.iter()
        .map(|e| {
            let flag = if e.read_only { "  [read-only]" } else { "" };
            format!("{} = {}  ({}){}", e.key, e.value, e.namespace, flag)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Report a field check. Returns false for errors.
pub fn report_field_check(check: &FieldCheck, verbosity: Verbosity) -> bool {
    match check {
        FieldCheck::Ok => true,
        FieldCheck::Warning(message) => {
            warn(message, verbosity);
            true
        }
        FieldCheck::Error(message) => {
            error(message);
            false
        }
    }
}

/// Trace sink printing each line to stderr.
///
/// Silent in quiet mode.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink {
    verbosity: Verbosity,
}

impl ConsoleSink {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

impl LogSink for ConsoleSink {
    fn line(&mut self, line: &str) {
        if self.verbosity != Verbosity::Quiet {
            eprintln!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::MetadataEntry;

    #[test]
    fn verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn format_empty_metadata() {
        assert_eq!(format_metadata(&MetadataSet::new()), "(no metadata)");
    }

    #[test]
    fn format_marks_read_only() {
        let set = MetadataSet::from_entries(vec![
            MetadataEntry::owned("urn:maven/artifact", "build", "42"),
            MetadataEntry {
                key: "owner".into(),
                value: "teamA".into(),
                namespace: "other#".into(),
                read_only: true,
            },
        ]);
        assert_eq!(
            format_metadata(&set),
            "build = 42  (urn:maven/artifact#)\nowner = teamA  (other#)  [read-only]"
        );
    }

    #[test]
    fn field_check_errors_refuse() {
        assert!(report_field_check(&FieldCheck::Ok, Verbosity::Quiet));
        assert!(report_field_check(
            &FieldCheck::Warning("short".into()),
            Verbosity::Quiet
        ));
        assert!(!report_field_check(
            &FieldCheck::Error("please set a key".into()),
            Verbosity::Quiet
        ));
    }
}
