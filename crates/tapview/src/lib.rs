#![forbid(unsafe_code)]

//! Live TTY reporter for TAP-style test event streams.
//!
//! An external test-execution engine emits lifecycle events — test start and
//! end, assertions, comments, fatal abort — one at a time, in the order test
//! activity occurs. The reporter consumes them synchronously and renders a
//! scrolling, human-readable progress view on an interactive terminal,
//! keeping a live pass/fail score line pinned at the bottom via
//! erase-and-redraw, and composing a summary (two-box panel or compact
//! banner) when the root test concludes.
//!
//! # Example
//!
//! ```no_run
//! use tapview::{Reporter, ReporterOptions, TestEvent, TestTotals};
//! use std::time::Duration;
//!
//! let mut reporter = Reporter::stdout(ReporterOptions::default())?;
//! reporter.process(TestEvent::Test { name: None })?;
//! reporter.process(TestEvent::End {
//!     name: None,
//!     fail: false,
//!     data: TestTotals::default(),
//!     diff_time: Duration::from_millis(3),
//! })?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Construction fails when stdout is not a terminal: the reporter depends on
//! cursor movement and has no non-interactive fallback.

use std::fmt;
use std::io;

pub mod event;
pub mod format;
pub mod reporter;
pub mod sink;
pub mod summary;

pub use event::{AssertEvent, TestEvent, TestTotals};
pub use reporter::{Reporter, ReporterOptions};
pub use sink::{MemorySink, ReportSink, SinkOp, TtySink};
pub use summary::RunSummary;

/// Reporter construction and I/O failures.
#[derive(Debug)]
pub enum ReporterError {
    /// The output target does not support interactive cursor control.
    NotInteractive,
    /// Writing to the sink failed.
    Io(io::Error),
}

impl fmt::Display for ReporterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInteractive => {
                write!(f, "reporter requires an interactive terminal output")
            }
            Self::Io(err) => write!(f, "reporter output failed: {err}"),
        }
    }
}

impl std::error::Error for ReporterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotInteractive => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for ReporterError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_interactive_is_terminal_error() {
        let err = ReporterError::NotInteractive;
        assert!(err.to_string().contains("interactive"));
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn io_errors_keep_their_source() {
        let err = ReporterError::from(io::Error::other("boom"));
        assert!(err.to_string().contains("boom"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
