#![forbid(unsafe_code)]

//! Lifecycle events consumed by the reporter.
//!
//! The execution engine emits exactly one event per lifecycle transition, in
//! the order test activity occurs. The reporter is the single consumer; the
//! event stream is the entire contract between the two.

use std::time::Duration;

/// Aggregate assertion counters carried by an [`TestEvent::End`] event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TestTotals {
    /// Assertions observed inside the ended test, nested tests included.
    pub asserts: u64,
    /// Assertions that failed (todo failures excluded by the engine).
    pub failed: u64,
    /// Assertions skipped.
    pub skipped: u64,
}

impl TestTotals {
    /// Assertions that genuinely passed: `asserts − failed − skipped`.
    #[must_use]
    pub const fn passed(&self) -> u64 {
        self.asserts
            .saturating_sub(self.failed)
            .saturating_sub(self.skipped)
    }
}

/// Payload of a single assertion event.
///
/// `expected`, `actual`, and `stack` arrive pre-rendered: value
/// stringification belongs to the execution engine, not the reporter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssertEvent {
    /// Assertion sequence number assigned by the engine.
    pub id: u64,
    /// Assertion label, if any.
    pub name: Option<String>,
    /// Whether the assertion failed.
    pub fail: bool,
    /// Whether the assertion was skipped.
    pub skip: bool,
    /// Whether the assertion is marked todo (a failing todo is not counted
    /// as a failure).
    pub todo: bool,
    /// Elapsed time since the enclosing test started.
    pub diff_time: Duration,
    /// Source location of the assertion, if known.
    pub at: Option<String>,
    /// Comparison operator name (`equal`, `ok`, ...).
    pub operator: Option<String>,
    /// Rendered expected value, when the operator carries one.
    pub expected: Option<String>,
    /// Rendered actual value, when the operator carries one.
    pub actual: Option<String>,
    /// Rendered stack trace when the actual value was an error.
    pub stack: Option<String>,
}

/// One lifecycle event.
///
/// The five kinds are closed: an event of any other shape cannot be
/// constructed, so the consumer matches exhaustively and carries no
/// unknown-type fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestEvent {
    /// A test (possibly nested) started.
    Test {
        /// Test label, if any.
        name: Option<String>,
    },
    /// The innermost open test ended.
    End {
        /// Test label, if any.
        name: Option<String>,
        /// Whether any assertion inside it failed.
        fail: bool,
        /// Aggregate counters for the ended test.
        data: TestTotals,
        /// Elapsed duration of the test.
        diff_time: Duration,
    },
    /// An informational comment.
    Comment {
        /// Comment text.
        name: Option<String>,
    },
    /// Fatal abort; no further events follow.
    BailOut {
        /// Abort reason, if any.
        name: Option<String>,
    },
    /// One assertion resolved.
    Assert(AssertEvent),
}

impl TestEvent {
    /// Stable kind label, used for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Test { .. } => "test",
            Self::End { .. } => "end",
            Self::Comment { .. } => "comment",
            Self::BailOut { .. } => "bail-out",
            Self::Assert(_) => "assert",
        }
    }
}
