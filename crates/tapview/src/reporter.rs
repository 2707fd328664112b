#![forbid(unsafe_code)]

//! The event consumer: a reactive state machine over the lifecycle stream.
//!
//! `process` is the sole mutating operation. Every call first erases the
//! trailing score footer (cursor up one line, clear it), dispatches on the
//! event, then redraws the footer as the new trailing line — so the footer
//! always reads as the last line of output. Branches that end the run
//! (the root `End`, `BailOut`) skip the redraw and leave the reporter inert.
//!
//! # Invariants
//!
//! 1. Frame-stack depth equals nesting depth; a well-formed stream never
//!    pops an empty stack.
//! 2. Each `process` call removes exactly one line and appends exactly one
//!    footer line, so net growth equals the content lines emitted.
//! 3. Counters are monotone and mutated only here; each `assert` event
//!    increments exactly one of the pass/fail counters.

use std::io;
use std::time::Duration;

use tracing::{debug, trace};

use tapview_style as style;

use crate::ReporterError;
use crate::event::{AssertEvent, TestEvent, TestTotals};
use crate::format::{format_duration, format_number};
use crate::sink::{ReportSink, TtySink};
use crate::summary::{self, RunSummary};

const ANONYMOUS: &str = "anonymous test";

/// Reporter configuration. All options default to the interactive defaults.
#[derive(Debug, Clone, Copy)]
pub struct ReporterOptions {
    /// Replace assertion ids with a locally maintained sequential counter.
    pub renumber_asserts: bool,
    /// Suppress all passing output; show only failing tests and assertions.
    pub failure_only: bool,
    /// Render the two-box summary panel; `false` selects the compact banner.
    pub show_banner: bool,
    /// Show elapsed durations on tests and assertions.
    pub show_time: bool,
    /// Show operator, expected/actual values, and stack traces on failures.
    pub show_data: bool,
}

impl Default for ReporterOptions {
    fn default() -> Self {
        Self {
            renumber_asserts: false,
            failure_only: false,
            show_banner: true,
            show_time: true,
            show_data: false,
        }
    }
}

impl ReporterOptions {
    /// Enable or disable sequential assertion renumbering.
    #[must_use]
    pub const fn with_renumber_asserts(mut self, enabled: bool) -> Self {
        self.renumber_asserts = enabled;
        self
    }

    /// Enable or disable failure-only output.
    #[must_use]
    pub const fn with_failure_only(mut self, enabled: bool) -> Self {
        self.failure_only = enabled;
        self
    }

    /// Select the panel summary (`true`) or the compact banner (`false`).
    #[must_use]
    pub const fn with_banner(mut self, enabled: bool) -> Self {
        self.show_banner = enabled;
        self
    }

    /// Enable or disable elapsed-time display.
    #[must_use]
    pub const fn with_time(mut self, enabled: bool) -> Self {
        self.show_time = enabled;
        self
    }

    /// Enable or disable failure detail (operator, values, stack).
    #[must_use]
    pub const fn with_data(mut self, enabled: bool) -> Self {
        self.show_data = enabled;
        self
    }
}

/// One open test.
#[derive(Debug)]
struct TestFrame {
    name: Option<String>,
    /// Content-line count when the frame opened.
    opened_at_line: u64,
    /// Whether the failing header for this frame was already emitted
    /// (failure-only mode).
    fail: bool,
}

/// Live TTY reporter over a lifecycle event stream.
///
/// Each instance owns its counters and frame stack; independent runs use
/// independent reporters. After the root `End` or a `BailOut` the instance
/// is finished and must not receive further events.
#[derive(Debug)]
pub struct Reporter<S: ReportSink> {
    sink: S,
    options: ReporterOptions,
    depth: usize,
    test_counter: u64,
    assert_counter: u64,
    successful_asserts: u64,
    failed_asserts: u64,
    todo_asserts: u64,
    lines: u64,
    stack: Vec<TestFrame>,
    finished: bool,
}

impl Reporter<TtySink> {
    /// Construct over stdout.
    ///
    /// # Errors
    ///
    /// [`ReporterError::NotInteractive`] when stdout is not a terminal;
    /// [`ReporterError::Io`] when writing the seed line fails.
    pub fn stdout(options: ReporterOptions) -> Result<Self, ReporterError> {
        let sink = TtySink::stdout()?;
        Self::with_sink(sink, options).map_err(ReporterError::Io)
    }
}

impl<S: ReportSink> Reporter<S> {
    /// Construct over an arbitrary sink.
    ///
    /// Writes one seed line so the first footer erase has a line to consume.
    ///
    /// # Errors
    ///
    /// Propagates sink I/O failures.
    pub fn with_sink(mut sink: S, options: ReporterOptions) -> io::Result<Self> {
        sink.write_line("")?;
        Ok(Self {
            sink,
            options,
            depth: 0,
            test_counter: 0,
            assert_counter: 0,
            successful_asserts: 0,
            failed_asserts: 0,
            todo_asserts: 0,
            lines: 1,
            stack: Vec::new(),
            finished: false,
        })
    }

    /// Whether the run has concluded (root `End` or `BailOut` processed).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The sink this reporter writes to.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Current nesting depth of open tests.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Cumulative passing assertion count.
    #[must_use]
    pub fn successful_asserts(&self) -> u64 {
        self.successful_asserts
    }

    /// Cumulative failing assertion count.
    #[must_use]
    pub fn failed_asserts(&self) -> u64 {
        self.failed_asserts
    }

    /// Cumulative todo assertion count.
    #[must_use]
    pub fn todo_asserts(&self) -> u64 {
        self.todo_asserts
    }

    /// Consume one lifecycle event.
    ///
    /// Calling this on a finished reporter is a contract violation: it is
    /// debug-asserted and a no-op in release builds.
    ///
    /// # Errors
    ///
    /// Propagates sink I/O failures.
    pub fn process(&mut self, event: TestEvent) -> io::Result<()> {
        if self.finished {
            debug_assert!(false, "event sent to a finished reporter");
            return Ok(());
        }

        trace!(kind = event.kind(), depth = self.depth, "event");
        self.sink.cursor_up()?;
        self.sink.clear_line()?;

        match event {
            TestEvent::Test { name } => self.on_test(name)?,
            TestEvent::End {
                name,
                fail,
                data,
                diff_time,
            } => {
                if self.on_end(name, fail, data, diff_time)? {
                    return Ok(());
                }
            }
            TestEvent::Comment { name } => self.on_comment(name)?,
            TestEvent::BailOut { name } => return self.on_bail_out(name),
            TestEvent::Assert(assert) => self.on_assert(&assert)?,
        }

        self.show_score()
    }

    /// Emit a content line at the given nesting depth. Lines at depth 0 or 1
    /// carry no indent; deeper lines are indented one two-space level per
    /// depth beyond the first.
    fn out_at(&mut self, depth: usize, text: &str) -> io::Result<()> {
        if depth < 2 {
            self.sink.write_line(text)?;
        } else {
            let indented = format!("{}{text}", "  ".repeat(depth - 1));
            self.sink.write_line(&indented)?;
        }
        self.lines += 1;
        Ok(())
    }

    fn out(&mut self, text: &str) -> io::Result<()> {
        self.out_at(self.depth, text)
    }

    fn on_test(&mut self, name: Option<String>) -> io::Result<()> {
        if self.depth > 0 {
            // The root wrapper is not counted as a test of its own.
            self.test_counter += 1;
            if !self.options.failure_only {
                let label = name.as_deref().unwrap_or(ANONYMOUS);
                self.out(&format!("○ {label}"))?;
            }
        }
        self.depth += 1;
        self.stack.push(TestFrame {
            name,
            opened_at_line: self.lines,
            fail: false,
        });
        Ok(())
    }

    /// Returns `true` when this was the root `End` and the summary has been
    /// rendered (no footer follows).
    fn on_end(
        &mut self,
        name: Option<String>,
        fail: bool,
        data: TestTotals,
        diff_time: Duration,
    ) -> io::Result<bool> {
        if let Some(frame) = self.stack.pop() {
            trace!(opened_at_line = frame.opened_at_line, "closing test");
        }
        self.depth = self.depth.saturating_sub(1);

        if self.depth > 0 {
            if !self.options.failure_only {
                let label = name.as_deref().unwrap_or(ANONYMOUS);
                let headline = if fail {
                    style::strong_failure(&format!("✗ {label}"))
                } else {
                    style::success(&format!("✓ {label}"))
                };
                let mut text = headline;
                text.push_str(&self.badge(data));
                if self.options.show_time {
                    text.push_str(&style::muted(&format!(
                        " - {}",
                        format_duration(diff_time)
                    )));
                }
                self.out(&text)?;
            }
            return Ok(false);
        }

        debug!(fail, asserts = data.asserts, "root test finished");
        self.render_summary(fail, data, diff_time)?;
        self.finished = true;
        Ok(true)
    }

    fn on_comment(&mut self, name: Option<String>) -> io::Result<()> {
        if !self.options.failure_only {
            let text = name.as_deref().unwrap_or("empty comment");
            self.out(&style::info(&style::italic(text)))?;
        }
        Ok(())
    }

    fn on_bail_out(&mut self, name: Option<String>) -> io::Result<()> {
        let mut text = String::from("Bail out!");
        if let Some(name) = name {
            text.push(' ');
            text.push_str(&name);
        }
        debug!("bail out");
        self.out(&style::warning(&text))?;
        self.finished = true;
        Ok(())
    }

    fn on_assert(&mut self, assert: &AssertEvent) -> io::Result<()> {
        let is_failed = assert.fail && !assert.todo;
        if is_failed {
            self.failed_asserts += 1;
        } else {
            self.successful_asserts += 1;
        }
        if assert.todo {
            self.todo_asserts += 1;
        }

        // Renumbering tracks every assertion, shown or suppressed, so the
        // sequence stays aligned with the stream.
        let shown_id = if self.options.renumber_asserts {
            self.assert_counter += 1;
            self.assert_counter
        } else {
            assert.id
        };

        if !is_failed && self.options.failure_only {
            return Ok(());
        }

        let glyph = if assert.fail { "✗" } else { "✓" };
        let mut text = format!("{glyph} {shown_id}");
        if assert.skip {
            text.push_str(" SKIP");
        } else if assert.todo {
            text.push_str(" TODO");
        }
        if let Some(name) = &assert.name {
            text.push(' ');
            text.push_str(name);
        }
        if !assert.skip {
            text = if is_failed {
                style::failure(&text)
            } else {
                style::success(&text)
            };
        }
        if self.options.show_time {
            text.push_str(&style::muted(&format!(
                " - {}",
                format_duration(assert.diff_time)
            )));
        }
        if assert.fail {
            if let Some(at) = &assert.at {
                text.push_str(&style::muted(&format!(" - {at}")));
            }
        }

        // Failure-only mode: the first failing assertion inside a test emits
        // that test's failing header retroactively, one level shallower.
        if self.options.failure_only {
            let header = match self.stack.last_mut() {
                Some(frame) if !frame.fail => {
                    frame.fail = true;
                    Some(frame.name.clone())
                }
                _ => None,
            };
            if let Some(name) = header {
                let label = name.as_deref().unwrap_or(ANONYMOUS);
                let line = style::strong_failure(&format!("✗ {label}"));
                self.out_at(self.depth.saturating_sub(1), &line)?;
            }
        }

        self.out(&text)?;

        if !assert.fail || !self.options.show_data {
            return Ok(());
        }

        let operator = assert.operator.as_deref().unwrap_or("unknown");
        self.out(&format!("{}{operator}", style::muted("  operator: ")))?;
        if let Some(expected) = assert.expected.clone() {
            self.out(&format!("{}{expected}", style::muted("  expected: ")))?;
        }
        if let Some(actual) = assert.actual.clone() {
            self.out(&format!("{}{actual}", style::muted("  actual:   ")))?;
        }
        if let Some(stack) = assert.stack.clone() {
            self.out(&style::muted("  stack: |-"))?;
            for line in stack.lines() {
                self.out(&style::muted(&format!("    {line}")))?;
            }
        }
        Ok(())
    }

    /// Compact pass/fail/skip badge appended to a nested test's end line.
    ///
    /// Empty when all three counts are zero. Painted cells carry no
    /// per-cell reset; the badge closes with one full reset.
    fn badge(&self, totals: TestTotals) -> String {
        let success = totals.passed();
        if success == 0 && totals.failed == 0 && totals.skipped == 0 {
            return String::new();
        }
        let mut text = String::from(" ");
        let cell = format!(" {} ", format_number(success));
        if success > 0 {
            text.push_str(&style::success_seq());
            text.push_str(&cell);
        } else {
            text.push_str(&style::on_black(&cell));
        }
        let cell = format!(" {} ", format_number(totals.failed));
        if totals.failed > 0 {
            text.push_str(&style::failure_seq());
            text.push_str(&cell);
        } else {
            text.push_str(&style::on_black(&cell));
        }
        if totals.skipped > 0 {
            let cell = format!(" {} ", format_number(totals.skipped));
            text.push_str(&style::on_black(&style::info(&cell)));
        }
        text.push_str(style::RESET);
        text
    }

    /// Redraw the score footer as the trailing line.
    fn show_score(&mut self) -> io::Result<()> {
        let line = format!(
            "{}  {}  {}  {}  {}",
            style::success_seq(),
            self.successful_asserts,
            style::failure_seq(),
            self.failed_asserts,
            style::RESET
        );
        self.out(&line)
    }

    fn render_summary(&mut self, fail: bool, data: TestTotals, diff_time: Duration) -> io::Result<()> {
        let summary = RunSummary {
            fail,
            totals: data,
            tests: self.test_counter,
            todo_asserts: self.todo_asserts,
            diff_time,
        };
        if !self.options.show_banner {
            return self.out(&summary::compact_banner(&summary));
        }
        self.out("")?;
        for line in summary::panel(&summary) {
            self.out(&line)?;
        }
        self.out("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use tapview_box::strip_ansi;

    fn reporter(options: ReporterOptions) -> Reporter<MemorySink> {
        Reporter::with_sink(MemorySink::new(), options).expect("memory sink never fails")
    }

    #[test]
    fn options_builders_flip_flags() {
        let options = ReporterOptions::default()
            .with_renumber_asserts(true)
            .with_failure_only(true)
            .with_banner(false)
            .with_time(false)
            .with_data(true);
        assert!(options.renumber_asserts);
        assert!(options.failure_only);
        assert!(!options.show_banner);
        assert!(!options.show_time);
        assert!(options.show_data);
    }

    #[test]
    fn badge_is_empty_when_nothing_ran() {
        let reporter = reporter(ReporterOptions::default());
        assert_eq!(reporter.badge(TestTotals::default()), "");
    }

    #[test]
    fn badge_paints_pass_fail_and_skip_cells() {
        let reporter = reporter(ReporterOptions::default());
        let badge = reporter.badge(TestTotals {
            asserts: 6,
            failed: 1,
            skipped: 2,
        });
        let plain = strip_ansi(&badge);
        assert_eq!(plain, "  3  1  2 ");
        assert!(badge.contains(&style::success_seq()));
        assert!(badge.contains(&style::failure_seq()));
        assert!(badge.ends_with(style::RESET));
    }

    #[test]
    fn badge_dims_zero_cells() {
        let reporter = reporter(ReporterOptions::default());
        let badge = reporter.badge(TestTotals {
            asserts: 2,
            failed: 2,
            skipped: 0,
        });
        // No passing cell paint, failed cell painted, no skip cell.
        assert!(!badge.contains(&style::success_seq()));
        assert!(badge.contains(&style::failure_seq()));
        assert_eq!(strip_ansi(&badge), "  0  2 ");
    }

    #[test]
    fn out_indents_beyond_depth_one() {
        let mut reporter = reporter(ReporterOptions::default());
        reporter.out_at(0, "root").unwrap();
        reporter.out_at(1, "child").unwrap();
        reporter.out_at(2, "grand").unwrap();
        reporter.out_at(3, "great").unwrap();
        assert_eq!(
            reporter.sink.screen(),
            ["", "root", "child", "  grand", "    great"]
        );
    }
}
