#![forbid(unsafe_code)]

//! Output sink abstraction.
//!
//! The reporter needs three terminal capabilities: append a line, move the
//! cursor up one line, and clear the current line. [`TtySink`] provides them
//! over stdout through the terminal backend and refuses non-interactive
//! targets at construction — redirecting to a file or pipe is a hard
//! precondition failure, not something the reporter degrades around.
//! [`MemorySink`] records the same operations for tests and keeps a
//! simulated screen so assertions can look at what a terminal would show.

use std::io::{self, Stdout, Write};

use crossterm::tty::IsTty;
use crossterm::{cursor, queue, terminal};

use crate::ReporterError;

/// Terminal capabilities required by the reporter.
pub trait ReportSink {
    /// Append one line (text plus newline) to the output.
    fn write_line(&mut self, text: &str) -> io::Result<()>;

    /// Move the cursor up exactly one line.
    fn cursor_up(&mut self) -> io::Result<()>;

    /// Clear the line under the cursor and return to its first column.
    fn clear_line(&mut self) -> io::Result<()>;
}

/// Interactive stdout sink.
#[derive(Debug)]
pub struct TtySink {
    out: Stdout,
}

impl TtySink {
    /// Construct over stdout.
    ///
    /// # Errors
    ///
    /// [`ReporterError::NotInteractive`] when stdout is not a terminal.
    pub fn stdout() -> Result<Self, ReporterError> {
        let out = io::stdout();
        if !out.is_tty() {
            return Err(ReporterError::NotInteractive);
        }
        Ok(Self { out })
    }
}

impl ReportSink for TtySink {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }

    fn cursor_up(&mut self) -> io::Result<()> {
        queue!(self.out, cursor::MoveUp(1))?;
        self.out.flush()
    }

    fn clear_line(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            terminal::Clear(terminal::ClearType::CurrentLine),
            cursor::MoveToColumn(0)
        )?;
        self.out.flush()
    }
}

/// One recorded sink operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOp {
    /// A line was appended.
    Line(String),
    /// The cursor moved up one line.
    CursorUp,
    /// The current line was cleared.
    ClearLine,
}

/// In-memory sink for tests.
///
/// Besides the raw operation log, it maintains the lines a terminal would
/// display. The simulation covers the reporter's usage pattern: `cursor_up`
/// followed by `clear_line` removes the last displayed line, and
/// `write_line` appends one.
#[derive(Debug, Default)]
pub struct MemorySink {
    ops: Vec<SinkOp>,
    screen: Vec<String>,
    raised: bool,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every operation performed, in order.
    #[must_use]
    pub fn ops(&self) -> &[SinkOp] {
        &self.ops
    }

    /// Lines currently displayed.
    #[must_use]
    pub fn screen(&self) -> &[String] {
        &self.screen
    }

    /// The last displayed line, if any.
    #[must_use]
    pub fn last_line(&self) -> Option<&str> {
        self.screen.last().map(String::as_str)
    }

    /// Displayed lines with escape sequences stripped and blank lines kept.
    #[must_use]
    pub fn plain_screen(&self) -> Vec<String> {
        self.screen
            .iter()
            .map(|line| tapview_box::strip_ansi(line))
            .collect()
    }
}

impl ReportSink for MemorySink {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.ops.push(SinkOp::Line(text.to_string()));
        self.screen.push(text.to_string());
        self.raised = false;
        Ok(())
    }

    fn cursor_up(&mut self) -> io::Result<()> {
        self.ops.push(SinkOp::CursorUp);
        self.raised = true;
        Ok(())
    }

    fn clear_line(&mut self) -> io::Result<()> {
        self.ops.push(SinkOp::ClearLine);
        if self.raised {
            self.screen.pop();
            self.raised = false;
        }
        Ok(())
    }
}
