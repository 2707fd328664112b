#![forbid(unsafe_code)]

//! Final report rendering.
//!
//! Fires exactly once, when the root test ends. Two mutually exclusive
//! layouts: a compact one-line banner, or the default two-box panel built
//! from the layout primitives — a painted status box (verdict plus pass
//! percentage) stacked against a stats box of label/value rows on a dark
//! background.

use std::time::Duration;

use tapview_box::{Alignment, draw_border, normalize, pad, pad_left, stack_horizontally};
use tapview_style as style;

use crate::event::TestTotals;
use crate::format::{format_duration, format_number, format_percent};

/// Everything the summary needs from a finished run.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    /// Whether the root test failed.
    pub fail: bool,
    /// Aggregate counters from the root `End` event.
    pub totals: TestTotals,
    /// Nested tests executed (the root wrapper is not counted).
    pub tests: u64,
    /// Assertions marked todo across the whole run.
    pub todo_asserts: u64,
    /// Elapsed duration of the whole run.
    pub diff_time: Duration,
}

impl RunSummary {
    /// Pass percentage line: `Passed: 100%` on a clean run, otherwise the
    /// genuine pass ratio to one decimal place. Guarded against an empty run.
    fn percent_line(&self) -> String {
        if !self.fail {
            return "Passed: 100%".to_string();
        }
        if self.totals.asserts == 0 {
            return "Passed: 0.0%".to_string();
        }
        let ratio = self.totals.passed() as f64 / self.totals.asserts as f64;
        format!("Passed: {}%", format_percent(ratio * 100.0))
    }
}

/// One-line banner: status glyph plus six independently colored counters and
/// the elapsed time, on a black background.
#[must_use]
pub fn compact_banner(summary: &RunSummary) -> String {
    let glyph = if summary.fail { "⛔" } else { "♥️" };
    let totals = summary.totals;
    style::on_black(&format!(
        "  {glyph}   {}, {}, {}, {}, {}, {}, {}  ",
        style::strong(&format!("tests: {}", format_number(summary.tests))),
        style::emphasis(&format!("asserts: {}", format_number(totals.asserts))),
        style::success(&format!("passed: {}", format_number(totals.passed()))),
        style::failure(&format!("failed: {}", format_number(totals.failed))),
        style::info(&format!("skipped: {}", format_number(totals.skipped))),
        format!("todo: {}", format_number(summary.todo_asserts)),
        style::muted(&format!("time: {}", format_duration(summary.diff_time))),
    ))
}

/// Two-box panel layout. Returns the content lines; the caller frames them
/// with one blank line above and below.
#[must_use]
pub fn panel(summary: &RunSummary) -> Vec<String> {
    let status = status_box(summary);
    let stats = stats_box(summary);
    stack_horizontally(&status, &stats)
}

fn status_box(summary: &RunSummary) -> Vec<String> {
    let verdict = if summary.fail { "fail" } else { "pass" };
    let headline = vec![format!("Summary: {verdict}")];
    let mut lines = pad(&draw_border(&pad(&headline, 0, 2)), 0, 3);
    lines.push(String::new());
    lines.push(summary.percent_line());
    let lines = pad(&normalize(&lines, ' ', Alignment::Center), 2, 0);

    let paint = if summary.fail {
        style::failure_seq()
    } else {
        style::success_seq()
    };
    let painted: Vec<String> = lines
        .iter()
        .map(|line| style::painted(&paint, line))
        .collect();
    pad_left(&painted, 2)
}

fn stats_box(summary: &RunSummary) -> Vec<String> {
    let totals = summary.totals;
    let labels: Vec<String> = [
        "tests:",
        "asserts:",
        "  passed:",
        "  failed:",
        "  skipped:",
        "  todo:",
        "time:",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect();
    let values = vec![
        format_number(summary.tests),
        format_number(totals.asserts),
        format_number(totals.passed()),
        format_number(totals.failed),
        format_number(totals.skipped),
        format_number(summary.todo_asserts),
        format_duration(summary.diff_time),
    ];

    let mut rows = stack_horizontally(
        &normalize(&labels, ' ', Alignment::Left),
        &pad_left(&normalize(&values, ' ', Alignment::Left), 1),
    );
    rows[0] = style::strong(&rows[0]);
    rows[1] = style::emphasis(&rows[1]);
    rows[2] = style::success(&rows[2]);
    rows[3] = style::failure(&rows[3]);
    rows[4] = style::info(&rows[4]);
    // Row 5 (todo) stays unstyled.
    rows[6] = style::muted(&rows[6]);

    pad(&rows, 1, 3)
        .iter()
        .map(|line| style::on_black(line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tapview_box::{strip_ansi, visible_width};

    fn passing_summary() -> RunSummary {
        RunSummary {
            fail: false,
            totals: TestTotals {
                asserts: 4,
                failed: 0,
                skipped: 0,
            },
            tests: 2,
            todo_asserts: 0,
            diff_time: Duration::from_millis(12),
        }
    }

    #[test]
    fn percent_is_100_on_full_pass() {
        assert_eq!(passing_summary().percent_line(), "Passed: 100%");
    }

    #[test]
    fn percent_has_one_decimal_on_failure() {
        let summary = RunSummary {
            fail: true,
            totals: TestTotals {
                asserts: 10,
                failed: 3,
                skipped: 0,
            },
            tests: 1,
            todo_asserts: 0,
            diff_time: Duration::ZERO,
        };
        assert_eq!(summary.percent_line(), "Passed: 70.0%");
    }

    #[test]
    fn percent_guards_against_empty_runs() {
        let summary = RunSummary {
            fail: true,
            totals: TestTotals::default(),
            tests: 0,
            todo_asserts: 0,
            diff_time: Duration::ZERO,
        };
        assert_eq!(summary.percent_line(), "Passed: 0.0%");
    }

    #[test]
    fn banner_carries_all_counters() {
        let summary = RunSummary {
            fail: false,
            totals: TestTotals {
                asserts: 10,
                failed: 1,
                skipped: 2,
            },
            tests: 3,
            todo_asserts: 4,
            diff_time: Duration::from_millis(5),
        };
        let plain = strip_ansi(&compact_banner(&summary));
        assert!(plain.contains("♥️"));
        assert!(plain.contains("tests: 3"));
        assert!(plain.contains("asserts: 10"));
        assert!(plain.contains("passed: 7"));
        assert!(plain.contains("failed: 1"));
        assert!(plain.contains("skipped: 2"));
        assert!(plain.contains("todo: 4"));
        assert!(plain.contains("time: 5ms"));
    }

    #[test]
    fn banner_shows_stop_sign_on_failure() {
        let mut summary = passing_summary();
        summary.fail = true;
        assert!(strip_ansi(&compact_banner(&summary)).contains("⛔"));
    }

    #[test]
    fn panel_is_rectangular() {
        let lines = panel(&passing_summary());
        assert!(!lines.is_empty());
        let width = visible_width(&lines[0]);
        for line in &lines {
            assert_eq!(visible_width(line), width);
        }
    }

    #[test]
    fn panel_boxes_have_matching_heights() {
        // Status: 3 bordered lines + blank + percentage + 2×2 vertical pad.
        // Stats: 7 rows + 2×1 vertical pad. Both come to 9.
        let summary = passing_summary();
        assert_eq!(status_box(&summary).len(), 9);
        assert_eq!(stats_box(&summary).len(), 9);
        assert_eq!(panel(&summary).len(), 9);
    }

    #[test]
    fn panel_contains_verdict_and_rows() {
        let lines = panel(&passing_summary());
        let plain: Vec<String> = lines.iter().map(|l| strip_ansi(l)).collect();
        let all = plain.join("\n");
        assert!(all.contains("Summary: pass"));
        assert!(all.contains("Passed: 100%"));
        assert!(all.contains("tests:"));
        assert!(all.contains("  skipped:"));
        assert!(all.contains("time:"));
    }

    #[test]
    fn failing_panel_uses_failure_paint() {
        let mut summary = passing_summary();
        summary.fail = true;
        summary.totals.failed = 1;
        let lines = panel(&summary);
        assert!(lines[0].contains("\x1b[48;5;52;1;97m"));
        let all = lines.join("\n");
        assert!(strip_ansi(&all).contains("Summary: fail"));
    }
}
