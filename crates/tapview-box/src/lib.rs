#![forbid(unsafe_code)]

//! Text-box layout primitives.
//!
//! A *box* is an ordered sequence of lines sharing one visible width
//! (escape sequences count for zero cells, see [`visible_width`]). The
//! operations here are pure: each takes a slice of lines and returns a new
//! box, so pipelines read top to bottom:
//!
//! ```
//! use tapview_box::{Alignment, draw_border, normalize, pad};
//!
//! let banner = pad(&draw_border(&normalize(
//!     &["pass".to_string()],
//!     ' ',
//!     Alignment::Center,
//! )), 0, 1);
//! assert_eq!(banner[0], " ┌────┐ ");
//! assert_eq!(banner[1], " │pass│ ");
//! ```

pub mod width;

pub use width::{strip_ansi, visible_width};

/// Horizontal alignment used by [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Pad on the right (default).
    #[default]
    Left,
    /// Pad evenly; the odd column goes to the right.
    Center,
    /// Pad on the left.
    Right,
}

fn fill_run(fill: char, count: usize) -> String {
    std::iter::repeat_n(fill, count).collect()
}

/// Widest visible line in `lines`.
#[must_use]
pub fn box_width(lines: &[String]) -> usize {
    lines.iter().map(|line| visible_width(line)).max().unwrap_or(0)
}

/// Pad every line with `fill` to the maximum visible width among them,
/// aligned as requested. The result is a well-formed box; applying
/// `normalize` to its own output is a no-op.
#[must_use]
pub fn normalize(lines: &[String], fill: char, align: Alignment) -> Vec<String> {
    let target = box_width(lines);
    lines
        .iter()
        .map(|line| {
            let deficit = target - visible_width(line);
            if deficit == 0 {
                return line.clone();
            }
            match align {
                Alignment::Left => format!("{line}{}", fill_run(fill, deficit)),
                Alignment::Right => format!("{}{line}", fill_run(fill, deficit)),
                Alignment::Center => {
                    let left = deficit / 2;
                    format!(
                        "{}{line}{}",
                        fill_run(fill, left),
                        fill_run(fill, deficit - left)
                    )
                }
            }
        })
        .collect()
}

/// Surround a box with `vertical` blank lines above and below and
/// `horizontal` space columns on both sides.
#[must_use]
pub fn pad(lines: &[String], vertical: usize, horizontal: usize) -> Vec<String> {
    let width = box_width(lines);
    let blank = " ".repeat(width + 2 * horizontal);
    let margin = " ".repeat(horizontal);
    let mut out = Vec::with_capacity(lines.len() + 2 * vertical);
    out.extend(std::iter::repeat_n(blank.clone(), vertical));
    out.extend(lines.iter().map(|line| format!("{margin}{line}{margin}")));
    out.extend(std::iter::repeat_n(blank, vertical));
    out
}

/// Add `count` space columns on the left only.
#[must_use]
pub fn pad_left(lines: &[String], count: usize) -> Vec<String> {
    let margin = " ".repeat(count);
    lines.iter().map(|line| format!("{margin}{line}")).collect()
}

/// Wrap a box in a rectangular frame.
#[must_use]
pub fn draw_border(lines: &[String]) -> Vec<String> {
    let width = box_width(lines);
    let horizontal = "─".repeat(width);
    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(format!("┌{horizontal}┐"));
    out.extend(lines.iter().map(|line| format!("│{line}│")));
    out.push(format!("└{horizontal}┘"));
    out
}

/// Stack two boxes side by side. The shorter box is padded at the bottom
/// with space-filled lines of its own width, then corresponding lines are
/// concatenated left-then-right; the result width is the sum of the inputs'.
#[must_use]
pub fn stack_horizontally(left: &[String], right: &[String]) -> Vec<String> {
    let left_width = box_width(left);
    let right_width = box_width(right);
    let height = left.len().max(right.len());
    let mut out = Vec::with_capacity(height);
    for row in 0..height {
        let l = left
            .get(row)
            .cloned()
            .unwrap_or_else(|| " ".repeat(left_width));
        let r = right
            .get(row)
            .cloned()
            .unwrap_or_else(|| " ".repeat(right_width));
        out.push(format!("{l}{r}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn normalize_left_pads_right() {
        let out = normalize(&lines(&["ab", "a", "abcd"]), ' ', Alignment::Left);
        assert_eq!(out, lines(&["ab  ", "a   ", "abcd"]));
    }

    #[test]
    fn normalize_right_pads_left() {
        let out = normalize(&lines(&["ab", "abcd"]), ' ', Alignment::Right);
        assert_eq!(out, lines(&["  ab", "abcd"]));
    }

    #[test]
    fn normalize_center_gives_odd_column_to_the_right() {
        let out = normalize(&lines(&["a", "abcd"]), ' ', Alignment::Center);
        assert_eq!(out, lines(&[" a  ", "abcd"]));
    }

    #[test]
    fn normalize_with_custom_fill() {
        let out = normalize(&lines(&["ab", "abcd"]), '.', Alignment::Left);
        assert_eq!(out, lines(&["ab..", "abcd"]));
    }

    #[test]
    fn normalize_ignores_escape_sequences() {
        let styled = vec!["\x1b[92mok\x1b[39m".to_string(), "four".to_string()];
        let out = normalize(&styled, ' ', Alignment::Left);
        assert_eq!(out[0], "\x1b[92mok\x1b[39m  ");
        assert_eq!(visible_width(&out[0]), visible_width(&out[1]));
    }

    #[test]
    fn normalize_empty_box() {
        assert!(normalize(&[], ' ', Alignment::Left).is_empty());
    }

    #[test]
    fn normalize_is_idempotent() {
        let input = lines(&["ab", "a", "abcd"]);
        for align in [Alignment::Left, Alignment::Center, Alignment::Right] {
            let once = normalize(&input, ' ', align);
            assert_eq!(normalize(&once, ' ', align), once);
        }
    }

    #[test]
    fn pad_adds_margins_and_blank_lines() {
        let out = pad(&lines(&["ab"]), 1, 2);
        assert_eq!(out, lines(&["      ", "  ab  ", "      "]));
    }

    #[test]
    fn pad_zero_is_identity_for_normalized_box() {
        let input = lines(&["ab", "cd"]);
        assert_eq!(pad(&input, 0, 0), input);
    }

    #[test]
    fn pad_left_only() {
        let out = pad_left(&lines(&["ab", "cd"]), 2);
        assert_eq!(out, lines(&["  ab", "  cd"]));
    }

    #[test]
    fn border_wraps_box() {
        let out = draw_border(&lines(&["ab"]));
        assert_eq!(out, lines(&["┌──┐", "│ab│", "└──┘"]));
    }

    #[test]
    fn stack_pads_shorter_box_at_the_bottom() {
        let left = lines(&["LL", "LL", "LL"]);
        let right = lines(&["r"]);
        let out = stack_horizontally(&left, &right);
        assert_eq!(out, lines(&["LLr", "LL ", "LL "]));
    }

    #[test]
    fn stack_width_is_sum_of_widths() {
        let left = lines(&["abc", "def"]);
        let right = lines(&["12", "34", "56"]);
        let out = stack_horizontally(&left, &right);
        for line in &out {
            assert_eq!(visible_width(line), 5);
        }
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn stack_keeps_styled_widths_straight() {
        let left = vec!["\x1b[48;5;22;1;97m pass \x1b[0m".to_string()];
        let right = lines(&["stats", "stats"]);
        let out = stack_horizontally(&left, &right);
        assert_eq!(visible_width(&out[0]), 6 + 5);
        assert_eq!(visible_width(&out[1]), 6 + 5);
    }
}
