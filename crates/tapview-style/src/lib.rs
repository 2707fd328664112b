#![forbid(unsafe_code)]

//! Semantic ANSI styling for the reporter.
//!
//! This crate provides pure sequence-generation functions: each styler wraps
//! text in a start sequence and the matching targeted reset, so styled
//! fragments can be concatenated freely without leaking attributes.
//!
//! # Sequence Reference
//!
//! | Styler | Start | Reset |
//! |--------|-------|-------|
//! | `failure` | `CSI 31 m` | `CSI 39 m` |
//! | `strong_failure` | `CSI 91 m` | `CSI 39 m` |
//! | `success` | `CSI 92 m` | `CSI 39 m` |
//! | `info` | `CSI 94 m` | `CSI 39 m` |
//! | `on_black` | `CSI 40 m` | `CSI 49 m` |
//! | `muted` | `CSI 2;37 m` | `CSI 22;39 m` |
//! | `strong` | `CSI 1;97 m` | `CSI 22;39 m` |
//! | `emphasis` | `CSI 1;93 m` | `CSI 22;39 m` |
//! | `warning` | `CSI 41;1;37 m` | `CSI 22;39;49 m` |
//! | `italic` | `CSI 3 m` | `CSI 23 m` |
//!
//! On top of the stylers there are two computed "paint" sequences: solid
//! 256-color backgrounds with bold bright-white text, used for the score
//! footer, the per-test badge, and the summary status box. Paints are opened
//! with [`success_seq`]/[`failure_seq`] and closed with the global [`RESET`].

use std::fmt::Write as _;

/// Full SGR reset: `CSI 0 m`. Closes paint sequences.
pub const RESET: &str = "\x1b[0m";

#[inline]
fn wrap(start: &str, text: &str, end: &str) -> String {
    let mut out = String::with_capacity(start.len() + text.len() + end.len());
    out.push_str(start);
    out.push_str(text);
    out.push_str(end);
    out
}

/// Red foreground.
#[must_use]
pub fn failure(text: &str) -> String {
    wrap("\x1b[31m", text, "\x1b[39m")
}

/// Bright red foreground.
#[must_use]
pub fn strong_failure(text: &str) -> String {
    wrap("\x1b[91m", text, "\x1b[39m")
}

/// Bright green foreground.
#[must_use]
pub fn success(text: &str) -> String {
    wrap("\x1b[92m", text, "\x1b[39m")
}

/// Bright blue foreground.
#[must_use]
pub fn info(text: &str) -> String {
    wrap("\x1b[94m", text, "\x1b[39m")
}

/// Black background.
#[must_use]
pub fn on_black(text: &str) -> String {
    wrap("\x1b[40m", text, "\x1b[49m")
}

/// Dim white foreground, for secondary detail (durations, locations).
#[must_use]
pub fn muted(text: &str) -> String {
    wrap("\x1b[2;37m", text, "\x1b[22;39m")
}

/// Bold bright-white foreground.
#[must_use]
pub fn strong(text: &str) -> String {
    wrap("\x1b[1;97m", text, "\x1b[22;39m")
}

/// Bold bright-yellow foreground.
#[must_use]
pub fn emphasis(text: &str) -> String {
    wrap("\x1b[1;93m", text, "\x1b[22;39m")
}

/// Red background with bold white text, for fatal notices.
#[must_use]
pub fn warning(text: &str) -> String {
    wrap("\x1b[41;1;37m", text, "\x1b[22;39;49m")
}

/// Italic text.
#[must_use]
pub fn italic(text: &str) -> String {
    wrap("\x1b[3m", text, "\x1b[23m")
}

/// Map one 8-bit channel to its 6×6×6 color-cube level.
///
/// `round(c / 255 * 5)`, computed in integer arithmetic with half-up
/// rounding, so the result is always in `0..=5`.
#[must_use]
pub const fn cube_level(c: u8) -> u8 {
    ((c as u32 * 10 + 255) / 510) as u8
}

/// ANSI 256-color cube index for an RGB triple: `16 + 36r + 6g + b` over
/// [`cube_level`] values.
#[must_use]
pub const fn cube_index(r: u8, g: u8, b: u8) -> u8 {
    16 + 36 * cube_level(r) + 6 * cube_level(g) + cube_level(b)
}

/// Paint sequence for an RGB background: solid 256-color background plus
/// bold bright-white text. Close with [`RESET`].
#[must_use]
pub fn paint_seq(r: u8, g: u8, b: u8) -> String {
    let mut out = String::with_capacity(16);
    let _ = write!(out, "\x1b[48;5;{};1;97m", cube_index(r, g, b));
    out
}

/// Paint sequence for passing state: a very dark green, RGB (0, 32, 0).
#[must_use]
pub fn success_seq() -> String {
    paint_seq(0, 32, 0)
}

/// Paint sequence for failing state: a very dark red, RGB (64, 0, 0).
#[must_use]
pub fn failure_seq() -> String {
    paint_seq(64, 0, 0)
}

/// Wrap text in a paint sequence and the global [`RESET`].
#[must_use]
pub fn painted(seq: &str, text: &str) -> String {
    wrap(seq, text, RESET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stylers_wrap_with_targeted_resets() {
        assert_eq!(failure("x"), "\x1b[31mx\x1b[39m");
        assert_eq!(success("x"), "\x1b[92mx\x1b[39m");
        assert_eq!(info("x"), "\x1b[94mx\x1b[39m");
        assert_eq!(muted("x"), "\x1b[2;37mx\x1b[22;39m");
        assert_eq!(strong("x"), "\x1b[1;97mx\x1b[22;39m");
        assert_eq!(warning("x"), "\x1b[41;1;37mx\x1b[22;39;49m");
        assert_eq!(italic("x"), "\x1b[3mx\x1b[23m");
        assert_eq!(on_black("x"), "\x1b[40mx\x1b[49m");
    }

    #[test]
    fn stylers_nest_without_leaking() {
        // Foreground styler inside a background styler keeps both resets.
        let nested = on_black(&info(" 2 "));
        assert_eq!(nested, "\x1b[40m\x1b[94m 2 \x1b[39m\x1b[49m");
    }

    #[test]
    fn cube_level_boundaries() {
        assert_eq!(cube_level(0), 0);
        assert_eq!(cube_level(255), 5);
        // 32 / 255 * 5 = 0.627 → 1
        assert_eq!(cube_level(32), 1);
        // 64 / 255 * 5 = 1.255 → 1
        assert_eq!(cube_level(64), 1);
        // 128 / 255 * 5 = 2.51 → 3
        assert_eq!(cube_level(128), 3);
    }

    #[test]
    fn cube_level_is_monotone_and_bounded() {
        let mut prev = 0;
        for c in 0..=255u8 {
            let level = cube_level(c);
            assert!(level <= 5);
            assert!(level >= prev);
            prev = level;
        }
    }

    #[test]
    fn paint_indices() {
        // (0,32,0) → levels (0,1,0) → 16 + 6 = 22
        assert_eq!(cube_index(0, 32, 0), 22);
        // (64,0,0) → levels (1,0,0) → 16 + 36 = 52
        assert_eq!(cube_index(64, 0, 0), 52);
        assert_eq!(success_seq(), "\x1b[48;5;22;1;97m");
        assert_eq!(failure_seq(), "\x1b[48;5;52;1;97m");
    }

    #[test]
    fn painted_closes_with_full_reset() {
        let text = painted(&success_seq(), " ok ");
        assert!(text.starts_with("\x1b[48;5;22;1;97m"));
        assert!(text.ends_with("\x1b[0m"));
    }
}
