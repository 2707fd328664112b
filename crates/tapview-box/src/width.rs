#![forbid(unsafe_code)]

//! ANSI-aware display width.
//!
//! Escape sequences occupy zero terminal cells, so width must be computed on
//! the printable text only. The skipper recognizes the sequence shapes the
//! palette and the terminal backend emit:
//!
//! | Shape | Form | Terminator |
//! |-------|------|------------|
//! | CSI | `ESC [ params inter final` | final byte `0x40..=0x7e` |
//! | OSC | `ESC ] payload` | `BEL` or `ESC \` |
//! | Other | `ESC x` | the single following byte |
//!
//! Printable chunks between sequences are measured with Unicode width rules
//! (wide CJK, zero-width combining marks).

use memchr::memchr;
use unicode_width::UnicodeWidthStr;

const ESC: u8 = 0x1b;
const BEL: u8 = 0x07;

/// Byte length of the UTF-8 character starting with `lead`.
const fn utf8_len(lead: u8) -> usize {
    match lead {
        0xf0.. => 4,
        0xe0.. => 3,
        0xc0.. => 2,
        _ => 1,
    }
}

/// Byte index just past the escape sequence starting at `start`
/// (`bytes[start] == ESC`).
fn skip_escape(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    match bytes.get(i) {
        Some(b'[') => {
            // CSI: parameter and intermediate bytes, then one final byte.
            i += 1;
            while let Some(&b) = bytes.get(i) {
                i += 1;
                if (0x40..=0x7e).contains(&b) {
                    break;
                }
            }
            i
        }
        Some(b']') => {
            // OSC: runs to BEL or ST (ESC \).
            i += 1;
            while let Some(&b) = bytes.get(i) {
                if b == BEL {
                    return i + 1;
                }
                if b == ESC && bytes.get(i + 1) == Some(&b'\\') {
                    return i + 2;
                }
                i += 1;
            }
            i
        }
        // ESC plus one following character, which may be multibyte.
        Some(&b) => i + utf8_len(b),
        None => i,
    }
}

/// Display width of `text` in terminal cells, with escape sequences
/// contributing zero.
#[must_use]
pub fn visible_width(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut width = 0;
    let mut pos = 0;
    while pos < bytes.len() {
        match memchr(ESC, &bytes[pos..]) {
            Some(offset) => {
                // Sequence boundaries are ASCII, so these are char boundaries.
                width += text[pos..pos + offset].width();
                pos = skip_escape(bytes, pos + offset);
            }
            None => {
                width += text[pos..].width();
                break;
            }
        }
    }
    width
}

/// Copy of `text` with all escape sequences removed.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while pos < bytes.len() {
        match memchr(ESC, &bytes[pos..]) {
            Some(offset) => {
                out.push_str(&text[pos..pos + offset]);
                pos = skip_escape(bytes, pos + offset);
            }
            None => {
                out.push_str(&text[pos..]);
                break;
            }
        }
    }
    out
}
