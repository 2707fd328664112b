#![forbid(unsafe_code)]

//! Number and duration rendering shared by content lines and the summary.

use std::time::Duration;

/// Decimal rendering with `,` thousands grouping.
#[must_use]
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// One fractional digit, no suffix: `70.0`, `99.9`.
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}")
}

/// Compact human duration.
///
/// Below one second durations render in milliseconds, with one fractional
/// digit when sub-millisecond precision is present. Below one minute,
/// `s.mmm` seconds; beyond that, minutes plus seconds.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let micros = d.as_micros();
    // 999 950 µs and up would round to "1000.0ms"; roll over to seconds.
    if micros < 999_950 {
        if micros % 1_000 == 0 {
            return format!("{}ms", micros / 1_000);
        }
        return format!("{:.1}ms", micros as f64 / 1_000.0);
    }
    let secs = d.as_secs();
    let millis = d.subsec_millis();
    if secs < 60 {
        return format!("{secs}.{millis:03}s");
    }
    format!("{}m{:02}.{millis:03}s", secs / 60, secs % 60)
}
