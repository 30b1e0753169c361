//! Display formatting for flow values

use itertools::Itertools;

/// Formats a number with `,` thousands separators and at most two decimals.
///
/// Trailing zero decimals are dropped: `1234.5` becomes `"1,234.5"`,
/// `400.0` becomes `"400"`. Non-finite values render as `"0"`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let grouped = whole
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(String::from_utf8_lossy)
        .join(",");

    let sign = if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };

    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

/// Formats a coordinate to the four decimals shown in popups and forms
#[must_use]
pub fn format_coordinate(value: f64) -> String {
    format!("{value:.4}")
}
