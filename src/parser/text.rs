//! Number extraction from marketplace text.
//!
//! Prices mix German and English notation ("419,99" / "419.99"), while
//! counts use "." as a thousands separator ("1.234 Ergebnisse"). Both
//! helpers are plain string scans so they stay locale-independent.

/// Extract the first decimal number from free text.
///
/// Matches one or more digits, optionally followed by a single `.` or `,`
/// and more digits. The separator is normalized to `.` before conversion.
/// Returns `None` when the text contains no digits; callers pick the
/// sentinel (-1.0 for prices, 0.0 for shipping fees).
pub fn extract_decimal(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let mut number = text[start..i].to_string();

        if i + 1 < bytes.len() && (bytes[i] == b'.' || bytes[i] == b',') && bytes[i + 1].is_ascii_digit() {
            i += 1;
            let fraction_start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            number.push('.');
            number.push_str(&text[fraction_start..i]);
        }

        return number.parse().ok();
    }

    None
}

/// Parse an integer count after stripping grouping punctuation.
///
/// Removes `.`, `,` and parentheses, so both "1.234" and "(1.234)" parse
/// to 1234.
pub fn parse_grouped_count(text: &str) -> Option<u32> {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | '(' | ')'))
        .collect();
    cleaned.trim().parse().ok()
}
