//! Cleanup of freeform numeric text typed into the weight and height fields.

/// Coerce raw field text into a parseable decimal string.
///
/// The first comma is read as a decimal point, every character other than
/// an ASCII digit or a point is dropped, and only the first point survives
/// as the separator: the digits after any later points are appended to the
/// fraction (`"1.2.3"` becomes `"1.23"`).
pub fn normalize_number_input(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .replacen(',', ".", 1)
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    match cleaned.split_once('.') {
        Some((whole, rest)) if rest.contains('.') => {
            let fraction: String = rest.chars().filter(|c| *c != '.').collect();
            format!("{}.{}", whole, fraction)
        }
        _ => cleaned,
    }
}

/// Same as [`normalize_number_input`], with absent input treated as empty.
pub fn normalize_optional(raw: Option<&str>) -> String {
    raw.map(normalize_number_input).unwrap_or_default()
}

/// Parse normalized text as a finite decimal.
///
/// Accepts a leading or trailing point (`".5"`, `"5."`); an empty string
/// or a lone point is not a number.
pub fn parse_decimal(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}
