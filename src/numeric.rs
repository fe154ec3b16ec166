//! Lenient number parsing
//!
//! Values typed by the user and values read from imported files follow the
//! browser's `parseFloat` / `parseInt(text, 10)` rules: leading whitespace is
//! skipped and the longest numeric prefix wins, so `"12kg"` reads as 12.

/// Parse the longest floating-point prefix of `text`.
///
/// Returns `None` when no digits lead the text (the browser's NaN).
/// `Infinity` with an optional sign is recognised.
pub fn parse_float(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        pos += 1;
    }

    if s[pos..].starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let mut digits = pos - int_start;

    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        digits += end - frac_start;
        if digits > 0 {
            pos = end;
        }
    }

    if digits == 0 {
        return None;
    }

    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        let mut end = pos + 1;
        if end < bytes.len() && matches!(bytes[end], b'+' | b'-') {
            end += 1;
        }
        let exp_digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > exp_digits_start {
            pos = end;
        }
    }

    s[..pos].parse::<f64>().ok()
}

/// Parse the leading base-10 integer of `text`.
///
/// Fractional parts are ignored rather than rejected: `"7.9"` reads as 7.
pub fn parse_int(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        pos += 1;
    }

    let digits_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    if pos == digits_start {
        return None;
    }

    s[..pos].parse::<f64>().ok()
}
