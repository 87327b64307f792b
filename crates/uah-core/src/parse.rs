//! Permissive numeric parsing for text amounts.
//!
//! Mirrors C `atof`: the longest numeric prefix wins and anything after it
//! is ignored. Input without a numeric prefix reads as `0.0`.
//!
//! ```text
//! "12.5abc"   →  12.5
//! "  -3e2 kg" →  -300.0
//! "1e"        →  1.0      (dangling exponent is not part of the number)
//! "abc"       →  0.0
//! "INF"       →  inf
//! ```
//!
//! Hexadecimal input follows C as well: `0x10` is 16, `0x1p3` is 8.

/// Parses the leading number of `bytes`, `0.0` if there is none.
///
/// ## Example
/// ```rust
/// use uah_core::parse::parse_leading_f64;
///
/// assert_eq!(parse_leading_f64(b"12.5abc"), 12.5);
/// assert_eq!(parse_leading_f64(b"  7"), 7.0);
/// assert_eq!(parse_leading_f64(b"n/a"), 0.0);
/// ```
pub fn parse_leading_f64(bytes: &[u8]) -> f64 {
    let start = bytes
        .iter()
        .position(|&b| !is_c_space(b))
        .unwrap_or(bytes.len());
    let rest = &bytes[start..];

    let (negative, unsigned) = match rest.first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };
    if let Some(value) = parse_hex(unsigned) {
        return if negative { -value } else { value };
    }

    let end = numeric_prefix_len(rest);
    if end == 0 {
        return 0.0;
    }

    // The prefix is pure ASCII by construction
    std::str::from_utf8(&rest[..end])
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// C `isspace` in the "C" locale, which includes vertical tab.
fn is_c_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t'..=b'\r')
}

/// Reads a `0x` hexadecimal float: hex digits, an optional `.` fraction and
/// an optional binary `p` exponent. `None` if `s` is not one.
fn parse_hex(s: &[u8]) -> Option<f64> {
    let digits = match s {
        [b'0', b'x' | b'X', rest @ ..] => rest,
        _ => return None,
    };
    let hex_digit = |i: usize| digits.get(i).and_then(|&b| char::from(b).to_digit(16));

    let mut value = 0.0_f64;
    let mut scale = 0_i32;
    let mut seen = false;
    let mut i = 0;

    while let Some(d) = hex_digit(i) {
        value = value * 16.0 + f64::from(d);
        seen = true;
        i += 1;
    }

    if digits.get(i) == Some(&b'.') {
        let mut j = i + 1;
        while let Some(d) = hex_digit(j) {
            value = value * 16.0 + f64::from(d);
            scale = scale.saturating_sub(4);
            seen = true;
            j += 1;
        }
        if seen {
            i = j;
        }
    }

    // "0x" alone is the number 0 followed by garbage
    if !seen {
        return None;
    }

    if matches!(digits.get(i), Some(b'p' | b'P')) {
        let mut j = i + 1;
        let negative = match digits.get(j) {
            Some(b'-') => {
                j += 1;
                true
            }
            Some(b'+') => {
                j += 1;
                false
            }
            _ => false,
        };
        let tail = &digits[j.min(digits.len())..];
        let n = count_digits(tail);
        if n > 0 {
            let exp = tail[..n].iter().fold(0_i32, |acc, &b| {
                acc.saturating_mul(10).saturating_add(i32::from(b - b'0'))
            });
            scale = if negative {
                scale.saturating_sub(exp)
            } else {
                scale.saturating_add(exp)
            };
        }
    }

    Some(value * 2.0_f64.powi(scale))
}

/// Length of the longest prefix of `s` that forms a decimal float literal.
fn numeric_prefix_len(s: &[u8]) -> usize {
    let mut i = 0;
    if matches!(s.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    if let Some(len) = special_len(&s[i..]) {
        return i + len;
    }

    let int_digits = count_digits(&s[i..]);
    i += int_digits;

    let mut frac_digits = 0;
    if s.get(i) == Some(&b'.') {
        frac_digits = count_digits(&s[i + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if matches!(s.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(s.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(&s[j.min(s.len())..]);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }

    i
}

/// Matches `infinity`, `inf` or `nan` (any case) at the start of `s`.
fn special_len(s: &[u8]) -> Option<usize> {
    ["infinity", "inf", "nan"].iter().find_map(|word| {
        let n = word.len();
        (s.len() >= n && s[..n].eq_ignore_ascii_case(word.as_bytes())).then_some(n)
    })
}

fn count_digits(s: &[u8]) -> usize {
    s.iter().take_while(|b| b.is_ascii_digit()).count()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_leading_f64(b"0"), 0.0);
        assert_eq!(parse_leading_f64(b"42"), 42.0);
        assert_eq!(parse_leading_f64(b"-1.25"), -1.25);
        assert_eq!(parse_leading_f64(b"+8"), 8.0);
        assert_eq!(parse_leading_f64(b".5"), 0.5);
        assert_eq!(parse_leading_f64(b"5."), 5.0);
    }

    #[test]
    fn test_trailing_garbage_ignored() {
        assert_eq!(parse_leading_f64(b"12.5abc"), 12.5);
        assert_eq!(parse_leading_f64(b"100 UAH"), 100.0);
        assert_eq!(parse_leading_f64(b"1.2.3"), 1.2);
        assert_eq!(parse_leading_f64(b"3,50"), 3.0);
    }

    #[test]
    fn test_leading_whitespace() {
        assert_eq!(parse_leading_f64(b"  \t\n7.5"), 7.5);
        assert_eq!(parse_leading_f64(b"   "), 0.0);
    }

    #[test]
    fn test_exponent() {
        assert_eq!(parse_leading_f64(b"1e3"), 1000.0);
        assert_eq!(parse_leading_f64(b"-3E2 kg"), -300.0);
        assert_eq!(parse_leading_f64(b"2.5e-1x"), 0.25);
        assert_eq!(parse_leading_f64(b"1e"), 1.0);
        assert_eq!(parse_leading_f64(b"1e+"), 1.0);
        assert_eq!(parse_leading_f64(b"7ex"), 7.0);
    }

    #[test]
    fn test_no_number() {
        assert_eq!(parse_leading_f64(b""), 0.0);
        assert_eq!(parse_leading_f64(b"abc"), 0.0);
        assert_eq!(parse_leading_f64(b"-"), 0.0);
        assert_eq!(parse_leading_f64(b"."), 0.0);
        assert_eq!(parse_leading_f64(b"-.e5"), 0.0);
    }

    #[test]
    fn test_special_values() {
        assert_eq!(parse_leading_f64(b"inf"), f64::INFINITY);
        assert_eq!(parse_leading_f64(b"-Infinity and more"), f64::NEG_INFINITY);
        assert_eq!(parse_leading_f64(b"INFO"), f64::INFINITY);
        assert!(parse_leading_f64(b"NaN").is_nan());
        assert_eq!(parse_leading_f64(b"in"), 0.0);
    }

    #[test]
    fn test_hex_floats() {
        assert_eq!(parse_leading_f64(b"0x10"), 16.0);
        assert_eq!(parse_leading_f64(b"0x1p3"), 8.0);
        assert_eq!(parse_leading_f64(b"-0XaP-1"), -5.0);
        assert_eq!(parse_leading_f64(b"0x.8"), 0.5);
        assert_eq!(parse_leading_f64(b"0x1.8p1 UAH"), 3.0);
        assert_eq!(parse_leading_f64(b"0x1p"), 1.0);
        assert_eq!(parse_leading_f64(b"0xg"), 0.0);
        assert_eq!(parse_leading_f64(b"0x"), 0.0);
    }

    #[test]
    fn test_vertical_tab_is_whitespace() {
        assert_eq!(parse_leading_f64(b"\x0b5"), 5.0);
        assert_eq!(parse_leading_f64(b"\x0c\r 2"), 2.0);
    }

    #[test]
    fn test_non_utf8_tail() {
        assert_eq!(parse_leading_f64(&[b'9', b'.', b'5', 0xff, 0xfe]), 9.5);
    }
}
