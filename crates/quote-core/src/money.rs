//! Yen amount formatting and parsing
//!
//! Amounts are whole yen held in `i64`; there is no minor unit.

/// Format an amount with thousands separators, e.g. `1965400` -> `1,965,400`
pub fn group_thousands(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format an amount as `¥1,234`
pub fn format_yen(amount: i64) -> String {
    format!("¥{}", group_thousands(amount))
}

/// Parse a display amount such as `¥630,000` or `90400` back into yen.
///
/// Yen signs (half and full width), commas and whitespace are ignored.
/// Returns `None` when what remains is not an integer.
pub fn parse_yen(text: &str) -> Option<i64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '¥' | '￥' | ',' | '，') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(759000), "759,000");
        assert_eq!(group_thousands(1965400), "1,965,400");
        assert_eq!(group_thousands(-12345), "-12,345");
    }

    #[test]
    fn test_format_yen() {
        assert_eq!(format_yen(2161940), "¥2,161,940");
    }

    #[test]
    fn test_parse_yen() {
        assert_eq!(parse_yen("¥630,000"), Some(630000));
        assert_eq!(parse_yen("￥ 90,400"), Some(90400));
        assert_eq!(parse_yen("145000"), Some(145000));
        assert_eq!(parse_yen("お見積り中"), None);
        assert_eq!(parse_yen("¥"), None);
        assert_eq!(parse_yen(""), None);
    }
}
