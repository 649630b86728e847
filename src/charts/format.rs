//! Number formatting for display counters

/// Format an integer with comma thousands separators (`1234567` → `"1,234,567"`)
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
        assert_eq!(format_thousands(100_000), "100,000");
    }

    #[test]
    fn test_format_thousands_negative() {
        assert_eq!(format_thousands(-1234), "-1,234");
        assert_eq!(format_thousands(-12), "-12");
        assert_eq!(format_thousands(i64::MIN), "-9,223,372,036,854,775,808");
    }
}
