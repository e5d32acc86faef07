//! Display formatting for predictions

/// Format an amount as US-style currency: `$1,234.56`, `-$7.00`
///
/// Rounds from the exact decimal value of the float, so `0.015` (stored as
/// 0.01499...) gives `$0.01`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${}", amount);
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    // -0.004 rounds to zero cents; don't print "-$0.00"
    let is_zero = whole.bytes().all(|b| b == b'0') && frac.bytes().all(|b| b == b'0');
    let sign = if amount < 0.0 && !is_zero { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(whole), frac)
}

/// Render an input value the way the form shows it: always with a decimal point
pub fn format_years(years: f64) -> String {
    format!("{:?}", years)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(138_410.96), "$138,410.96");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_currency(12.5), "$12.50");
    }

    #[test]
    fn test_format_currency_rounds_from_exact_value() {
        // 0.015 and 0.045 are stored just below the midpoint
        assert_eq!(format_currency(0.015), "$0.01");
        assert_eq!(format_currency(0.045), "$0.04");
        assert_eq!(format_currency(2.675), "$2.67");
    }

    #[test]
    fn test_format_currency_huge_values() {
        let formatted = format_currency(1e40);
        assert!(formatted.starts_with("$10,000,000,000,000,000,"));
        assert!(formatted.ends_with(".00"));
        assert_eq!(formatted.matches(',').count(), 13);
        assert!(!formatted.contains("3,402,823"));
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(-2500.0), "-$2,500.00");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn test_format_years() {
        assert_eq!(format_years(5.0), "5.0");
        assert_eq!(format_years(1.5), "1.5");
        assert_eq!(format_years(50.0), "50.0");
    }
}
