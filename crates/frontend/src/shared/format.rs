/// Number formatting shared by tables and cards.

/// Thousands separated by a thin non-breaking space.
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('\u{202f}');
        }
        out.push(ch);
    }
    if n < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

/// Two decimals with grouped thousands.
pub fn format_money(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let whole = format_thousands(cents / 100);
    let frac = (cents % 100).unsigned_abs();
    if cents < 0 && cents / 100 == 0 {
        format!("-{}.{:02}", whole, frac)
    } else {
        format!("{}.{:02}", whole, frac)
    }
}

/// Signed quantity as entered in adjustments: "+5", "-3", "0".
pub fn format_signed(n: i64) -> String {
    if n > 0 {
        format!("+{}", n)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1234567), "1\u{202f}234\u{202f}567");
        assert_eq!(format_thousands(-1000), "-1\u{202f}000");
    }

    #[test]
    fn money() {
        assert_eq!(format_money(1234.5), "1\u{202f}234.50");
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(-0.25), "-0.25");
        assert_eq!(format_money(-12.3), "-12.30");
    }

    #[test]
    fn signed() {
        assert_eq!(format_signed(5), "+5");
        assert_eq!(format_signed(-3), "-3");
        assert_eq!(format_signed(0), "0");
    }
}
