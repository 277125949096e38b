/// Group the digits of a whole number with commas
fn group_thousands(whole: u64) -> String {
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Format a currency value, e.g. `$12,345.67`
pub fn format_currency(value: f64) -> String {
    let cents_total = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents_total > 0 { "-" } else { "" };
    format!(
        "{sign}${}.{:02}",
        group_thousands(cents_total / 100),
        cents_total % 100
    )
}

/// Format a currency value without cents, e.g. `$150,000`
pub fn format_currency_short(value: f64) -> String {
    let whole = value.abs().round() as u64;
    let sign = if value < 0.0 && whole > 0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(whole))
}

/// Format a fractional rate as a percentage, e.g. `0.0345` as `3.45%`
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(6_000.0), "$6,000.00");
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_currency(-42.5), "-$42.50");
        // carries into the dollars instead of printing 100 cents
        assert_eq!(format_currency(9.999), "$10.00");
    }

    #[test]
    fn test_format_currency_short() {
        assert_eq!(format_currency_short(150_000.0), "$150,000");
        assert_eq!(format_currency_short(999.6), "$1,000");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.0345), "3.45%");
        assert_eq!(format_percentage(0.0), "0.00%");
    }
}
