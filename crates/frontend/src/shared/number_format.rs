//! Number formatting and lenient parsing for money columns and totals

/// Format with a fixed number of decimals and a `.` separator
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_number_with_decimals(1234.567, 2), "1234.57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: u8) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    match decimals {
        0 => format!("{:.0}", value),
        1 => format!("{:.1}", value),
        2 => format!("{:.2}", value),
        3 => format!("{:.3}", value),
        _ => format!("{:.2}", value),
    }
}

/// Two decimals, `.` separator: "20.01"
pub fn format_money(value: f64) -> String {
    format_number_with_decimals(value, 2)
}

/// Currency cell: "R$ 20.01"
pub fn format_currency(value: f64) -> String {
    format!("R$ {}", format_money(value))
}

/// Two decimals with a comma separator, as shown under the item form: "20,01"
pub fn format_money_comma(value: f64) -> String {
    format_money(value).replace('.', ",")
}

/// Parse user input as a number; anything unparseable or non-finite is 0
pub fn parse_or_zero(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(2.0 * 10.005), "20.01");
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(-0.0), "0.00");
        assert_eq!(format_money(1234567.891), "1234567.89");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1234.6");
        assert_eq!(format_number_with_decimals(1234.567, 3), "1234.567");
    }

    #[test]
    fn test_currency_and_comma() {
        assert_eq!(format_currency(15.0), "R$ 15.00");
        assert_eq!(format_money_comma(20.5), "20,50");
    }

    #[test]
    fn test_parse_or_zero() {
        assert_eq!(parse_or_zero(" 2.5 "), 2.5);
        assert_eq!(parse_or_zero(""), 0.0);
        assert_eq!(parse_or_zero("abc"), 0.0);
        assert_eq!(parse_or_zero("NaN"), 0.0);
        assert_eq!(parse_or_zero("inf"), 0.0);
    }
}
