//! Euro amounts in the Italian display convention: `1.234,50 €`.

pub const EURO: &str = "€";

/// Formats `value` with dot thousands grouping, a decimal comma, two decimals
/// and a trailing `symbol`. Non-finite values format as an empty string.
pub fn format_amount(value: f64, symbol: &str) -> String {
    if !value.is_finite() {
        return String::new();
    }

    let cents = (value.abs() * 100.0).round() as u64;
    let units = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    if symbol.is_empty() {
        format!("{}{},{:02}", sign, grouped, fraction)
    } else {
        format!("{}{},{:02} {}", sign, grouped, fraction, symbol)
    }
}

pub fn format_euro(value: f64) -> String {
    format_amount(value, EURO)
}

/// Parses a display amount back into a number.
///
/// Strips `symbol`, `€` and whitespace, drops `.` thousands separators and
/// reads the first `,` as the decimal point. Anything unparseable is `0`.
pub fn parse_amount(input: &str, symbol: &str) -> f64 {
    let mut cleaned = input.replace(EURO, "");
    if !symbol.is_empty() {
        cleaned = cleaned.replace(symbol, "");
    }
    let cleaned: String = cleaned
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .collect();
    let cleaned = cleaned.replacen(',', ".", 1);

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

pub fn parse_euro(input: &str) -> f64 {
    parse_amount(input, EURO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_grouping_and_decimal_comma() {
        assert_eq!(format_euro(1234.5), "1.234,50 €");
        assert_eq!(format_euro(0.0), "0,00 €");
        assert_eq!(format_euro(999.999), "1.000,00 €");
        assert_eq!(format_euro(1234567.891), "1.234.567,89 €");
        assert_eq!(format_euro(-42.1), "-42,10 €");
    }

    #[test]
    fn non_finite_formats_empty() {
        assert_eq!(format_euro(f64::NAN), "");
        assert_eq!(format_euro(f64::INFINITY), "");
    }

    #[test]
    fn custom_symbol() {
        assert_eq!(format_amount(10.0, "$"), "10,00 $");
        assert_eq!(format_amount(10.0, ""), "10,00");
        assert_eq!(parse_amount("10,00 $", "$"), 10.0);
    }

    #[test]
    fn parses_display_strings() {
        assert_eq!(parse_euro("1.234,50 €"), 1234.5);
        assert_eq!(parse_euro("€ 12,3"), 12.3);
        assert_eq!(parse_euro("1.000"), 1000.0);
        assert_eq!(parse_euro("7"), 7.0);
        assert_eq!(parse_euro("1\u{a0}234,00\u{a0}€"), 1234.0);
    }

    #[test]
    fn unparseable_is_zero() {
        assert_eq!(parse_euro(""), 0.0);
        assert_eq!(parse_euro("abc"), 0.0);
        assert_eq!(parse_euro("€"), 0.0);
    }

    #[test]
    fn parse_recovers_formatted_value() {
        for value in [1234.5, 0.01, 19.99, 1_000_000.0, -3.75] {
            let parsed = parse_euro(&format_euro(value));
            assert!((parsed - value).abs() < 1e-9, "{value} -> {parsed}");
        }
    }
}
