/// Renders `value` rounded to a whole number with `,` thousands separators.
pub fn format_currency(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let rounded = value.round();
    let normalized = if rounded == 0.0 { 0.0 } else { rounded };
    let digits = format!("{:.0}", normalized.abs());
    let grouped = group_thousands(&digits);
    if normalized < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_dollars(value: f64) -> String {
    format!("${}", format_currency(value))
}

/// Plain numeric display for summary values; missing values show as `-`.
pub fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => {
            let normalized = if v == 0.0 { 0.0 } else { v };
            format!("{normalized}")
        }
        _ => "-".to_string(),
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
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
    fn groups_thousands() {
        assert_eq!(format_currency(1_234_567.0), "1,234,567");
        assert_eq!(format_currency(999.0), "999");
        assert_eq!(format_currency(1000.0), "1,000");
        assert_eq!(format_currency(100_000.0), "100,000");
    }

    #[test]
    fn zero_has_no_sign() {
        assert_eq!(format_currency(0.0), "0");
        assert_eq!(format_currency(-0.0), "0");
        assert_eq!(format_currency(-0.4), "0");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(format_currency(427_499.5), "427,500");
        assert_eq!(format_currency(1.49), "1");
        assert_eq!(format_currency(-1_500.5), "-1,501");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(format_currency(f64::NAN), "NaN");
        assert_eq!(format_currency(f64::INFINITY), "∞");
        assert_eq!(format_currency(f64::NEG_INFINITY), "-∞");
    }

    #[test]
    fn dollars_prefix() {
        assert_eq!(format_dollars(472_500.0), "$472,500");
    }

    #[test]
    fn summary_numbers() {
        assert_eq!(format_number(Some(2.5)), "2.5");
        assert_eq!(format_number(Some(1800.0)), "1800");
        assert_eq!(format_number(None), "-");
        assert_eq!(format_number(Some(f64::NAN)), "-");
    }

    #[test]
    fn huge_summary_numbers_print_in_full() {
        assert_eq!(format_number(Some(1e21)), "1000000000000000000000");
    }
}
