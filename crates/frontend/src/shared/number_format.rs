//! Amount formatting with Indian digit grouping (12,34,567.89).

/// Group the integer part as thousands, then pairs: 1234567 -> "12,34,567".
fn group_indian(integer_part: &str) -> String {
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };
    if digits.len() <= 3 {
        return format!("{}{}", sign, digits);
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{}{},{}", sign, groups.join(","), tail)
}

/// Two decimals with Indian grouping: 1234567.891 -> "12,34,567.89"
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "0.00".to_string();
    }
    let formatted = format!("{:.2}", value);
    let (integer_part, decimals) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));
    // "-0.00" after rounding
    let integer_part = if integer_part == "-0" && decimals == "00" {
        "0"
    } else {
        integer_part
    };
    format!("{}.{}", group_indian(integer_part), decimals)
}

/// Rupee amount: "₹12,34,567.89"
pub fn format_inr(value: f64) -> String {
    let amount = format_amount(value);
    match amount.strip_prefix('-') {
        Some(abs) => format!("-₹{}", abs),
        None => format!("₹{}", amount),
    }
}

/// Percentage without trailing zeros: 18.0 -> "18%", 2.5 -> "2.5%"
pub fn format_percent(value: f64) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    format!("{}%", s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(999.5), "999.50");
        assert_eq!(format_amount(1000.0), "1,000.00");
        assert_eq!(format_amount(123456.0), "1,23,456.00");
        assert_eq!(format_amount(1234567.891), "12,34,567.89");
        assert_eq!(format_amount(123456789.0), "12,34,56,789.00");
    }

    #[test]
    fn test_negative_and_rupee() {
        assert_eq!(format_amount(-1234.5), "-1,234.50");
        assert_eq!(format_inr(112100.0), "₹1,12,100.00");
        assert_eq!(format_inr(-50.0), "-₹50.00");
        assert_eq!(format_amount(-0.001), "0.00");
        assert_eq!(format_amount(f64::NAN), "0.00");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(18.0), "18%");
        assert_eq!(format_percent(2.5), "2.5%");
        assert_eq!(format_percent(0.0), "0%");
    }
}
