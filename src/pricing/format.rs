/// Format an integer with comma grouping separators
///
/// Example: 1234567 -> "1,234,567"
pub fn format_grouped(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);

    for (count, ch) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }

    result.chars().rev().collect()
}

/// Format a per-event rate in plain decimal notation
///
/// Uses the shortest representation that reads back as the same value, so
/// configured rates print as written however small they are.
/// Example: 0.000225 -> "0.000225"
pub fn format_rate(rate: f64) -> String {
    format!("{}", rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(225), "225");
        assert_eq!(format_grouped(2_250), "2,250");
        assert_eq!(format_grouped(1_234_567), "1,234,567");
        assert_eq!(format_grouped(100_000_000), "100,000,000");
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(0.000225), "0.000225");
        assert_eq!(format_rate(0.000009), "0.000009");
        assert_eq!(format_rate(2.0), "2");
    }

    #[test]
    fn test_format_rate_keeps_tiny_rates() {
        assert_eq!(format_rate(4e-10), "0.0000000004");
        assert_eq!(format_rate(1.5e-12), "0.0000000000015");
    }
}
