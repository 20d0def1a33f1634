//! Number formatting for display.

const THOUSAND: u64 = 1_000;
const MILLION: u64 = 1_000_000;

/// Format a count with a K/M suffix and one decimal digit.
///
/// Values below 1000 are printed as plain integers. The decimal digit is
/// rounded half away from zero on the exact quotient, so `999_999` shows
/// as `1000.0K` rather than being promoted to `1.0M`. Binary float
/// formatting can land the other way on ties: `1_150` is `1.2K` here where
/// `format!("{:.1}", 1.15)` gives `1.1`.
pub fn format_count(value: u64) -> String {
    if value >= MILLION {
        format_compact(value, MILLION, "M")
    } else if value >= THOUSAND {
        format_compact(value, THOUSAND, "K")
    } else {
        value.to_string()
    }
}

/// Format a whole-number percentage.
pub fn format_percent(value: u64) -> String {
    format!("{}%", value)
}

fn format_compact(value: u64, divisor: u64, suffix: &str) -> String {
    let divisor = u128::from(divisor);
    let scaled = u128::from(value) * 10;
    let mut tenths = scaled / divisor;
    if (scaled % divisor) * 2 >= divisor {
        tenths += 1;
    }
    format!("{}.{}{}", tenths / 10, tenths % 10, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_exact_tie_rounds_up() {
        assert_eq!(format_count(1_150), "1.2K");
        assert_eq!(format_count(2_050_000), "2.1M");
    }

    #[test]
    fn test_format_small() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(100), "100");
        assert_eq!(format_count(999), "999");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_count(1_000), "1.0K");
        assert_eq!(format_count(500_000), "500.0K");
        assert_eq!(format_count(133_360), "133.4K");
        assert_eq!(format_count(123_357), "123.4K");
        assert_eq!(format_count(50_007), "50.0K");
    }

    #[test]
    fn test_format_just_below_million() {
        assert_eq!(format_count(999_999), "1000.0K");
        assert_eq!(format_count(999_949), "999.9K");
    }

    #[test]
    fn test_format_millions() {
        assert_eq!(format_count(1_000_000), "1.0M");
        assert_eq!(format_count(1_700_100), "1.7M");
        assert_eq!(format_count(12_345_678), "12.3M");
    }

    #[test]
    fn test_format_half_rounds_away_from_zero() {
        assert_eq!(format_count(1_250), "1.3K");
        assert_eq!(format_count(1_150), "1.2K");
        assert_eq!(format_count(2_450_000), "2.5M");
    }

    #[test]
    fn test_format_large_values() {
        assert_eq!(format_count(u64::MAX), "18446744073709.6M");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(60), "60%");
        assert_eq!(format_percent(0), "0%");
    }
}
