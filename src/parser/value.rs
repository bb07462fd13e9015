/// Clean an attribute cell into a numeric value.
///
/// Empty cells, text that is not a number (`N/A`, `-`, ...) and non-finite
/// numbers all come back as `None`; the attribute is then left out for that
/// item. A single trailing `%` is dropped, so `"15%"` reads as `15`.
pub fn clean_value(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }

    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    number.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_suffix() {
        assert_eq!(clean_value("15%"), Some(15.0));
        assert_eq!(clean_value(" 2.5 % "), Some(2.5));
    }

    #[test]
    fn test_plain_numbers() {
        assert_eq!(clean_value("42"), Some(42.0));
        assert_eq!(clean_value("-3.25"), Some(-3.25));
        assert_eq!(clean_value("  .5\t"), Some(0.5));
    }

    #[test]
    fn test_absent_values() {
        assert_eq!(clean_value(""), None);
        assert_eq!(clean_value("   "), None);
        assert_eq!(clean_value("N/A"), None);
        assert_eq!(clean_value("%"), None);
        assert_eq!(clean_value("12 dmg"), None);
    }

    #[test]
    fn test_non_finite_is_absent() {
        assert_eq!(clean_value("inf"), None);
        assert_eq!(clean_value("NaN"), None);
        assert_eq!(clean_value("1e400"), None);
    }
}
