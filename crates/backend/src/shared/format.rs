/// Formats a number with `.` as the thousands separator
///
/// # Examples
/// ```text
/// format_number(1234567_u64) == "1.234.567"
/// ```
pub fn format_number(n: impl Into<u64>) -> String {
    let digits = n.into().to_string();
    let head = digits.len() % 3;

    let mut groups: Vec<&str> = Vec::with_capacity(digits.len() / 3 + 1);
    if head > 0 {
        groups.push(&digits[..head]);
    }
    groups.extend(
        digits.as_bytes()[head..]
            .chunks(3)
            .filter_map(|chunk| std::str::from_utf8(chunk).ok()),
    );
    groups.join(".")
}

/// Response size for the request log: `512 B`, `1.536 B`
pub fn format_size(bytes: usize) -> String {
    format!("{} B", format_number(bytes as u64))
}

/// Current UTC time as a fixed-width RFC 3339 string, so stored values sort
/// chronologically as text
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Nanos, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0_u64), "0");
        assert_eq!(format_number(42_u64), "42");
        assert_eq!(format_number(999_u64), "999");
        assert_eq!(format_number(1000_u64), "1.000");
        assert_eq!(format_number(1234567_u64), "1.234.567");
        assert_eq!(format_number(1234567890_u64), "1.234.567.890");
    }

    #[test]
    fn test_now_rfc3339_is_fixed_width() {
        let ts = now_rfc3339();
        assert_eq!(ts.len(), "2024-01-01T00:00:00.000000000Z".len());
        assert!(ts.ends_with('Z'));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.536 B");
    }
}
