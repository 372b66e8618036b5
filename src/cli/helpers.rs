//! Shared helper functions for CLI commands

use chrono::{DateTime, Local, Utc};

/// Truncate a string to max_len characters, adding "..." if truncated
///
/// Works on characters, so plates and model names with non-ASCII letters
/// are never cut in the middle of a code point.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format an optional timestamp as a local date, "-" when missing
pub fn format_date(created: Option<DateTime<Utc>>) -> String {
    created
        .map(|c| c.with_timezone(&Local).format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
    }

    #[test]
    fn test_truncate_str_multibyte() {
        assert_eq!(truncate_str("ГАЗель NEXT", 6), "ГАЗ...");
    }

    #[test]
    fn test_format_date_missing() {
        assert_eq!(format_date(None), "-");
    }
}
