use chrono::{DateTime, Utc};

/// Case-insensitive substring match.
/// This is the predicate behind story list search (title, author, description).
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format a view counter for display: 1234 -> "1.2k", 2500000 -> "2.5M"
pub fn format_views(views: u64) -> String {
    if views >= 1_000_000 {
        format!("{:.1}M", views as f64 / 1_000_000.0)
    } else if views >= 1_000 {
        format!("{:.1}k", views as f64 / 1_000.0)
    } else {
        views.to_string()
    }
}

/// Format a timestamp to a short readable date
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("The Midnight Garden", "midnight"));
        assert!(contains_ignore_case("The Midnight Garden", "GARDEN"));
        assert!(contains_ignore_case("anything", ""));
        assert!(!contains_ignore_case("The Midnight Garden", "sunrise"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello", 10), "Hello");
        assert_eq!(truncate("Hello World", 8), "Hello...");
        assert_eq!(truncate("Hi", 2), "Hi");
    }

    #[test]
    fn test_format_views() {
        assert_eq!(format_views(0), "0");
        assert_eq!(format_views(999), "999");
        assert_eq!(format_views(1_000), "1.0k");
        assert_eq!(format_views(1_234), "1.2k");
        assert_eq!(format_views(2_500_000), "2.5M");
    }

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        assert_eq!(format_date(&date), "Mar 15, 2024");
    }
}
