use chrono::NaiveDate;

pub const PRESENT: &str = "Present";
const RANGE_SEPARATOR: &str = " – ";

/// Formats a stored month value (`YYYY-MM`, `YYYY-MM-DD` or `YYYY`) as `Jan 2020`.
///
/// Values in any other shape are shown as typed (trimmed); blank input gives `""`.
pub fn format_month_year(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d"));
    match parsed {
        Ok(date) => date.format("%b %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Formats a start/end pair as `"{start} – {end}"`.
///
/// `current` forces the end to "Present"; a missing end also reads as
/// "Present". With no start the end is shown alone, and with neither date
/// (and not current) the result is empty.
pub fn format_range(start: &str, end: &str, current: bool) -> String {
    let start = format_month_year(start);
    let end = if current {
        PRESENT.to_string()
    } else {
        format_month_year(end)
    };

    match (start.is_empty(), end.is_empty()) {
        (true, true) => String::new(),
        (true, false) => end,
        (false, true) => format!("{start}{RANGE_SEPARATOR}{PRESENT}"),
        (false, false) => format!("{start}{RANGE_SEPARATOR}{end}"),
    }
}

/// Drops blank entries, trimming the rest, preserving order.
pub fn non_blank(items: &[String]) -> Vec<&str> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Joins the non-blank parts with `sep`.
pub fn join_present(parts: &[&str], sep: &str) -> String {
    parts
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_range_known_cases() {
        assert_eq!(format_range("2020-01", "2022-06", false), "Jan 2020 – Jun 2022");
        assert_eq!(format_range("2020-01", "", true), "Jan 2020 – Present");
        assert_eq!(format_range("", "", false), "");
    }

    #[test]
    fn test_current_overrides_stored_end_date() {
        assert_eq!(format_range("2019-03", "2021-12", true), "Mar 2019 – Present");
    }

    #[test]
    fn test_missing_end_reads_as_present() {
        assert_eq!(format_range("2021-09", "  ", false), "Sep 2021 – Present");
    }

    #[test]
    fn test_only_end_or_only_current() {
        assert_eq!(format_range("", "2018-05", false), "May 2018");
        assert_eq!(format_range("", "", true), "Present");
    }

    #[test]
    fn test_month_year_accepts_full_dates_and_years() {
        assert_eq!(format_month_year("2023-11-15"), "Nov 2023");
        assert_eq!(format_month_year("2015"), "2015");
        assert_eq!(format_month_year(" Spring 2016 "), "Spring 2016");
        assert_eq!(format_month_year("2020-13"), "2020-13");
    }

    #[test]
    fn test_non_blank_filters_and_keeps_order() {
        let items = vec![
            "Rust".to_string(),
            "  ".to_string(),
            String::new(),
            " Go ".to_string(),
        ];
        assert_eq!(non_blank(&items), vec!["Rust", "Go"]);
    }

    #[test]
    fn test_join_present_skips_blank_parts() {
        assert_eq!(join_present(&["Acme", "", " Berlin "], " · "), "Acme · Berlin");
    }
}
