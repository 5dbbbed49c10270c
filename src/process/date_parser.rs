use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static YEAR_MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{4})年([0-9]{1,2})月").expect("year-month pattern"));

/// Pull `(year, month)` out of a `"2024年3月"` style label.
pub fn parse_year_month(raw: &str) -> Option<(i32, u32)> {
    let caps = YEAR_MONTH.captures(raw)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    Some((year, month))
}

/// `"2024年3月"` → `"2024年03月"`; anything without a year-month label is
/// returned as-is.
pub fn format_month(raw: &str) -> String {
    match YEAR_MONTH.captures(raw) {
        Some(caps) => format!("{}年{:0>2}月", &caps[1], &caps[2]),
        None => raw.to_string(),
    }
}

/// First day of the labelled month, for chronological ordering.
/// Also accepts `"2024/03/01"` and `"2024-03"` style cells.
pub fn month_start(raw: &str) -> Option<NaiveDate> {
    let (year, month) = parse_year_month(raw).or_else(|| parse_numeric_month(raw))?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn parse_numeric_month(raw: &str) -> Option<(i32, u32)> {
    let s = raw.trim();
    let mut parts = s.split(['/', '-']);
    let year = parts.next()?;
    let month = parts.next()?;
    if year.len() != 4 || month.is_empty() || month.len() > 2 {
        return None;
    }
    Some((year.parse().ok()?, month.parse().ok()?))
}
