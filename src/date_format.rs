// 📅 Date Formatter - ISO dates to display dates
// "2021-03-04" → "4 Mar 2021"

use chrono::NaiveDate;
use tracing::debug;

/// Format an ISO `YYYY-MM-DD` date as `D Mon YYYY`.
///
/// Empty or malformed input is returned unchanged. Malformed means anything
/// other than exactly `YYYY-MM-DD` digits naming a real calendar day.
pub fn format_date_str(date_str: &str) -> String {
    if date_str.is_empty() {
        return String::new();
    }

    if !is_iso_shape(date_str) {
        debug!(date = date_str, "not a YYYY-MM-DD date, leaving as-is");
        return date_str.to_string();
    }

    match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        Ok(date) => date.format("%-d %b %Y").to_string(),
        Err(e) => {
            debug!(date = date_str, error = %e, "unparseable date, leaving as-is");
            date_str.to_string()
        }
    }
}

// chrono's parser accepts unpadded fields and short years, so check the shape first
fn is_iso_shape(date_str: &str) -> bool {
    let parts: Vec<&str> = date_str.split('-').collect();
    parts.len() == 3
        && parts.iter().zip([4, 2, 2]).all(|(part, len)| {
            part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
        })
}

/// Optional form of [`format_date_str`]: `None` stays `None`
pub fn format_date(date_str: Option<&str>) -> Option<String> {
    date_str.map(format_date_str)
}

/// Render a partial birth date as `Mon YYYY`; `None` for unknown or invalid parts
pub fn format_month_year(year: i32, month: u32) -> Option<String> {
    if year == 0 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, 1).map(|date| date.format("%b %Y").to_string())
}

// ============================================================================
// TESTS
// ============================================================================
