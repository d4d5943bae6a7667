//! Date and month tokens accepted from the user (`today`, `2024-01-31`, `last month`...).
use chrono::{Datelike, Duration, Months, NaiveDate};
use std::str::FromStr;
use strum_macros::{AsRefStr, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Keyword {
    Today,
    Yesterday,
    Tomorrow,
    #[strum(serialize = "this month", serialize = "this-month")]
    ThisMonth,
    #[strum(serialize = "last month", serialize = "last-month")]
    LastMonth,
}

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Resolves a day token relative to `reference_date`.
///
/// Accepts `today`, `yesterday`, `tomorrow`, ISO dates and any of `formats`.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use tracker_core::dates::parse_date_token;
/// let anchor = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();
/// let formats = vec!["%d/%m/%Y".to_string()];
///
/// assert_eq!(parse_date_token("yesterday", anchor, &formats), NaiveDate::from_ymd_opt(2025, 8, 14));
/// assert_eq!(parse_date_token("01/08/2025", anchor, &formats), NaiveDate::from_ymd_opt(2025, 8, 1));
/// assert_eq!(parse_date_token("someday", anchor, &formats), None);
/// ```
pub fn parse_date_token(input: &str, reference_date: NaiveDate, formats: &[String]) -> Option<NaiveDate> {
    let input = input.trim();
    if let Ok(keyword) = Keyword::from_str(input) {
        return match keyword {
            Keyword::Today => Some(reference_date),
            Keyword::Yesterday => reference_date.checked_sub_signed(Duration::days(1)),
            Keyword::Tomorrow => reference_date.checked_add_signed(Duration::days(1)),
            Keyword::ThisMonth | Keyword::LastMonth => None,
        };
    }

    std::iter::once(ISO_DATE_FORMAT)
        .chain(formats.iter().map(String::as_str))
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
}

/// Resolves a month token (`YYYY-MM`, `this month`, `last month`) into `(year, month)`.
pub fn parse_month_token(input: &str, reference_date: NaiveDate) -> Option<(i32, u32)> {
    let input = input.trim();
    if let Ok(keyword) = Keyword::from_str(input) {
        let date = match keyword {
            Keyword::ThisMonth => Some(reference_date),
            Keyword::LastMonth => reference_date.checked_sub_months(Months::new(1)),
            _ => None,
        }?;
        return Some((date.year(), date.month()));
    }

    let (year, month) = input.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1).map(|_| (year, month))
}

/// Generates a vector of `NaiveDate`s, inclusive of the start and end dates.
/// If `start` is after `end`, the resulting vector will be empty.
pub fn get_dates_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current);
        current += Duration::days(1);
    }
    dates
}

/// Every day of the given month, or an empty vector if the month is invalid.
pub fn days_in_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first);
    get_dates_in_range(first, last)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn keywords_are_relative_to_reference() {
        let anchor = date(2024, 3, 1);
        assert_eq!(parse_date_token("today", anchor, &[]), Some(anchor));
        assert_eq!(parse_date_token("Yesterday", anchor, &[]), Some(date(2024, 2, 29)));
        assert_eq!(parse_date_token("tomorrow", anchor, &[]), Some(date(2024, 3, 2)));
    }

    #[test]
    fn iso_always_accepted() {
        let anchor = date(2024, 3, 1);
        assert_eq!(parse_date_token("2023-12-31", anchor, &[]), Some(date(2023, 12, 31)));
        assert_eq!(parse_date_token("31/12/2023", anchor, &[]), None);
    }

    #[test]
    fn month_keywords_are_not_dates() {
        assert_eq!(parse_date_token("this month", date(2024, 3, 1), &[]), None);
    }

    #[test]
    fn month_tokens() {
        let anchor = date(2024, 1, 15);
        assert_eq!(parse_month_token("this month", anchor), Some((2024, 1)));
        assert_eq!(parse_month_token("last-month", anchor), Some((2023, 12)));
        assert_eq!(parse_month_token("2024-02", anchor), Some((2024, 2)));
        assert_eq!(parse_month_token("2024-13", anchor), None);
        assert_eq!(parse_month_token("today", anchor), None);
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2).len(), 29);
        assert_eq!(days_in_month(2023, 2).len(), 28);
        assert_eq!(days_in_month(2024, 12).last(), Some(&date(2024, 12, 31)));
        assert!(days_in_month(2024, 0).is_empty());
    }
}
