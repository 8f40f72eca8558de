use crate::error::{ForecastError, Result};
use chrono::{Datelike, Days, NaiveDate};

pub fn next_month_end(date: NaiveDate) -> NaiveDate {
    let year = if date.month() == 12 {
        date.year() + 1
    } else {
        date.year()
    };

    let month = if date.month() == 12 {
        1
    } else {
        date.month() + 1
    };

    last_day_of_month(year, month)
}

pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap()
        .checked_sub_days(Days::new(1))
        .unwrap()
}

/// Advances a month-end date by `months` whole months, landing on the
/// resulting month's last day.
pub fn advance_month_end(date: NaiveDate, months: u32) -> NaiveDate {
    let total = date.month0() + months;
    let year = date.year() + (total / 12) as i32;
    let month = total % 12 + 1;
    last_day_of_month(year, month)
}

pub fn months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    let year_diff = end.year() - start.year();
    let month_diff = end.month() as i32 - start.month() as i32;
    year_diff * 12 + month_diff
}

/// Parses a calendar month in "YYYY-MM" format, returning its month-end date.
pub fn parse_month(month: &str) -> Result<NaiveDate> {
    let first_str = format!("{}-01", month.trim());
    let first = NaiveDate::parse_from_str(&first_str, "%Y-%m-%d").map_err(|_| {
        ForecastError::DateError(format!(
            "Invalid month format: {}. Expected YYYY-MM",
            month
        ))
    })?;
    Ok(last_day_of_month(first.year(), first.month()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_month_end() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap();
        assert_eq!(
            next_month_end(date),
            NaiveDate::from_ymd_opt(2023, 2, 28).unwrap()
        );

        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(
            next_month_end(date),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
        );
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(
            last_day_of_month(2023, 2),
            NaiveDate::from_ymd_opt(2023, 2, 28).unwrap()
        );
        assert_eq!(
            last_day_of_month(2024, 2),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(
            last_day_of_month(2023, 4),
            NaiveDate::from_ymd_opt(2023, 4, 30).unwrap()
        );
    }

    #[test]
    fn test_advance_month_end() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 31).unwrap();
        assert_eq!(
            advance_month_end(date, 1),
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
        );
        assert_eq!(
            advance_month_end(date, 9),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
        );
        assert_eq!(
            advance_month_end(date, 12),
            NaiveDate::from_ymd_opt(2026, 5, 31).unwrap()
        );
    }

    #[test]
    fn test_months_between() {
        let a = NaiveDate::from_ymd_opt(2024, 11, 30).unwrap();
        let b = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
        assert_eq!(months_between(a, b), 3);
        assert_eq!(months_between(b, a), -3);
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(
            parse_month("2025-06").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
        );
        assert!(parse_month("June 2025").is_err());
    }
}
