//! Month keys, trailing windows and report parameter parsing.
//!
//! # Invariants
//! - A `MonthKey` is always `YYYY-MM` with a zero-padded, 1-indexed month, so
//!   lexicographic order equals chronological order.
//! - Window arithmetic is month-level: the window opens on the first day of
//!   the month `months` months before the current one.

use crate::model::expense::Expense;
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default trailing window for recurring-expense detection.
pub const DEFAULT_RECURRING_WINDOW_MONTHS: u32 = 3;
/// Default trailing window for tag extraction.
pub const DEFAULT_TAG_WINDOW_MONTHS: u32 = 2;

static MONTH_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("valid month key regex"));

/// Calendar month identifier rendered as `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MonthKey(String);

impl MonthKey {
    /// Derives the month key of a calendar date.
    pub fn of(date: NaiveDate) -> Self {
        Self(format!("{:04}-{:02}", date.year(), date.month()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Invalid or missing report parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportParamError {
    MissingMonth(&'static str),
    MalformedMonth { name: &'static str, value: String },
    InvalidWindow(String),
}

impl Display for ReportParamError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingMonth(name) => write!(f, "query parameter `{name}` is required"),
            Self::MalformedMonth { name, value } => write!(
                f,
                "query parameter `{name}` must be formatted as YYYY-MM, got `{value}`"
            ),
            Self::InvalidWindow(value) => write!(
                f,
                "query parameter `months` must be a positive integer, got `{value}`"
            ),
        }
    }
}

impl Error for ReportParamError {}

/// Parses a required `YYYY-MM` parameter.
pub fn parse_month_param(
    name: &'static str,
    raw: Option<&str>,
) -> Result<MonthKey, ReportParamError> {
    let value = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(ReportParamError::MissingMonth(name))?;

    if !MONTH_KEY_RE.is_match(value) {
        return Err(ReportParamError::MalformedMonth {
            name,
            value: value.to_string(),
        });
    }
    Ok(MonthKey(value.to_string()))
}

/// Parses an optional positive window size, falling back to `default`.
pub fn parse_window_months(raw: Option<&str>, default: u32) -> Result<u32, ReportParamError> {
    let value = match raw.map(str::trim) {
        None | Some("") => return Ok(default),
        Some(value) => value,
    };

    match value.parse::<u32>() {
        Ok(months) if months > 0 => Ok(months),
        _ => Err(ReportParamError::InvalidWindow(value.to_string())),
    }
}

/// First day of the month `months` months before `today`'s month.
pub fn window_start(today: NaiveDate, months: u32) -> NaiveDate {
    let current = i64::from(today.year()) * 12 + i64::from(today.month0());
    let target = current - i64::from(months);
    let month = target.rem_euclid(12) as u32 + 1;

    i32::try_from(target.div_euclid(12))
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month, 1))
        .unwrap_or(NaiveDate::MIN)
}

/// Expenses dated inside `[window_start(today, months), today]`.
pub fn recent_expenses(
    expenses: &[Expense],
    months: u32,
    today: NaiveDate,
) -> impl Iterator<Item = &Expense> {
    let cutoff = window_start(today, months);
    expenses
        .iter()
        .filter(move |expense| cutoff <= expense.date && expense.date <= today)
}

#[cfg(test)]
mod tests {
    use super::{
        parse_month_param, parse_window_months, window_start, MonthKey, ReportParamError,
    };
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_key_is_zero_padded() {
        assert_eq!(MonthKey::of(date(2024, 3, 9)).as_str(), "2024-03");
        assert_eq!(MonthKey::of(date(987, 11, 30)).as_str(), "0987-11");
    }

    #[test]
    fn month_key_order_is_chronological() {
        let mut keys = vec![
            MonthKey::of(date(2024, 10, 1)),
            MonthKey::of(date(2023, 12, 31)),
            MonthKey::of(date(2024, 2, 1)),
        ];
        keys.sort();
        let rendered: Vec<&str> = keys.iter().map(MonthKey::as_str).collect();
        assert_eq!(rendered, vec!["2023-12", "2024-02", "2024-10"]);
    }

    #[test]
    fn window_start_rolls_back_across_years() {
        assert_eq!(window_start(date(2024, 3, 17), 3), date(2023, 12, 1));
        assert_eq!(window_start(date(2024, 1, 31), 1), date(2023, 12, 1));
        assert_eq!(window_start(date(2024, 1, 31), 25), date(2021, 12, 1));
        assert_eq!(window_start(date(2024, 5, 2), 2), date(2024, 3, 1));
    }

    #[test]
    fn window_start_saturates_for_huge_windows() {
        assert_eq!(window_start(date(2024, 5, 2), u32::MAX), NaiveDate::MIN);
    }

    #[test]
    fn window_parameter_validation() {
        assert_eq!(parse_window_months(None, 3), Ok(3));
        assert_eq!(parse_window_months(Some(""), 2), Ok(2));
        assert_eq!(parse_window_months(Some(" 6 "), 2), Ok(6));
        assert!(matches!(
            parse_window_months(Some("0"), 3),
            Err(ReportParamError::InvalidWindow(_))
        ));
        assert!(parse_window_months(Some("abc"), 3).is_err());
        assert!(parse_window_months(Some("-2"), 3).is_err());
    }

    #[test]
    fn month_parameter_validation() {
        assert_eq!(
            parse_month_param("month1", Some("2024-09")).unwrap().as_str(),
            "2024-09"
        );
        assert_eq!(
            parse_month_param("month1", None),
            Err(ReportParamError::MissingMonth("month1"))
        );
        assert_eq!(
            parse_month_param("month2", Some("  ")),
            Err(ReportParamError::MissingMonth("month2"))
        );
        assert!(matches!(
            parse_month_param("month2", Some("2024-13")),
            Err(ReportParamError::MalformedMonth { name: "month2", .. })
        ));
    }
}
