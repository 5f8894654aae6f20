use crate::error::AnalyticsError;
use chrono::{Months, NaiveDate};

/// `date` moved `months` calendar months forward. Day-of-month is clamped to
/// the end of shorter months.
pub fn months_after(date: NaiveDate, months: usize) -> Result<NaiveDate, AnalyticsError> {
    let months = u32::try_from(months)
        .map_err(|_| AnalyticsError::DateOutOfRange(format!("{} + {} months", date, months)))?;
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| AnalyticsError::DateOutOfRange(format!("{} + {} months", date, months)))
}

/// `date` moved `months` calendar months back.
pub fn months_before(date: NaiveDate, months: usize) -> Result<NaiveDate, AnalyticsError> {
    let months = u32::try_from(months)
        .map_err(|_| AnalyticsError::DateOutOfRange(format!("{} - {} months", date, months)))?;
    date.checked_sub_months(Months::new(months))
        .ok_or_else(|| AnalyticsError::DateOutOfRange(format!("{} - {} months", date, months)))
}
