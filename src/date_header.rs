//! Long-form date shown at the top of the screen.

use chrono::{Local, NaiveDate};

/// Default header format, e.g. "April 5, 2025"
pub const LONG_DATE_FORMAT: &str = "%B %-d, %Y";

pub fn format_long_date(date: NaiveDate, format: &str) -> String {
    date.format(format).to_string()
}

/// Today's date in the local timezone. Not cached.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
