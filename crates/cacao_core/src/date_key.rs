use crate::error::AppError;
use time::format_description::BorrowedFormatItem;
use time::macros::{date, format_description};
use time::{Date, OffsetDateTime, UtcOffset};

const DATE_KEY_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

pub fn parse_date(raw: &str) -> Result<Date, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("date is required"));
    }

    Date::parse(trimmed, DATE_KEY_FORMAT)
        .map_err(|_| AppError::invalid_input("date must be YYYY-MM-DD"))
}

pub fn format_date(date: Date) -> Result<String, AppError> {
    date.format(DATE_KEY_FORMAT)
        .map_err(|err| AppError::invalid_data(err.to_string()))
}

/// Parses and re-formats `raw` so equivalent inputs map to one partition key.
pub fn normalize_date_key(raw: &str) -> Result<String, AppError> {
    format_date(parse_date(raw)?)
}

pub fn today_key() -> Result<String, AppError> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    format_date(OffsetDateTime::now_utc().to_offset(offset).date())
}

/// Days since 1970-01-01, as the two's-complement bit pattern for earlier dates.
pub fn date_seed(date: Date) -> u64 {
    (date - date!(1970 - 01 - 01)).whole_days() as u64
}
