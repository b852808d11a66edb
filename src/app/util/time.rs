use chrono::{DateTime, Local, TimeZone};

pub fn current_local_timestamp() -> String {
    format_timestamp(&Local::now())
}

/// `YYYYMMDD-HHMMSS`, used in suggested download filenames.
pub fn format_timestamp<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format("%Y%m%d-%H%M%S").to_string()
}
