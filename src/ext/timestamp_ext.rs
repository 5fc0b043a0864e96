use chrono::{DateTime, TimeZone};

/// The handful of timestamp layouts the simulator shows to users.
pub trait TimestampExt {
    /// `17-10-2026 02:05 PM`, used by metadata views
    fn info_stamp(&self) -> String;
    /// `Oct 17, 14:05`, used by directory listings
    fn listing_stamp(&self) -> String;
    /// `14:05`, used by annotated tree renders
    fn clock_stamp(&self) -> String;
    /// `2026-10-17 14:05:09`, used by the operation log
    fn log_stamp(&self) -> String;
}

impl<Tz> TimestampExt for DateTime<Tz>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    fn info_stamp(&self) -> String {
        self.format("%d-%m-%Y %I:%M %p").to_string()
    }

    fn listing_stamp(&self) -> String {
        self.format("%b %d, %H:%M").to_string()
    }

    fn clock_stamp(&self) -> String {
        self.format("%H:%M").to_string()
    }

    fn log_stamp(&self) -> String {
        self.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;

    fn afternoon() -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2026, 10, 7)
            .and_then(|date| date.and_hms_opt(14, 5, 9))
            .map(|naive| naive.and_utc())
            .expect("valid date")
    }

    #[test]
    fn formats_every_layout() {
        let at = afternoon();
        assert_eq!(at.info_stamp(), "07-10-2026 02:05 PM");
        assert_eq!(at.listing_stamp(), "Oct 07, 14:05");
        assert_eq!(at.clock_stamp(), "14:05");
        assert_eq!(at.log_stamp(), "2026-10-07 14:05:09");
    }
}
