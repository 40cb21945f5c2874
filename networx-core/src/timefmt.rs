use chrono::NaiveDateTime;

/// Timestamp used in status strings, e.g. `3/7/2024   09:05:30`
pub fn timestamp(at: NaiveDateTime) -> String {
    at.format("%-m/%-d/%Y   %H:%M:%S").to_string()
}

/// Clock setting for the panel from a local time
pub fn clock_setting(
    at: NaiveDateTime,
) -> Result<networx_protocol::ClockSetting, networx_protocol::RequestError> {
    use chrono::{Datelike, Timelike};

    networx_protocol::ClockSetting::new(
        at.year().clamp(0, i32::from(u16::MAX)) as u16,
        at.month() as u8,
        at.day() as u8,
        at.hour() as u8,
        at.minute() as u8,
        at.weekday().number_from_sunday() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_timestamp_has_no_month_or_day_padding() {
        assert_eq!(timestamp(at(2024, 3, 7, 9, 5, 30)), "3/7/2024   09:05:30");
        assert_eq!(timestamp(at(2023, 12, 25, 23, 59, 0)), "12/25/2023   23:59:00");
    }

    #[test]
    fn test_clock_setting_weekday_counts_from_sunday() {
        // 7 March 2024 was a Thursday
        let setting = clock_setting(at(2024, 3, 7, 9, 5, 30)).unwrap();
        let expected = networx_protocol::ClockSetting::new(2024, 3, 7, 9, 5, 5).unwrap();
        assert_eq!(setting, expected);
    }

    #[test]
    fn test_clock_setting_rejects_years_outside_panel_range() {
        assert!(clock_setting(at(1999, 1, 1, 0, 0, 0)).is_err());
    }
}
