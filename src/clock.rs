use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date, rejecting anything that would not print back
/// identically (e.g. `2024-3-5`). Years are exactly four digits, so stored
/// dates sort correctly as text.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 10 || !value.as_bytes()[0].is_ascii_digit() {
        return None;
    }
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).ok()?;
    (date.format(DATE_FORMAT).to_string() == value).then_some(date)
}

/// Parses an `HH:MM` or `HH:MM:SS` time of day, canonical form only.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let format = match value.len() {
        5 => "%H:%M",
        8 => "%H:%M:%S",
        _ => return None,
    };
    let time = NaiveTime::parse_from_str(value, format).ok()?;
    // chrono models a leap second as nanoseconds past 1e9
    if time.nanosecond() >= 1_000_000_000 {
        return None;
    }
    (time.format(format).to_string() == value).then_some(time)
}

/// Hour difference between two times, rendered the way the planner has
/// always shown it: `2h`, `1.5h`, `-2h`. Nothing stops `to` from being
/// earlier than `from`.
pub fn duration_label(from: NaiveTime, to: NaiveTime) -> String {
    let hours = (to - from).num_seconds() as f64 / 3600.0;
    format!("{hours}h")
}

/// `13:05` becomes `1:05 PM`.
pub fn format_12h(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// `2024-03-31` becomes `31 March 2024`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Visual classification of a day block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayMarks {
    pub weekend: bool,
    pub midweek: bool,
    pub month_end: bool,
}

impl DayMarks {
    pub fn for_date(date: NaiveDate) -> Self {
        let weekday = date.weekday();
        Self {
            weekend: matches!(weekday, Weekday::Sat | Weekday::Sun),
            midweek: weekday == Weekday::Wed,
            month_end: date
                .succ_opt()
                .map_or(true, |next| next.month() != date.month()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(value: &str) -> NaiveTime {
        parse_time(value).unwrap()
    }

    #[test]
    fn accepts_canonical_dates_only() {
        assert!(parse_date("2024-03-31").is_some());
        assert!(parse_date("2024-3-31").is_none());
        assert!(parse_date("2024-02-30").is_none());
        assert!(parse_date("31/03/2024").is_none());
    }

    #[test]
    fn years_must_be_four_plain_digits() {
        assert!(parse_date("+10000-01-01").is_none());
        assert!(parse_date("-0001-01-01").is_none());
        assert!(parse_date("+999-01-01").is_none());
        assert!(parse_date("10000-01-01").is_none());
        assert!(parse_date("0001-01-01").is_some());
    }

    #[test]
    fn leap_seconds_are_not_times_of_day() {
        assert!(parse_time("23:59:60").is_none());
        assert!(parse_time("23:59:59").is_some());
    }

    #[test]
    fn accepts_minutes_and_seconds_forms() {
        assert_eq!(t("09:00"), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(t("09:00:30"), NaiveTime::from_hms_opt(9, 0, 30).unwrap());
        assert!(parse_time("9:00").is_none());
        assert!(parse_time("25:00").is_none());
        assert!(parse_time("").is_none());
    }

    #[test]
    fn duration_is_signed_hour_difference() {
        assert_eq!(duration_label(t("09:00"), t("11:00")), "2h");
        assert_eq!(duration_label(t("11:00"), t("09:00")), "-2h");
        assert_eq!(duration_label(t("09:00"), t("10:30")), "1.5h");
        assert_eq!(duration_label(t("09:00"), t("09:00")), "0h");
    }

    #[test]
    fn twelve_hour_display() {
        assert_eq!(format_12h(t("09:00")), "9:00 AM");
        assert_eq!(format_12h(t("13:05")), "1:05 PM");
        assert_eq!(format_12h(t("00:15")), "12:15 AM");
        assert_eq!(format_12h(t("12:00")), "12:00 PM");
    }

    #[test]
    fn long_date_display() {
        assert_eq!(format_long_date(parse_date("2024-03-01").unwrap()), "1 March 2024");
    }

    #[test]
    fn sunday_month_end_carries_both_marks() {
        let marks = DayMarks::for_date(parse_date("2024-03-31").unwrap());
        assert!(marks.weekend);
        assert!(marks.month_end);
        assert!(!marks.midweek);
    }

    #[test]
    fn leap_day_is_month_end_and_wednesday_is_midweek() {
        let leap = DayMarks::for_date(parse_date("2024-02-29").unwrap());
        assert!(leap.month_end);
        assert!(!leap.weekend);

        let wednesday = DayMarks::for_date(parse_date("2024-03-13").unwrap());
        assert_eq!(
            wednesday,
            DayMarks {
                weekend: false,
                midweek: true,
                month_end: false
            }
        );
    }
}
