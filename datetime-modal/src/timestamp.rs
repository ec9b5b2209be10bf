//! Civil calendar and wall-clock value types.
//!
//! ## Usage
//!
//! The picker moves [`Timestamp`] values around: the host seeds one as the
//! initial value, native widgets report edited ones back, and the confirm
//! callback delivers the committed one. All values are naive civil time; no
//! timezone arithmetic happens here. Bounds and display offsets are passed
//! through to the native widget untouched.

use std::fmt;

/// A day on the proleptic Gregorian calendar.
///
/// Construction is validated, so a value always names a real day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

impl CalendarDate {
    /// Creates a date, returning `None` when the month (1..=12) or day does
    /// not name a real day of that year.
    pub fn new(year: i32, month: u8, day: u8) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        if day == 0 || day > days_in_month(year, month) {
            return None;
        }
        Some(Self { year, month, day })
    }

    /// The year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month, 1-based.
    pub fn month(&self) -> u8 {
        self.month
    }

    /// The day of the month, 1-based.
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Days since 1970-01-01.
    pub fn day_number(&self) -> i64 {
        days_from_civil(self.year, self.month, self.day)
    }
}

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalendarDate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.day_number().cmp(&other.day_number())
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A wall-clock time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
    second: u8,
}

impl ClockTime {
    /// 00:00:00.
    pub const MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
    };

    /// Creates a time, returning `None` when any component is out of range.
    pub fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }
        Some(Self {
            hour,
            minute,
            second,
        })
    }

    /// The hour, 0..=23.
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// The minute, 0..=59.
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// The second, 0..=59.
    pub fn second(&self) -> u8 {
        self.second
    }

    /// Seconds since midnight.
    pub fn seconds_of_day(&self) -> u32 {
        u32::from(self.hour) * 3600 + u32::from(self.minute) * 60 + u32::from(self.second)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// A calendar date paired with a time of day.
///
/// Totally ordered by day number first, then by seconds of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    date: CalendarDate,
    time: ClockTime,
}

impl Timestamp {
    /// Combines a date and a time of day.
    pub fn new(date: CalendarDate, time: ClockTime) -> Self {
        Self { date, time }
    }

    /// The calendar portion.
    pub fn date(&self) -> CalendarDate {
        self.date
    }

    /// The time-of-day portion.
    pub fn time(&self) -> ClockTime {
        self.time
    }

    /// Combines the pieces collected by separate date and time widgets.
    ///
    /// Year, month and day come from `date`; hour and minute from `time`.
    /// Seconds are dropped to zero because no step edits them.
    pub fn merge(date: CalendarDate, time: ClockTime) -> Self {
        Self {
            date,
            time: ClockTime {
                hour: time.hour,
                minute: time.minute,
                second: 0,
            },
        }
    }

    /// Pulls the value inside the optional inclusive bounds.
    pub fn clamp_to(self, min: Option<Timestamp>, max: Option<Timestamp>) -> Self {
        let mut value = self;
        if let Some(min) = min
            && value < min
        {
            value = min;
        }
        if let Some(max) = max
            && value > max
        {
            value = max;
        }
        value
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| self.time.seconds_of_day().cmp(&other.time.seconds_of_day()))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 30,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let mut y = year;
    let m = month as i32;
    let d = day as i32;
    y -= if m <= 2 { 1 } else { 0 };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = m + if m > 2 { -3 } else { 9 };
    let doy = (153 * mp + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    (era * 146_097 + doe - 719_468) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(y: i32, mo: u8, d: u8, h: u8, mi: u8, s: u8) -> Timestamp {
        Timestamp::new(
            CalendarDate::new(y, mo, d).expect("valid test date"),
            ClockTime::new(h, mi, s).expect("valid test time"),
        )
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(CalendarDate::new(2024, 0, 1).is_none());
        assert!(CalendarDate::new(2024, 13, 1).is_none());
        assert!(CalendarDate::new(2024, 4, 31).is_none());
        assert!(CalendarDate::new(2024, 2, 30).is_none());
        assert!(CalendarDate::new(2024, 1, 0).is_none());
    }

    #[test]
    fn leap_day_exists_only_in_leap_years() {
        assert!(CalendarDate::new(2024, 2, 29).is_some());
        assert!(CalendarDate::new(2023, 2, 29).is_none());
        assert!(CalendarDate::new(1900, 2, 29).is_none());
        assert!(CalendarDate::new(2000, 2, 29).is_some());
    }

    #[test]
    fn rejects_impossible_times() {
        assert!(ClockTime::new(24, 0, 0).is_none());
        assert!(ClockTime::new(0, 60, 0).is_none());
        assert!(ClockTime::new(0, 0, 60).is_none());
        assert!(ClockTime::new(23, 59, 59).is_some());
    }

    #[test]
    fn day_numbers_count_from_the_epoch() {
        let date = |y, mo, d| CalendarDate::new(y, mo, d).expect("valid test date");
        assert_eq!(date(1970, 1, 1).day_number(), 0);
        assert_eq!(date(1969, 12, 31).day_number(), -1);
        assert_eq!(date(1970, 1, 2).day_number(), 1);
        assert_eq!(date(2000, 2, 29).day_number(), 11_016);
        assert_eq!(date(2024, 6, 1).day_number(), 19_875);
        assert_eq!(date(0, 3, 1).day_number(), -719_468);
    }

    #[test]
    fn merge_keeps_date_and_wall_time_but_zeroes_seconds() {
        let merged = Timestamp::merge(
            CalendarDate::new(2024, 6, 1).expect("valid test date"),
            ClockTime::new(14, 30, 59).expect("valid test time"),
        );
        assert_eq!(merged, ts(2024, 6, 1, 14, 30, 0));
        assert_eq!(merged.to_string(), "2024-06-01T14:30:00");
    }

    #[test]
    fn ordering_is_chronological() {
        assert!(ts(2024, 6, 1, 23, 59, 59) < ts(2024, 6, 2, 0, 0, 0));
        assert!(ts(2024, 6, 2, 8, 0, 0) > ts(2024, 6, 2, 7, 59, 59));
        assert!(ts(1969, 12, 31, 12, 0, 0) < ts(1970, 1, 1, 0, 0, 0));
    }

    #[test]
    fn clamp_applies_only_outside_bounds() {
        let min = ts(2024, 1, 1, 0, 0, 0);
        let max = ts(2024, 12, 31, 23, 59, 0);
        let inside = ts(2024, 6, 1, 12, 0, 0);
        assert_eq!(inside.clamp_to(Some(min), Some(max)), inside);
        assert_eq!(ts(2023, 5, 1, 0, 0, 0).clamp_to(Some(min), Some(max)), min);
        assert_eq!(ts(2025, 1, 1, 0, 0, 0).clamp_to(Some(min), Some(max)), max);
        assert_eq!(ts(2025, 1, 1, 0, 0, 0).clamp_to(None, None), ts(2025, 1, 1, 0, 0, 0));
    }
}
