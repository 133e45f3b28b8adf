//! Serial date to calendar date conversion.
//!
//! Serial dates count days from a fixed epoch: offset 1 is "day 0 of
//! February 1900" (31 January 1900), so serial 2 is 1 February 1900. Values
//! below 2 have no calendar date.
//!
//! Formatted output keeps the historical `year/month/day` layout with a
//! zero-based month and one-based day: serial 41 (12 March 1900) renders as
//! `1900/2/12`. Output stays compatible with existing users.

use chrono::{Datelike, Days, NaiveDate};
use std::fmt;

/// Smallest serial accepted by the prompt.
pub const MIN_SERIAL: u32 = 2;

/// Largest serial accepted by the prompt (five digits).
pub const MAX_SERIAL: u32 = 99_999;

/// Calendar date that serial offset 0 maps to.
fn epoch_anchor() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1900, 1, 31)
}

/// A serial date bounded to `[MIN_SERIAL, MAX_SERIAL]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SerialDate(u32);

impl SerialDate {
    /// Returns `None` when `value` lies outside the prompt range.
    pub fn new(value: u32) -> Option<Self> {
        (MIN_SERIAL..=MAX_SERIAL)
            .contains(&value)
            .then_some(Self(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Converts to a calendar date.
    pub fn to_date(self) -> Option<CalendarDate> {
        serial_to_date(i64::from(self.0))
    }
}

impl fmt::Display for SerialDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Calendar date produced from a serial.
///
/// Accessors use the usual one-based month; only [`fmt::Display`] applies
/// the zero-based month of the historical output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month of the year, 1 through 12.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Month of the year as displayed, 0 through 11.
    pub fn display_month(&self) -> u32 {
        self.0.month0()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.year(), self.display_month(), self.day())
    }
}

/// Converts an integer serial to a calendar date.
///
/// Returns `None` for serials below 2 and for serials past the last
/// representable calendar date. Never panics.
///
/// # Examples
///
/// ```
/// use int2date_core::serial_to_date;
///
/// let date = serial_to_date(41).unwrap();
/// assert_eq!((date.year(), date.month(), date.day()), (1900, 3, 12));
/// assert_eq!(date.to_string(), "1900/2/12");
///
/// assert!(serial_to_date(1).is_none());
/// ```
pub fn serial_to_date(serial: i64) -> Option<CalendarDate> {
    if serial < i64::from(MIN_SERIAL) {
        return None;
    }
    let offset = u64::try_from(serial - 1).ok()?;
    epoch_anchor()?
        .checked_add_days(Days::new(offset))
        .map(CalendarDate)
}

/// Converts an arbitrary number to a calendar date.
///
/// Non-finite and fractional values have no calendar date.
#[allow(clippy::float_cmp)]
pub fn number_to_date(serial: f64) -> Option<CalendarDate> {
    if !serial.is_finite() || serial.fract() != 0.0 {
        return None;
    }
    if serial < f64::from(MIN_SERIAL) || serial >= i64::MAX as f64 {
        return None;
    }
    serial_to_date(serial as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatted(serial: i64) -> String {
        serial_to_date(serial).unwrap().to_string()
    }

    #[test]
    fn test_epoch_start() {
        let date = serial_to_date(2).unwrap();
        assert_eq!(date.as_naive_date(), NaiveDate::from_ymd_opt(1900, 2, 1).unwrap());
        assert_eq!(date.to_string(), "1900/1/1");
    }

    #[test]
    fn test_zero_and_one_have_no_date() {
        assert!(serial_to_date(0).is_none());
        assert!(serial_to_date(1).is_none());
        assert!(serial_to_date(-1).is_none());
        assert!(serial_to_date(i64::MIN).is_none());
    }

    #[test]
    fn test_month_carry_without_leap_day() {
        // 1900 is not a leap year: February has 28 days.
        assert_eq!(formatted(29), "1900/1/28");
        assert_eq!(formatted(30), "1900/2/1");
        assert_eq!(formatted(41), "1900/2/12");
        assert_eq!(formatted(61), "1900/3/1");
    }

    #[test]
    fn test_year_carry() {
        assert_eq!(formatted(366), "1901/0/31");
        assert_eq!(formatted(367), "1901/1/1");
    }

    #[test]
    fn test_known_values() {
        assert_eq!(formatted(25569), "1970/1/1");
        assert_eq!(formatted(36526), "2000/1/1");
        assert_eq!(formatted(44197), "2021/1/1");
        assert_eq!(formatted(99999), "2173/10/13");
    }

    #[test]
    fn test_accessors_use_one_based_month() {
        let date = serial_to_date(41).unwrap();
        assert_eq!(date.year(), 1900);
        assert_eq!(date.month(), 3);
        assert_eq!(date.display_month(), 2);
        assert_eq!(date.day(), 12);
    }

    #[test]
    fn test_whole_prompt_range_converts() {
        let mut previous = None;
        for serial in i64::from(MIN_SERIAL)..=i64::from(MAX_SERIAL) {
            let date = serial_to_date(serial)
                .unwrap_or_else(|| panic!("serial {serial} should convert"));
            assert!(date.year() >= 1900);
            assert_eq!(date.to_string().split('/').count(), 3);
            if let Some(prev) = previous {
                assert!(date > prev, "dates must increase at serial {serial}");
            }
            previous = Some(date);
        }
    }

    #[test]
    fn test_extreme_integers_do_not_panic() {
        assert!(serial_to_date(i64::from(i32::MAX)).is_none());
        assert!(serial_to_date(i64::MAX).is_none());
    }

    #[test]
    fn test_number_to_date_rejects_non_integers() {
        assert!(number_to_date(41.5).is_none());
        assert!(number_to_date(f64::NAN).is_none());
        assert!(number_to_date(f64::INFINITY).is_none());
        assert!(number_to_date(f64::NEG_INFINITY).is_none());
        assert!(number_to_date(0.0).is_none());
        assert!(number_to_date(1.0).is_none());
        assert!(number_to_date(1e300).is_none());
    }

    #[test]
    fn test_number_to_date_accepts_integral_values() {
        assert_eq!(number_to_date(41.0), serial_to_date(41));
    }

    #[test]
    fn test_serial_date_bounds() {
        assert!(SerialDate::new(1).is_none());
        assert!(SerialDate::new(100_000).is_none());

        let serial = SerialDate::new(41).unwrap();
        assert_eq!(serial.get(), 41);
        assert_eq!(serial.to_string(), "41");
        assert_eq!(serial.to_date(), serial_to_date(41));
    }
}
