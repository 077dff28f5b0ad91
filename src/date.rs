use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::{Error, Result};

/// Timezone-naive point in time.
///
/// Offsets are dropped on conversion, the wall-clock reading is kept as is.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Timestamp(pub(crate) NaiveDateTime);

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M", "%H%M%S%.f", "%H%M"];

impl Timestamp {
    /// Midnight at the start of the given day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self::from)
            .ok_or_else(|| Error::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
    }

    /// Parses ISO-8601 text with or without time-of-day and UTC offset.
    ///
    /// Accepted shapes are `YYYY-MM-DD` or `YYYYMMDD`, optionally followed
    /// by `T` (or a space) and `HH`, `HH:MM`, `HH:MM:SS[.fff]` or the basic
    /// `HHMM`, `HHMMSS[.fff]` forms (`,` also marks the fraction), optionally
    /// followed by `Z`, `+HH:MM`, `+HHMM` or `+HH` (or `-`).
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || Error::InvalidDate(text.to_string());
        let trimmed = text.trim();

        let (date_part, time_part) = match trimmed.find(['T', 't', ' ']) {
            Some(split) => (&trimmed[..split], Some(&trimmed[split + 1..])),
            None => (trimmed, None),
        };

        let date = DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
            .ok_or_else(invalid)?;
        let time = match time_part {
            None => NaiveTime::MIN,
            Some(time) => {
                let time = strip_offset(time).ok_or_else(invalid)?.replace(',', ".");
                parse_time(&time).ok_or_else(invalid)?
            }
        };

        Ok(Self(date.and_time(time)))
    }

    /// Day of the month
    #[inline]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Month of the year
    #[inline]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Year
    #[inline]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    #[inline]
    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }
}

fn parse_time(time: &str) -> Option<NaiveTime> {
    // hour only
    if time.len() == 2 && time.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveTime::from_hms_opt(time.parse().ok()?, 0, 0);
    }
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(time, format).ok())
}

/// Removes a trailing `Z` or numeric offset from the time-of-day part.
fn strip_offset(time: &str) -> Option<&str> {
    if let Some(local) = time.strip_suffix(['Z', 'z']) {
        return Some(local);
    }
    let Some(sign) = time.rfind(['+', '-']) else {
        return Some(time);
    };
    let offset = time[sign + 1..].replace(':', "");
    if !matches!(offset.len(), 2 | 4) || !offset.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(&time[..sign])
}

impl std::str::FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<NaiveDateTime> for Timestamp {
    #[inline]
    fn from(value: NaiveDateTime) -> Self {
        Timestamp(value)
    }
}

impl From<NaiveDate> for Timestamp {
    #[inline]
    fn from(value: NaiveDate) -> Self {
        Timestamp(value.and_time(NaiveTime::MIN))
    }
}

impl<Tz: TimeZone> From<chrono::DateTime<Tz>> for Timestamp {
    #[inline]
    fn from(value: chrono::DateTime<Tz>) -> Self {
        Timestamp(value.naive_local())
    }
}

impl From<std::time::SystemTime> for Timestamp {
    fn from(value: std::time::SystemTime) -> Self {
        Timestamp(chrono::DateTime::<chrono::Utc>::from(value).naive_utc())
    }
}

impl From<Timestamp> for NaiveDateTime {
    #[inline]
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

#[cfg(feature = "time")]
impl TryFrom<time::Date> for Timestamp {
    type Error = crate::Error;

    fn try_from(value: time::Date) -> Result<Self> {
        Timestamp::from_ymd(value.year(), u8::from(value.month()).into(), value.day().into())
    }
}
#[cfg(feature = "time")]
impl TryFrom<time::PrimitiveDateTime> for Timestamp {
    type Error = crate::Error;

    fn try_from(value: time::PrimitiveDateTime) -> Result<Self> {
        let date = Timestamp::try_from(value.date())?.0.date();
        let time = NaiveTime::from_hms_nano_opt(
            value.hour().into(),
            value.minute().into(),
            value.second().into(),
            value.nanosecond(),
        )
        .ok_or_else(|| Error::InvalidDate(value.to_string()))?;
        Ok(Timestamp(date.and_time(time)))
    }
}
#[cfg(feature = "time")]
impl TryFrom<time::OffsetDateTime> for Timestamp {
    type Error = crate::Error;

    #[inline]
    fn try_from(value: time::OffsetDateTime) -> Result<Self> {
        Timestamp::try_from(time::PrimitiveDateTime::new(value.date(), value.time()))
    }
}

impl std::fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timestamp({})", self.0.format("%Y-%m-%dT%H:%M:%S%.f"))
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S%.f"))
    }
}

/// Inclusive `[start, end]` filter window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: Timestamp,
    end: Timestamp,
}

impl DateRange {
    /// Fails with [`Error::InvalidRange`] when `start` is later than `end`.
    pub fn new(start: impl Into<Timestamp>, end: impl Into<Timestamp>) -> Result<Self> {
        let (start, end) = (start.into(), end.into());
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(DateRange { start, end })
    }

    /// Builds a range from two pieces of date/time text.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(Timestamp::parse(start)?, Timestamp::parse(end)?)
    }

    #[inline]
    pub fn start(&self) -> Timestamp {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Every calendar year touched by the range, ascending.
    #[inline]
    pub fn years(&self) -> std::ops::RangeInclusive<i32> {
        self.start.year()..=self.end.year()
    }

    #[inline]
    pub fn contains(&self, timestamp: Timestamp) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}

/// Inclusive list of years from `start.year()` to `end.year()`.
pub fn generate_years_range(
    start: impl Into<Timestamp>,
    end: impl Into<Timestamp>,
) -> Result<Vec<i32>> {
    Ok(DateRange::new(start, end)?.years().collect())
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Timestamp {
        Timestamp::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn parses_plain_dates() {
        assert_eq!(Timestamp::parse("1992-01-07").unwrap(), ymd(1992, 1, 7));
        assert_eq!(Timestamp::parse("19920107").unwrap(), ymd(1992, 1, 7));
    }

    #[test]
    fn parses_time_of_day() {
        let ts = Timestamp::parse("1992-03-29T03:00:00").unwrap();
        assert_eq!(
            ts.naive(),
            NaiveDate::from_ymd_opt(1992, 3, 29)
                .unwrap()
                .and_hms_opt(3, 0, 0)
                .unwrap()
        );
        assert_eq!(Timestamp::parse("1992-03-29 03:00").unwrap(), ts);
        assert_eq!(Timestamp::parse("1992-03-29T03").unwrap(), ts);
        assert_eq!(Timestamp::parse("1992-03-29T0300").unwrap(), ts);
        assert_eq!(Timestamp::parse("19920329T030000").unwrap(), ts);
        assert_eq!(
            Timestamp::parse("1992-03-29T03:00:00.250").unwrap().naive(),
            NaiveDate::from_ymd_opt(1992, 3, 29)
                .unwrap()
                .and_hms_milli_opt(3, 0, 0, 250)
                .unwrap()
        );
        assert_eq!(
            Timestamp::parse("1992-03-29T03:00:00,250").unwrap(),
            Timestamp::parse("1992-03-29T03:00:00.250").unwrap()
        );
    }

    #[test]
    fn keeps_wall_clock_when_dropping_offsets() {
        let expected = Timestamp::parse("1992-10-25T04:00:00").unwrap();
        assert_eq!(Timestamp::parse("1992-10-25T04:00:00+02:00").unwrap(), expected);
        assert_eq!(Timestamp::parse("1992-10-25T04:00:00-05:00").unwrap(), expected);
        assert_eq!(Timestamp::parse("1992-10-25T04:00:00+0200").unwrap(), expected);
        assert_eq!(Timestamp::parse("1992-10-25T04:00:00Z").unwrap(), expected);
        assert_eq!(Timestamp::parse("1992-10-25T04:00:00+03").unwrap(), expected);
        assert_eq!(Timestamp::parse("1992-10-25T04-05").unwrap(), expected);
        assert_eq!(Timestamp::parse("19921025T040000+0200").unwrap(), expected);
    }

    #[test]
    fn rejects_garbage() {
        for text in ["", "yesterday", "1992-13-01", "1992-02-30", "1992-01-01T25:00", "1992-01-01T10:00+2",
            "1992-01-01T1", "1992-01-01T10:00+123", "1992-01-01Tab"] {
            assert!(
                matches!(Timestamp::parse(text), Err(Error::InvalidDate(_))),
                "{text:?} should not parse"
            );
        }
    }

    #[test]
    fn converts_from_chrono_with_offset() {
        let offset = FixedOffset::east_opt(3 * 3600).unwrap();
        let dt = offset.with_ymd_and_hms(1992, 8, 24, 23, 30, 0).unwrap();
        assert_eq!(Timestamp::from(dt), Timestamp::parse("1992-08-24T23:30:00").unwrap());
    }

    #[cfg(feature = "time")]
    #[test]
    fn converts_from_time() {
        let date = time::Date::from_calendar_date(1992, time::Month::August, 24).unwrap();
        assert_eq!(Timestamp::try_from(date).unwrap(), ymd(1992, 8, 24));

        let dt = date.with_hms(12, 15, 0).unwrap();
        assert_eq!(
            Timestamp::try_from(dt.assume_offset(time::UtcOffset::from_hms(-4, 0, 0).unwrap()))
                .unwrap(),
            Timestamp::parse("1992-08-24T12:15:00").unwrap()
        );
    }

    #[test]
    fn years_range_is_inclusive() {
        assert_eq!(generate_years_range(ymd(1992, 1, 1), ymd(1992, 12, 31)).unwrap(), vec![1992]);
        assert_eq!(
            generate_years_range(ymd(1990, 12, 31), ymd(1993, 1, 1)).unwrap(),
            vec![1990, 1991, 1992, 1993]
        );
        assert_eq!(generate_years_range(ymd(2000, 5, 5), ymd(2000, 5, 5)).unwrap(), vec![2000]);
    }

    #[test]
    fn years_range_rejects_reversed_bounds() {
        assert!(matches!(
            generate_years_range(ymd(1993, 1, 1), ymd(1992, 12, 31)),
            Err(Error::InvalidRange { .. })
        ));
    }

    #[test]
    fn range_parse_rejects_non_dates() {
        assert!(matches!(
            DateRange::parse("1992", "1992-12-31"),
            Err(Error::InvalidDate(_))
        ));
        assert!(matches!(
            DateRange::parse("1992-01-01", "not a date"),
            Err(Error::InvalidDate(_))
        ));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let range = DateRange::new(ymd(1992, 1, 1), ymd(1992, 12, 31)).unwrap();
        assert!(range.contains(ymd(1992, 1, 1)));
        assert!(range.contains(ymd(1992, 12, 31)));
        assert!(!range.contains(ymd(1991, 12, 31)));
        assert!(!range.contains(ymd(1993, 1, 1)));
        assert!(!range.contains(Timestamp::parse("1992-12-31T00:00:01").unwrap()));
    }
}
