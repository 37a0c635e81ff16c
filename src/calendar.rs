//! Calendar and time zone plumbing over `chrono`.
//!
//! The search engine works on wall-clock `NaiveDateTime`s in the schedule's
//! zone; everything it needs from a calendar library lives here: day counts,
//! weekday numbering, component setters, unit arithmetic and the conversions
//! between epoch seconds and wall-clock time.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike,
    Utc,
};
// used for named zones and their daylight saving rules
use chrono_tz::Tz;

use crate::field::Field;

/// Number of days in the given month, leap years included.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Days in the month of the given date.
pub fn month_length(dt: &NaiveDateTime) -> u32 {
    days_in_month(dt.year(), dt.month())
}

/// Weekday of a date, 1 = Monday .. 7 = Sunday.
pub fn weekday(date: NaiveDate) -> u32 {
    date.weekday().number_from_monday()
}

/// The date `day` of the same month as `dt`, if such a day exists.
pub fn day_of_month(dt: &NaiveDateTime, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(dt.year(), dt.month(), day)
}

/// Component value of `dt` for a field, day of week numbered from Monday.
pub fn component(dt: &NaiveDateTime, field: Field) -> u32 {
    match field {
        Field::Second => dt.second(),
        Field::Minute => dt.minute(),
        Field::Hour => dt.hour(),
        Field::DayOfMonth => dt.day(),
        Field::Month => dt.month(),
        Field::DayOfWeek => weekday(dt.date()),
        Field::Year => u32::try_from(dt.year()).unwrap_or(0),
    }
}

/// Replace a sub-day component; other fields are left untouched.
pub fn with_component(dt: &NaiveDateTime, field: Field, value: u32) -> Option<NaiveDateTime> {
    match field {
        Field::Second => dt.with_second(value),
        Field::Minute => dt.with_minute(value),
        Field::Hour => dt.with_hour(value),
        _ => Some(*dt),
    }
}

/// One unit of the given field as a duration. Only fixed-length units
/// (second through day) are meaningful here.
fn unit(field: Field) -> Duration {
    match field {
        Field::Second => Duration::seconds(1),
        Field::Minute => Duration::minutes(1),
        Field::Hour => Duration::hours(1),
        _ => Duration::days(1),
    }
}

pub fn plus_one(dt: &NaiveDateTime, field: Field) -> Option<NaiveDateTime> {
    dt.checked_add_signed(unit(field))
}

pub fn minus_one(dt: &NaiveDateTime, field: Field) -> Option<NaiveDateTime> {
    dt.checked_sub_signed(unit(field))
}

/// Move `dt` to the given calendar date, keeping the time of day.
pub fn with_date(dt: &NaiveDateTime, year: i32, month: u32, day: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day).map(|date| date.and_time(dt.time()))
}

// ------------- Zone -------------
/// How wall-clock time relates to absolute time for a schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zone {
    /// A fixed offset from UTC, in minutes.
    Fixed(i32),
    /// A named IANA zone with its daylight saving rules.
    Named(Tz),
}

impl Default for Zone {
    fn default() -> Self {
        Zone::Fixed(0)
    }
}

impl Zone {
    /// Wall-clock time of an epoch instant in this zone.
    pub fn to_local(&self, epoch: i64) -> Option<NaiveDateTime> {
        let utc = DateTime::<Utc>::from_timestamp(epoch, 0)?;
        match self {
            Zone::Fixed(minutes) => utc
                .naive_utc()
                .checked_add_signed(Duration::minutes(i64::from(*minutes))),
            Zone::Named(tz) => Some(utc.with_timezone(tz).naive_local()),
        }
    }

    /// The other wall-clock reading of `epoch` when its local time lies in a
    /// daylight saving fold: the same instant under the offset of the other
    /// pass through the repeated hour. `None` outside a fold.
    pub fn fold_reading(&self, epoch: i64) -> Option<NaiveDateTime> {
        let local = self.to_local(epoch)?;
        let other = match self.to_epochs(&local)[..] {
            [first, second] if first == epoch => second,
            [first, second] if second == epoch => first,
            _ => return None,
        };
        let utc = DateTime::<Utc>::from_timestamp(epoch, 0)?.naive_utc();
        utc.checked_add_signed(Duration::minutes(i64::from(self.offset_minutes_at(other))))
    }

    /// The instants a wall-clock time denotes, earliest first. A fixed offset
    /// always yields exactly one instant; a named zone yields none inside a
    /// daylight saving gap and two inside a fold.
    pub fn to_epochs(&self, local: &NaiveDateTime) -> Vec<i64> {
        match self {
            Zone::Fixed(minutes) => {
                vec![local.and_utc().timestamp() - i64::from(*minutes) * 60]
            }
            Zone::Named(tz) => match tz.from_local_datetime(local) {
                LocalResult::Single(dt) => vec![dt.timestamp()],
                LocalResult::Ambiguous(a, b) => {
                    let mut epochs = vec![a.timestamp(), b.timestamp()];
                    epochs.sort_unstable();
                    epochs
                }
                LocalResult::None => Vec::new(),
            },
        }
    }

    /// Offset from UTC in minutes at the given instant.
    pub fn offset_minutes_at(&self, epoch: i64) -> i32 {
        match self {
            Zone::Fixed(minutes) => *minutes,
            Zone::Named(tz) => DateTime::<Utc>::from_timestamp(epoch, 0)
                .map(|utc| utc.with_timezone(tz).offset().fix().local_minus_utc() / 60)
                .unwrap_or(0),
        }
    }

    pub fn name(&self) -> String {
        match self {
            Zone::Fixed(_) => String::from("UTC"),
            Zone::Named(tz) => tz.name().to_string(),
        }
    }
}
