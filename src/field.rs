//! The field catalog: static domains, name tables and alias presets for the
//! seven schedule dimensions, plus the small English helpers used when
//! describing a schedule.

// name and alias lookups
use std::collections::HashMap;
use std::fmt;

// used so the name tables are only built once
use lazy_static::lazy_static;

// used to put field names in the JSON report
use serde::Serialize;

// ------------- Field -------------
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Second,
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
    Year,
}

impl Field {
    /// All fields in expression order.
    pub const ALL: [Field; 7] = [
        Field::Second,
        Field::Minute,
        Field::Hour,
        Field::DayOfMonth,
        Field::Month,
        Field::DayOfWeek,
        Field::Year,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
    /// Static inclusive domain of the field.
    pub fn limits(self) -> (u32, u32) {
        match self {
            Field::Second | Field::Minute => (0, 59),
            Field::Hour => (0, 23),
            Field::DayOfMonth => (1, 31),
            Field::Month => (1, 12),
            Field::DayOfWeek => (1, 7),
            Field::Year => (1970, 2099),
        }
    }
    pub fn min(self) -> u32 {
        self.limits().0
    }
    pub fn max(self) -> u32 {
        self.limits().1
    }
    pub fn contains(self, value: u32) -> bool {
        let (min, max) = self.limits();
        value >= min && value <= max
    }
    pub fn is_sub_day(self) -> bool {
        matches!(self, Field::Second | Field::Minute | Field::Hour)
    }
    /// The unit word used in phrases such as "every day".
    pub fn unit(self) -> &'static str {
        match self {
            Field::Second => "second",
            Field::Minute => "minute",
            Field::Hour => "hour",
            Field::DayOfMonth | Field::DayOfWeek => "day",
            Field::Month => "month",
            Field::Year => "year",
        }
    }
    pub fn name(self) -> &'static str {
        match self {
            Field::Second => "second",
            Field::Minute => "minute",
            Field::Hour => "hour",
            Field::DayOfMonth => "dom",
            Field::Month => "month",
            Field::DayOfWeek => "dow",
            Field::Year => "year",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ------------- Names -------------
lazy_static! {
    static ref MONTHS: HashMap<&'static str, u32> = {
        let mut m = HashMap::new();
        for (i, (abbr, full)) in [
            ("JAN", "JANUARY"), ("FEB", "FEBRUARY"), ("MAR", "MARCH"), ("APR", "APRIL"),
            ("MAY", "MAY"), ("JUN", "JUNE"), ("JUL", "JULY"), ("AUG", "AUGUST"),
            ("SEP", "SEPTEMBER"), ("OCT", "OCTOBER"), ("NOV", "NOVEMBER"), ("DEC", "DECEMBER"),
        ].iter().enumerate() {
            m.insert(*abbr, i as u32 + 1);
            m.insert(*full, i as u32 + 1);
        }
        m
    };
    // 1 = Monday, 7 = Sunday
    static ref WEEKDAYS: HashMap<&'static str, u32> = {
        let mut m = HashMap::new();
        for (i, (abbr, full)) in [
            ("MON", "MONDAY"), ("TUE", "TUESDAY"), ("WED", "WEDNESDAY"), ("THU", "THURSDAY"),
            ("FRI", "FRIDAY"), ("SAT", "SATURDAY"), ("SUN", "SUNDAY"),
        ].iter().enumerate() {
            m.insert(*abbr, i as u32 + 1);
            m.insert(*full, i as u32 + 1);
        }
        m
    };
    static ref ALIASES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("@YEARLY", "0 0 0 1 1 ? *");
        m.insert("@ANNUALLY", "0 0 0 1 1 ? *");
        m.insert("@MONTHLY", "0 0 0 L * ? *");
        m.insert("@WEEKLY", "0 0 0 ? * 1 *");
        m.insert("@DAILY", "0 0 0 * * ? *");
        m.insert("@MIDNIGHT", "0 0 0 * * ? *");
        m.insert("@HOURLY", "0 0 * * * ? *");
        m
    };
}

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];
const DAY_NAMES: [&str; 7] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];

/// Month number for an uppercase month name, full or abbreviated.
pub fn month_number(name: &str) -> Option<u32> {
    MONTHS.get(name).copied()
}

/// Weekday number (1 = Monday) for an uppercase day name, full or abbreviated.
pub fn weekday_number(name: &str) -> Option<u32> {
    WEEKDAYS.get(name).copied()
}

/// Canonical 7-field expansion of an uppercase preset such as `@HOURLY`.
pub fn alias(name: &str) -> Option<&'static str> {
    ALIASES.get(name).copied()
}

pub fn month_name(month: u32) -> Option<&'static str> {
    MONTH_NAMES.get(month.checked_sub(1)? as usize).copied()
}

pub fn day_name(weekday: u32) -> Option<&'static str> {
    DAY_NAMES.get(weekday.checked_sub(1)? as usize).copied()
}

/// English ordinal: 1st, 2nd, 3rd, 4th, 11th, 21st...
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Clock phrase for an exact time of day, e.g. "2:30 PM" or "midnight".
pub fn format_time(second: u32, minute: u32, hour: u32) -> String {
    if hour == 0 && minute == 0 && second == 0 {
        return String::from("midnight");
    }
    let ampm = if hour >= 12 { "PM" } else { "AM" };
    let h12 = if hour % 12 == 0 { 12 } else { hour % 12 };
    if second != 0 {
        format!("{h12}:{minute:02}:{second:02} {ampm}")
    } else if minute != 0 {
        format!("{h12}:{minute:02} {ampm}")
    } else {
        format!("{h12} {ampm}")
    }
}
