//! Compiled field constraints.
//!
//! A [`Pattern`] is the constraint an expression places on one field. The set
//! of variants is closed; every consumer (matcher, optimizer, describer)
//! dispatches over it with an exhaustive `match`. Patterns own their children,
//! which only `Step` and `List` have.
//!
//! Matching takes the field's numeric value together with the full wall-clock
//! date, since the calendar forms (`L`, `LW`, `W`, `#`) depend on the month the
//! candidate falls in.

use std::fmt;

use chrono::{Datelike, NaiveDateTime};

use crate::calendar::{self, month_length};
use crate::field::{self, Field};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Pattern {
    /// `*`
    #[default]
    Wildcard,
    /// `?`, only on day of month or day of week
    Unspecified,
    Single(u32),
    /// `low-high`; `wrapped` marks a day of week range crossing Sunday
    Range { low: u32, high: u32, wrapped: bool },
    Step { base: Box<Pattern>, step: u32 },
    List(Vec<Pattern>),
    /// `L`/`L-k` on day of month (`weekday` is `None`), `DL` on day of week
    Last { offset: u32, weekday: Option<u32> },
    /// `LW`
    LastWeekday,
    /// `NW`
    NearestWeekday(u32),
    /// `D#N`
    Nth { weekday: u32, nth: u32 },
}

impl Pattern {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Pattern::Wildcard)
    }
    pub fn is_unspecified(&self) -> bool {
        matches!(self, Pattern::Unspecified)
    }
    pub fn single(&self) -> Option<u32> {
        match self {
            Pattern::Single(v) => Some(*v),
            _ => None,
        }
    }
    pub fn children(&self) -> &[Pattern] {
        match self {
            Pattern::Step { base, .. } => std::slice::from_ref(base.as_ref()),
            Pattern::List(children) => children,
            _ => &[],
        }
    }

    /// Does the pattern accept `value` for a candidate at `dt`?
    pub fn matches(&self, value: u32, dt: &NaiveDateTime) -> bool {
        match self {
            Pattern::Wildcard | Pattern::Unspecified => true,
            Pattern::Single(v) => value == *v,
            Pattern::Range { low, high, wrapped } => {
                if *wrapped {
                    value >= *low || value <= *high
                } else {
                    value >= *low && value <= *high
                }
            }
            Pattern::Step { base, step } => {
                if *step == 0 {
                    return false;
                }
                match base.as_ref() {
                    Pattern::Wildcard => value % step == 0,
                    Pattern::Single(start) => value >= *start && (value - start) % step == 0,
                    Pattern::Range { low, high, .. } => {
                        value >= *low && value <= *high && (value - low) % step == 0
                    }
                    _ => false,
                }
            }
            Pattern::List(children) => children.iter().any(|child| child.matches(value, dt)),
            Pattern::Last { offset, weekday: None } => {
                month_length(dt).checked_sub(*offset) == Some(dt.day())
            }
            Pattern::Last { weekday: Some(target), .. } => {
                let last = month_length(dt);
                let Some(last_date) = calendar::day_of_month(dt, last) else {
                    return false;
                };
                let days_back = (calendar::weekday(last_date) + 7 - target) % 7;
                dt.day() + days_back == last
            }
            Pattern::LastWeekday => {
                let mut candidate = month_length(dt);
                while candidate >= 1 {
                    match calendar::day_of_month(dt, candidate) {
                        Some(date) if calendar::weekday(date) <= 5 => return dt.day() == candidate,
                        _ => candidate -= 1,
                    }
                }
                false
            }
            Pattern::NearestWeekday(day) => {
                let length = month_length(dt);
                let Some(target) = calendar::day_of_month(dt, *day) else {
                    return false;
                };
                let nearest = match calendar::weekday(target) {
                    1..=5 => Some(*day),
                    // Saturday moves back to Friday, Sunday forward to Monday,
                    // neither leaves the month
                    6 => day.checked_sub(1).filter(|d| *d >= 1),
                    _ => Some(day + 1).filter(|d| *d <= length),
                };
                nearest == Some(dt.day())
            }
            Pattern::Nth { weekday, nth } => {
                calendar::weekday(dt.date()) == *weekday && (dt.day() - 1) / 7 + 1 == *nth
            }
        }
    }

    /// Smallest value of the field's domain the pattern accepts at `dt`. The
    /// day of month domain ends at the actual length of the month.
    pub fn lowest(&self, field: Field, dt: &NaiveDateTime) -> Option<u32> {
        let (min, max) = domain(field, dt);
        (min..=max).find(|v| self.matches(*v, dt))
    }

    /// Largest value of the field's domain the pattern accepts at `dt`.
    pub fn highest(&self, field: Field, dt: &NaiveDateTime) -> Option<u32> {
        let (min, max) = domain(field, dt);
        (min..=max).rev().find(|v| self.matches(*v, dt))
    }

    /// Canonical token; re-parses to an equivalent pattern.
    pub fn token(&self) -> String {
        self.render(&|v| v)
    }

    /// Canonical token with day of week values renumbered 1 = Sunday ..
    /// 7 = Saturday. Other fields render as [`Pattern::token`]. A stepped
    /// day of week is written out as the days it selects, since a step does
    /// not keep its meaning under the new numbering.
    pub fn alternate_token(&self, field: Field) -> String {
        if field == Field::DayOfWeek {
            self.steps_as_days().render(&|v| if v == 7 { 1 } else { v + 1 })
        } else {
            self.token()
        }
    }

    fn steps_as_days(&self) -> Pattern {
        match self {
            Pattern::Step { .. } => {
                // steps never look at the date
                let anchor = NaiveDateTime::default();
                let mut days: Vec<Pattern> = (1..=7)
                    .filter(|day| self.matches(*day, &anchor))
                    .map(Pattern::Single)
                    .collect();
                match days.len() {
                    0 => self.clone(),
                    1 => days.remove(0),
                    _ => Pattern::List(days),
                }
            }
            Pattern::List(children) => Pattern::List(children.iter().map(Pattern::steps_as_days).collect()),
            other => other.clone(),
        }
    }

    // `value` maps weekday-bearing numbers; step intervals and occurrence
    // counts are never passed through it.
    fn render(&self, value: &dyn Fn(u32) -> u32) -> String {
        match self {
            Pattern::Wildcard => String::from("*"),
            Pattern::Unspecified => String::from("?"),
            Pattern::Single(v) => value(*v).to_string(),
            Pattern::Range { low, high, .. } => format!("{}-{}", value(*low), value(*high)),
            Pattern::Step { base, step } => format!("{}/{}", base.render(value), step),
            Pattern::List(children) => children
                .iter()
                .map(|child| child.render(value))
                .collect::<Vec<_>>()
                .join(","),
            Pattern::Last { offset: 0, weekday: None } => String::from("L"),
            Pattern::Last { offset, weekday: None } => format!("L-{offset}"),
            Pattern::Last { weekday: Some(d), .. } => format!("{}L", value(*d)),
            Pattern::LastWeekday => String::from("LW"),
            Pattern::NearestWeekday(day) => format!("{day}W"),
            Pattern::Nth { weekday, nth } => format!("{}#{}", value(*weekday), nth),
        }
    }

    /// English phrase for the pattern as a constraint on `field`.
    pub fn english(&self, field: Field) -> String {
        match self {
            Pattern::Wildcard => format!("every {}", field.unit()),
            Pattern::Unspecified => String::new(),
            Pattern::Single(v) => {
                let value = english_value(field, *v);
                if field.is_sub_day() {
                    format!("{} {}", field.unit(), value)
                } else {
                    value
                }
            }
            Pattern::Range { low, high, .. } => format!(
                "every {} from {} to {}",
                field.unit(),
                english_value(field, *low),
                english_value(field, *high)
            ),
            Pattern::Step { base, step } => {
                let mut phrase = format!("every {} {}", step, field.unit());
                if *step != 1 {
                    phrase.push('s');
                }
                match base.as_ref() {
                    Pattern::Wildcard => (),
                    Pattern::Range { low, high, .. } => {
                        phrase += &format!(
                            " from {} to {}",
                            english_value(field, *low),
                            english_value(field, *high)
                        );
                    }
                    other => {
                        phrase += " starting ";
                        phrase += &other.english(field);
                    }
                }
                phrase
            }
            Pattern::List(children) => children
                .iter()
                .map(|child| child.english(field))
                .collect::<Vec<_>>()
                .join(", "),
            Pattern::Last { offset: 0, weekday: None } => String::from("on the last day"),
            Pattern::Last { offset, weekday: None } => {
                format!("on the {} to last day", field::ordinal(offset + 1))
            }
            Pattern::Last { weekday: Some(d), .. } => {
                format!("on the last {}", field::day_name(*d).unwrap_or("Sunday"))
            }
            Pattern::LastWeekday => String::from("on the last weekday"),
            Pattern::NearestWeekday(day) => {
                format!("on the nearest weekday to the {}", field::ordinal(*day))
            }
            Pattern::Nth { weekday, nth } => format!(
                "on the {} {}",
                field::ordinal(*nth),
                field::day_name(*weekday).unwrap_or("Sunday")
            ),
        }
    }

    /// Short variant label used by the diagnostic tree dump.
    pub fn label(&self) -> String {
        match self {
            Pattern::Wildcard => String::from("Wildcard"),
            Pattern::Unspecified => String::from("Unspecified"),
            Pattern::Single(v) => format!("Single({v})"),
            Pattern::Range { low, high, wrapped: false } => format!("Range({low}-{high})"),
            Pattern::Range { low, high, wrapped: true } => format!("Range({low}-{high}, wrapped)"),
            Pattern::Step { step, .. } => format!("Step(/{step})"),
            Pattern::List(children) => format!("List({})", children.len()),
            Pattern::Last { offset, weekday: None } => format!("Last(offset {offset})"),
            Pattern::Last { weekday: Some(d), .. } => format!("Last(weekday {d})"),
            Pattern::LastWeekday => String::from("LastWeekday"),
            Pattern::NearestWeekday(day) => format!("NearestWeekday({day})"),
            Pattern::Nth { weekday, nth } => format!("Nth(weekday {weekday}, #{nth})"),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

fn english_value(field: Field, value: u32) -> String {
    match field {
        Field::DayOfMonth => format!("the {}", field::ordinal(value)),
        Field::Month => field::month_name(value).map(String::from).unwrap_or_else(|| value.to_string()),
        Field::DayOfWeek => field::day_name(value).map(String::from).unwrap_or_else(|| value.to_string()),
        _ => value.to_string(),
    }
}

fn domain(field: Field, dt: &NaiveDateTime) -> (u32, u32) {
    let (min, max) = field.limits();
    if field == Field::DayOfMonth {
        (min, month_length(dt))
    } else {
        (min, max)
    }
}
