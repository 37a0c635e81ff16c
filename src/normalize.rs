//! First compilation stage: turn raw expression text into seven field tokens.

// used so regular expressions don't have to be recompiled
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use tracing::debug;

// our own stuff that we need
use crate::error::{CronError, Result};
use crate::field::{self, Field};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    // full names first so that leftmost-first matching prefers them
    static ref MONTH_NAMES: Regex = Regex::new(
        r"\b(JANUARY|FEBRUARY|MARCH|APRIL|JUNE|JULY|AUGUST|SEPTEMBER|OCTOBER|NOVEMBER|DECEMBER|JAN|FEB|MAR|APR|MAY|JUN|JUL|AUG|SEP|OCT|NOV|DEC)\b"
    ).unwrap();
    // a trailing L ("FRIL") keeps its meaning of "last Friday"
    static ref DAY_NAMES: Regex = Regex::new(
        r"\b(MONDAY|TUESDAY|WEDNESDAY|THURSDAY|FRIDAY|SATURDAY|SUNDAY|MON|TUE|WED|THU|FRI|SAT|SUN)(L?)\b"
    ).unwrap();
}

/// Normalize an expression into one token per field, in [`Field::ALL`] order.
///
/// Applies, in order: case and whitespace folding, alias expansion, padding of
/// 5 and 6 field forms, month and weekday name substitution within their own
/// fields, and the day of month / day of week reconciliation.
pub fn normalize(expression: &str) -> Result<[String; 7]> {
    let folded = WHITESPACE
        .replace_all(expression.trim(), " ")
        .to_uppercase();
    let expanded = field::alias(&folded).map(String::from).unwrap_or(folded);

    let mut tokens: Vec<String> = expanded.split(' ').map(String::from).collect();
    match tokens.len() {
        5 => {
            tokens.insert(0, String::from("0"));
            tokens.push(String::from("*"));
        }
        6 => tokens.push(String::from("*")),
        7 => (),
        n => return Err(CronError::FieldCount(n)),
    }
    let mut fields: [String; 7] = tokens
        .try_into()
        .map_err(|rest: Vec<String>| CronError::FieldCount(rest.len()))?;

    let month = Field::Month.index();
    let dow = Field::DayOfWeek.index();
    let dom = Field::DayOfMonth.index();
    fields[month] = MONTH_NAMES
        .replace_all(&fields[month], |caps: &Captures| {
            field::month_number(&caps[1]).map_or_else(|| caps[0].to_string(), |n| n.to_string())
        })
        .into_owned();
    fields[dow] = DAY_NAMES
        .replace_all(&fields[dow], |caps: &Captures| {
            field::weekday_number(&caps[1])
                .map_or_else(|| caps[0].to_string(), |n| format!("{}{}", n, &caps[2]))
        })
        .into_owned();

    if fields[dom] != "?" && fields[dow] == "*" {
        fields[dow] = String::from("?");
    }
    if fields[dom] == "*" && fields[dow] != "?" {
        fields[dom] = String::from("?");
    }
    if fields[dom] == "?" && fields[dow] == "?" {
        return Err(CronError::BothUnspecified);
    }

    debug!(expression, normalized = %fields.join(" "), "normalized expression");
    Ok(fields)
}
