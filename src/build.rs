//! Second compilation stage: build a [`Pattern`] from one field token.

// used to recognize the token shapes
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{CronError, Result};
use crate::field::Field;
use crate::pattern::Pattern;

lazy_static! {
    static ref NUMBER: Regex = Regex::new(r"^\d+$").unwrap();
    static ref RANGE: Regex = Regex::new(r"^(\*|\d+)-(\d+)$").unwrap();
    static ref LAST_OFFSET: Regex = Regex::new(r"^L-(\d+)$").unwrap();
    static ref NEAREST: Regex = Regex::new(r"^(\d+)W$").unwrap();
    static ref LAST_OF: Regex = Regex::new(r"^(\d+)L$").unwrap();
    static ref NTH: Regex = Regex::new(r"^(\d+)#(\d+)$").unwrap();
}

/// Build the pattern for `token` as a constraint on `field`.
///
/// Shapes are tried in a fixed order: `*`, `?`, a number, a comma list, a
/// range, a step, then the calendar forms of the two day fields.
pub fn build(field: Field, token: &str) -> Result<Pattern> {
    if token == "*" {
        return Ok(Pattern::Wildcard);
    }
    if token == "?" {
        return match field {
            Field::DayOfMonth | Field::DayOfWeek => Ok(Pattern::Unspecified),
            _ => Err(invalid(field, token)),
        };
    }
    if NUMBER.is_match(token) {
        return Ok(Pattern::Single(value(field, token)?));
    }
    if token.contains(',') {
        let children = token
            .split(',')
            .map(|part| {
                if part.is_empty() {
                    Err(invalid(field, token))
                } else {
                    build(field, part)
                }
            })
            .collect::<Result<Vec<_>>>()?;
        return Ok(Pattern::List(children));
    }
    if let Some(caps) = RANGE.captures(token) {
        let low = if &caps[1] == "*" { field.min() } else { value(field, &caps[1])? };
        let high = value(field, &caps[2])?;
        let wrapped = field == Field::DayOfWeek && low > high;
        return Ok(Pattern::Range { low, high, wrapped });
    }
    if let Some((base, step)) = token.split_once('/') {
        let interval = match step.parse::<u32>() {
            Ok(n) if n > 0 && NUMBER.is_match(step) => n,
            _ => {
                return Err(CronError::InvalidStep { field, step: step.to_string() });
            }
        };
        let base = build(field, base)?;
        return match base {
            Pattern::Wildcard | Pattern::Single(_) | Pattern::Range { wrapped: false, .. } => {
                Ok(Pattern::Step { base: Box::new(base), step: interval })
            }
            _ => Err(CronError::UnsupportedStep { field, token: token.to_string() }),
        };
    }
    match field {
        Field::DayOfMonth => day_of_month(token),
        Field::DayOfWeek => day_of_week(token),
        _ => Err(invalid(field, token)),
    }
}

fn day_of_month(token: &str) -> Result<Pattern> {
    let field = Field::DayOfMonth;
    if token == "L" {
        return Ok(Pattern::Last { offset: 0, weekday: None });
    }
    if token == "LW" {
        return Ok(Pattern::LastWeekday);
    }
    if let Some(caps) = NEAREST.captures(token) {
        return Ok(Pattern::NearestWeekday(value(field, &caps[1])?));
    }
    if let Some(caps) = LAST_OFFSET.captures(token) {
        let offset = bounded(field, &caps[1], 0, field.max() - 1)?;
        return Ok(Pattern::Last { offset, weekday: None });
    }
    Err(invalid(field, token))
}

fn day_of_week(token: &str) -> Result<Pattern> {
    let field = Field::DayOfWeek;
    if token == "L" {
        return Ok(Pattern::Last { offset: 0, weekday: Some(7) });
    }
    if let Some(caps) = LAST_OF.captures(token) {
        let weekday = bounded(field, &caps[1], 1, 7)?;
        return Ok(Pattern::Last { offset: 0, weekday: Some(weekday) });
    }
    if let Some(caps) = NTH.captures(token) {
        let weekday = bounded(field, &caps[1], 1, 7)?;
        let nth = bounded(field, &caps[2], 1, 5)?;
        return Ok(Pattern::Nth { weekday, nth });
    }
    Err(invalid(field, token))
}

/// Parse a field value, mapping a day of week 0 to Sunday, and check it
/// against the field's domain.
fn value(field: Field, digits: &str) -> Result<u32> {
    let (min, max) = field.limits();
    let n = digits.parse::<u32>().map_err(|_| out_of_range(field, digits, min, max))?;
    let n = if field == Field::DayOfWeek && n == 0 { 7 } else { n };
    if n < min || n > max {
        return Err(out_of_range(field, digits, min, max));
    }
    Ok(n)
}

fn bounded(field: Field, digits: &str, min: u32, max: u32) -> Result<u32> {
    match digits.parse::<u32>() {
        Ok(n) if n >= min && n <= max => Ok(n),
        _ => Err(out_of_range(field, digits, min, max)),
    }
}

fn out_of_range(field: Field, digits: &str, min: u32, max: u32) -> CronError {
    CronError::OutOfRange { field, value: digits.to_string(), min, max }
}

fn invalid(field: Field, token: &str) -> CronError {
    CronError::InvalidToken { field, token: token.to_string() }
}
