//! Finding the next and previous instants that satisfy an expression.
//!
//! The search runs on wall-clock time in the expression's zone. The second,
//! minute and hour fields are stepped first, each exhausted field carrying
//! into the next coarser unit; when that fails to land on a match inside the
//! current day the search continues one day at a time until the horizon.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use tracing::{debug, trace};

use crate::calendar;
use crate::expression::Expression;
use crate::field::Field;

const SUB_DAY: [Field; 3] = [Field::Second, Field::Minute, Field::Hour];

/// The unit a sub-day field carries into when it is exhausted.
fn coarser(field: Field) -> Field {
    match field {
        Field::Second => Field::Minute,
        Field::Minute => Field::Hour,
        _ => Field::DayOfMonth,
    }
}

fn ceiling() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2099, 12, 31)?.and_hms_opt(23, 59, 59)
}

fn floor() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1970, 1, 1)?.and_hms_opt(0, 0, 0)
}

impl Expression {
    /// The first instant strictly after `from` (default: now) that satisfies
    /// the expression, in epoch seconds.
    pub fn next(&self, from: Option<i64>) -> Option<i64> {
        let from = from.unwrap_or_else(|| Utc::now().timestamp());
        let zone = self.zone();
        let found = self.scan_forward(&zone.to_local(from)?, from);
        // inside a fold the other reading revisits the repeated wall times
        match zone.fold_reading(from).and_then(|local| self.scan_forward(&local, from)) {
            Some(other) => Some(found.map_or(other, |epoch| epoch.min(other))),
            None => found,
        }
    }

    /// The last instant strictly before `from` (default: now) that satisfies
    /// the expression, in epoch seconds.
    pub fn previous(&self, from: Option<i64>) -> Option<i64> {
        let from = from.unwrap_or_else(|| Utc::now().timestamp());
        let zone = self.zone();
        let found = self.scan_backward(&zone.to_local(from)?, from);
        match zone.fold_reading(from).and_then(|local| self.scan_backward(&local, from)) {
            Some(other) => Some(found.map_or(other, |epoch| epoch.max(other))),
            None => found,
        }
    }

    fn scan_forward(&self, start: &NaiveDateTime, from: i64) -> Option<i64> {
        let mut dt = calendar::plus_one(start, Field::Second)?;

        for field in SUB_DAY {
            let node = self.node(field);
            let low = node.lowest(field, &dt)?;
            let high = node.highest(field, &dt)?;
            let current = calendar::component(&dt, field);
            if current <= high {
                for candidate in current..=high {
                    let test = calendar::with_component(&dt, field, candidate)?;
                    if let Some(epoch) = self.accept_after(&test, from) {
                        return Some(epoch);
                    }
                }
            }
            dt = calendar::plus_one(&calendar::with_component(&dt, field, low)?, coarser(field))?;
        }

        let year = self.node(Field::Year);
        let (low, high) = (year.lowest(Field::Year, &dt)?, year.highest(Field::Year, &dt)?);
        let current = calendar::component(&dt, Field::Year);
        if current > high {
            debug!(expression = self.expression(), "no year left to search");
            return None;
        }
        if current < low {
            dt = calendar::with_date(&dt, i32::try_from(low).ok()?, 1, 1)?;
        }

        let mut limit = ceiling()?;
        if let Some(end) = self.end_epoch().and_then(|end| self.zone().to_local(end)) {
            limit = limit.min(end);
        }
        trace!(start = %dt, %limit, "scanning forward by day");
        while dt <= limit {
            if let Some(epoch) = self.accept_after(&dt, from) {
                return Some(epoch);
            }
            dt = calendar::plus_one(&dt, Field::DayOfMonth)?;
        }
        debug!(expression = self.expression(), from, "no next occurrence within horizon");
        None
    }

    fn scan_backward(&self, start: &NaiveDateTime, from: i64) -> Option<i64> {
        let mut dt = calendar::minus_one(start, Field::Second)?;

        for field in SUB_DAY {
            let node = self.node(field);
            let low = node.lowest(field, &dt)?;
            let high = node.highest(field, &dt)?;
            let current = calendar::component(&dt, field);
            if current >= low {
                for candidate in (low..=current).rev() {
                    let test = calendar::with_component(&dt, field, candidate)?;
                    if let Some(epoch) = self.accept_before(&test, from) {
                        return Some(epoch);
                    }
                }
            }
            dt = calendar::minus_one(&calendar::with_component(&dt, field, high)?, coarser(field))?;
        }

        let year = self.node(Field::Year);
        let (low, high) = (year.lowest(Field::Year, &dt)?, year.highest(Field::Year, &dt)?);
        let current = calendar::component(&dt, Field::Year);
        if current < low {
            debug!(expression = self.expression(), "no year left to search");
            return None;
        }
        if current > high {
            dt = calendar::with_date(&dt, i32::try_from(high).ok()?, 12, 31)?;
        }

        let mut limit = floor()?;
        if let Some(begin) = self.zone().to_local(self.begin_epoch()) {
            limit = limit.max(begin);
        }
        trace!(start = %dt, %limit, "scanning backward by day");
        while dt >= limit {
            if let Some(epoch) = self.accept_before(&dt, from) {
                return Some(epoch);
            }
            dt = calendar::minus_one(&dt, Field::DayOfMonth)?;
        }
        debug!(expression = self.expression(), from, "no previous occurrence within horizon");
        None
    }

    /// Successive occurrences after `from` (default: now), in ascending order.
    pub fn occurrences(&self, from: Option<i64>) -> Occurrences<'_> {
        Occurrences {
            expression: self,
            cursor: Some(from.unwrap_or_else(|| Utc::now().timestamp())),
        }
    }

    // The earliest instant `local` denotes that lies after `from`, provided
    // all fields match.
    fn accept_after(&self, local: &NaiveDateTime, from: i64) -> Option<i64> {
        if !self.matches_local(local) {
            return None;
        }
        self.zone().to_epochs(local).into_iter().find(|epoch| *epoch > from)
    }

    fn accept_before(&self, local: &NaiveDateTime, from: i64) -> Option<i64> {
        if !self.matches_local(local) {
            return None;
        }
        self.zone().to_epochs(local).into_iter().rev().find(|epoch| *epoch < from)
    }
}

/// Iterator over the occurrences of an expression, see [`Expression::occurrences`].
pub struct Occurrences<'a> {
    expression: &'a Expression,
    cursor: Option<i64>,
}

impl Iterator for Occurrences<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let next = self.expression.next(Some(self.cursor?));
        self.cursor = next;
        next
    }
}
