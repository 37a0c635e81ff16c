//! The compiled expression and its interpretation state.

use std::fmt;
use std::str::FromStr;

use chrono::{Months, NaiveDateTime, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::build::build;
use crate::calendar::{self, Zone};
use crate::config::ScheduleOptions;
use crate::error::{CronError, Result};
use crate::field::Field;
use crate::normalize::normalize;
use crate::optimize::optimize;
use crate::pattern::Pattern;

/// Largest accepted fixed offset, in minutes either side of UTC.
pub const MAX_UTC_OFFSET: i32 = 1080;

/// A compiled schedule.
///
/// The seven root patterns are built once in the constructor and never change
/// afterwards. The zone and the search horizon can be replaced through the
/// setters, which take `&mut self` so they cannot race a search on the same
/// instance.
#[derive(Clone, Debug)]
pub struct Expression {
    expression: String,
    nodes: [Pattern; 7],
    zone: Zone,
    begin_epoch: i64,
    end_epoch: Option<i64>,
}

impl Expression {
    /// Compile an expression interpreted in UTC with the default horizon.
    pub fn new(expression: &str) -> Result<Self> {
        Self::with_options(expression, &ScheduleOptions::default())
    }

    pub fn with_options(expression: &str, options: &ScheduleOptions) -> Result<Self> {
        let zone = match (&options.time_zone, options.utc_offset) {
            (Some(_), Some(_)) => return Err(CronError::ConflictingZone),
            (Some(name), None) => Zone::Named(parse_time_zone(name)?),
            (None, Some(minutes)) => Zone::Fixed(check_offset(minutes)?),
            (None, None) => Zone::default(),
        };
        let now = Utc::now();
        let begin_epoch = match options.begin_epoch {
            Some(epoch) => check_begin(epoch)?,
            None => now
                .checked_sub_months(Months::new(120))
                .map_or(0, |dt| dt.timestamp().max(0)),
        };
        let end_epoch = match options.end_epoch {
            Some(epoch) => Some(epoch),
            None => now.checked_add_months(Months::new(120)).map(|dt| dt.timestamp()),
        };

        let tokens = normalize(expression)?;
        let mut nodes: [Pattern; 7] = Default::default();
        for (field, token) in Field::ALL.into_iter().zip(tokens.iter()) {
            nodes[field.index()] = optimize(field, build(field, token)?);
        }
        debug!(expression, zone = %zone.name(), begin_epoch, ?end_epoch, "compiled expression");
        Ok(Self {
            expression: expression.to_string(),
            nodes,
            zone,
            begin_epoch,
            end_epoch,
        })
    }

    /// The expression text as given to the constructor.
    pub fn expression(&self) -> &str {
        &self.expression
    }
    /// Root patterns in [`Field::ALL`] order.
    pub fn nodes(&self) -> &[Pattern; 7] {
        &self.nodes
    }
    pub fn node(&self, field: Field) -> &Pattern {
        &self.nodes[field.index()]
    }
    pub fn zone(&self) -> Zone {
        self.zone
    }
    /// Name of the zone; `UTC` when a fixed offset is in use.
    pub fn time_zone(&self) -> String {
        self.zone.name()
    }
    /// Offset from UTC in minutes, taken at the current instant for named zones.
    pub fn utc_offset(&self) -> i32 {
        self.zone.offset_minutes_at(Utc::now().timestamp())
    }
    pub fn begin_epoch(&self) -> i64 {
        self.begin_epoch
    }
    /// `None` when the search is open-ended up to the end of 2099.
    pub fn end_epoch(&self) -> Option<i64> {
        self.end_epoch
    }

    /// Interpret the schedule in a named zone; clears any fixed offset.
    pub fn set_time_zone(&mut self, name: &str) -> Result<()> {
        self.zone = Zone::Named(parse_time_zone(name)?);
        Ok(())
    }
    /// Interpret the schedule at a fixed offset; resets the zone to UTC.
    pub fn set_utc_offset(&mut self, minutes: i32) -> Result<()> {
        self.zone = Zone::Fixed(check_offset(minutes)?);
        Ok(())
    }
    pub fn set_begin_epoch(&mut self, epoch: i64) -> Result<()> {
        self.begin_epoch = check_begin(epoch)?;
        Ok(())
    }
    pub fn set_end_epoch(&mut self, epoch: Option<i64>) {
        self.end_epoch = epoch;
    }

    /// Do all seven fields accept the wall-clock time `local`?
    pub(crate) fn matches_local(&self, local: &NaiveDateTime) -> bool {
        let year = calendar::component(local, Field::Year);
        Field::Year.contains(year)
            && Field::ALL
                .into_iter()
                .all(|field| self.node(field).matches(calendar::component(local, field), local))
    }

    /// Does the instant `epoch` satisfy the schedule in its zone?
    pub fn matches_epoch(&self, epoch: i64) -> bool {
        self.zone
            .to_local(epoch)
            .is_some_and(|local| self.matches_local(&local))
    }
}

impl FromStr for Expression {
    type Err = CronError;
    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

fn parse_time_zone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| CronError::InvalidTimeZone(name.to_string()))
}

fn check_offset(minutes: i32) -> Result<i32> {
    if (-MAX_UTC_OFFSET..=MAX_UTC_OFFSET).contains(&minutes) {
        Ok(minutes)
    } else {
        Err(CronError::InvalidOffset(minutes))
    }
}

fn check_begin(epoch: i64) -> Result<i64> {
    if epoch < 0 {
        Err(CronError::InvalidHorizon(format!("begin_epoch must be >= 0, got {epoch}")))
    } else {
        Ok(epoch)
    }
}
