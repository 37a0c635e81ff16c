//! Cronkit – cron expressions compiled into pattern trees.
//!
//! An [`Expression`] is built from a 5, 6 or 7 field cron string (or a preset
//! such as `@hourly`) in three stages:
//! * [`normalize`] folds whitespace, expands presets, pads the field count and
//!   substitutes month and weekday names.
//! * [`build`] turns each field token into a [`Pattern`].
//! * [`optimize`] canonicalizes the result (contiguous lists become ranges,
//!   degenerate steps collapse, Sunday is always 7).
//!
//! A compiled expression answers three kinds of questions:
//! * the next and previous matching instants relative to a reference time
//!   ([`Expression::next`], [`Expression::previous`]), interpreted in UTC, a
//!   fixed offset or an IANA zone;
//! * an English description ([`Expression::describe`]);
//! * canonical renderings ([`Expression::as_string`],
//!   [`Expression::as_quartz_string`], [`Expression::dump_tree`]).
//!
//! ## Fields
//! `second minute hour day-of-month month day-of-week year`, where a 5 field
//! expression gets second `0` prepended and a 6 field expression gets year `*`
//! appended. Day of week runs 1 = Monday .. 7 = Sunday, with 0 accepted as
//! Sunday. Day of month additionally supports `L`, `L-k`, `LW` and `NW`; day
//! of week supports `L`, `DL` and `D#N`.
//!
//! ## Quick Start
//! ```
//! use cronkit::Expression;
//! let expression = Expression::new("0 0 0 L * ? *").unwrap();
//! assert_eq!(expression.describe(), "midnight on the last day of every month");
//! // 2024-01-15T00:00:00Z -> 2024-01-31T00:00:00Z
//! assert_eq!(expression.next(Some(1_705_276_800)), Some(1_706_659_200));
//! ```
//!
//! ## Options
//! [`ScheduleOptions`] carries the zone and the search horizon. It can be
//! built in code or loaded from `cronkit.toml` and `CRONKIT_*` environment
//! variables, see [`config`].

pub mod build;
pub mod calendar;
pub mod config;
pub mod describe;
pub mod error;
pub mod expression;
pub mod field;
pub mod normalize;
pub mod optimize;
pub mod pattern;
pub mod search;

pub use calendar::Zone;
pub use config::ScheduleOptions;
pub use error::{CronError, Result};
pub use expression::Expression;
pub use field::Field;
pub use pattern::Pattern;
pub use search::Occurrences;
