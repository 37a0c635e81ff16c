//! Construction options and their loading from files and the environment.
//!
//! Options can be built in code or layered from an optional TOML file followed
//! by `CRONKIT_*` environment variables (`CRONKIT_TIME_ZONE`,
//! `CRONKIT_UTC_OFFSET`, `CRONKIT_BEGIN_EPOCH`, `CRONKIT_END_EPOCH`).

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "cronkit.toml";
pub const ENV_PREFIX: &str = "CRONKIT";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleOptions {
    /// IANA zone name such as `Europe/London`; excludes `utc_offset`.
    pub time_zone: Option<String>,
    /// Fixed offset from UTC in minutes; excludes `time_zone`.
    pub utc_offset: Option<i32>,
    /// Lower bound of the fallback search, epoch seconds (default: 10 years ago).
    pub begin_epoch: Option<i64>,
    /// Upper bound of the fallback search, epoch seconds (default: 10 years ahead).
    pub end_epoch: Option<i64>,
}

impl ScheduleOptions {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = Some(time_zone.into());
        self
    }
    pub fn utc_offset(mut self, minutes: i32) -> Self {
        self.utc_offset = Some(minutes);
        self
    }
    pub fn begin_epoch(mut self, epoch: i64) -> Self {
        self.begin_epoch = Some(epoch);
        self
    }
    pub fn end_epoch(mut self, epoch: i64) -> Self {
        self.end_epoch = Some(epoch);
        self
    }

    /// Load options from `path` (or [`DEFAULT_CONFIG_FILE`] if it exists) and
    /// the environment, the latter taking precedence.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        builder = match path {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => builder.add_source(
                config::File::with_name(DEFAULT_CONFIG_FILE)
                    .format(config::FileFormat::Toml)
                    .required(false),
            ),
        };
        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;
        let options: ScheduleOptions = settings.try_deserialize()?;
        debug!(?options, "loaded schedule options");
        Ok(options)
    }

    /// Options from a TOML document.
    pub fn from_toml(source: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Fill the unset options of `self` from `fallback`.
    pub fn or(self, fallback: ScheduleOptions) -> Self {
        // a zone given here excludes an offset from the fallback and vice versa
        let (time_zone, utc_offset) = if self.time_zone.is_some() || self.utc_offset.is_some() {
            (self.time_zone, self.utc_offset)
        } else {
            (fallback.time_zone, fallback.utc_offset)
        };
        Self {
            time_zone,
            utc_offset,
            begin_epoch: self.begin_epoch.or(fallback.begin_epoch),
            end_epoch: self.end_epoch.or(fallback.end_epoch),
        }
    }
}
