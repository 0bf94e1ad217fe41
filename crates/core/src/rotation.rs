//! # Rotation Policy
//!
//! Turns calendar dates into concrete standby windows.
//!
//! The weekly rotation hands over on a fixed weekday (Friday by default): the
//! incoming person starts at the end of the working day (16:00) and the window
//! closes at the start of the working day (07:00) seven days later. A daily
//! override runs from 16:00 on the chosen day to 07:00 the next morning.
//!
//! All wall-clock times are interpreted in the policy's time zone and converted
//! to UTC instants, so a window that crosses a DST change keeps its local
//! handover times.

use chrono::{
    DateTime, Datelike, Days, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc, Weekday,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::{StandbyError, StandbyResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationPolicy {
    pub timezone: Tz,
    pub handover_day: Weekday,
    pub shift_start: NaiveTime,
    pub shift_end: NaiveTime,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::America::Toronto,
            handover_day: Weekday::Fri,
            shift_start: NaiveTime::from_hms_opt(16, 0, 0).unwrap_or_default(),
            shift_end: NaiveTime::from_hms_opt(7, 0, 0).unwrap_or_default(),
        }
    }
}

impl RotationPolicy {
    /// Same handover rules, evaluated in another time zone.
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Walks `date` back to the closest handover day, `date` itself included.
    pub fn week_start(&self, date: NaiveDate) -> StandbyResult<NaiveDate> {
        let current = date.weekday().num_days_from_monday();
        let target = self.handover_day.num_days_from_monday();
        let back = (current + 7 - target) % 7;
        date.checked_sub_days(Days::new(u64::from(back))).ok_or_else(|| out_of_range(date))
    }

    /// Bounds of the weekly window containing `any_date_in_week`.
    pub fn weekly_bounds(
        &self,
        any_date_in_week: NaiveDate,
    ) -> StandbyResult<(DateTime<Utc>, DateTime<Utc>)> {
        let first_day = self.week_start(any_date_in_week)?;
        let start = self.localize(first_day, self.shift_start)?;
        let end = self.localize(days_after(first_day, 7)?, self.shift_end)?;
        Self::ordered(start, end)
    }

    /// Bounds of the overnight window starting on `date`.
    pub fn daily_bounds(&self, date: NaiveDate) -> StandbyResult<(DateTime<Utc>, DateTime<Utc>)> {
        let start = self.localize(date, self.shift_start)?;
        let end = self.localize(days_after(date, 1)?, self.shift_end)?;
        Self::ordered(start, end)
    }

    /// Resolves a local wall-clock time to a UTC instant.
    ///
    /// Ambiguous times (the repeated hour when clocks fall back) resolve to the
    /// earlier instant. Times skipped by a spring-forward are rejected.
    pub fn localize(&self, date: NaiveDate, time: NaiveTime) -> StandbyResult<DateTime<Utc>> {
        let local = date.and_time(time);
        // UTC offsets stay under a day, so a day of margin keeps the conversion in range.
        if local.checked_sub_days(Days::new(1)).is_none()
            || local.checked_add_days(Days::new(1)).is_none()
        {
            return Err(out_of_range(date));
        }
        match self.timezone.from_local_datetime(&local) {
            LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
            LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
            LocalResult::None => Err(StandbyError::Validation(format!(
                "{} {} does not exist in time zone {}",
                date, time, self.timezone
            ))),
        }
    }

    fn ordered(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StandbyResult<(DateTime<Utc>, DateTime<Utc>)> {
        if start < end {
            Ok((start, end))
        } else {
            Err(StandbyError::Validation(format!(
                "window start {} must be before end {}",
                start, end
            )))
        }
    }
}

fn days_after(date: NaiveDate, days: u64) -> StandbyResult<NaiveDate> {
    date.checked_add_days(Days::new(days)).ok_or_else(|| out_of_range(date))
}

fn out_of_range(date: NaiveDate) -> StandbyError {
    StandbyError::Validation(format!("{} is outside the supported calendar range", date))
}
