//! Pay-cycle windows: half-open `[start, end)` date ranges of one period each.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{domain::PayCycle, errors::CycleError};

/// Direction used when paging between neighbouring windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    Forward,
    Backward,
}

/// A single pay-cycle window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CycleWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub period_days: u32,
}

impl CycleWindow {
    pub fn new(start: NaiveDate, period_days: u32) -> Result<Self, CycleError> {
        let end = window_end(start, period_days)?;
        Ok(Self {
            start,
            end,
            period_days,
        })
    }

    /// Builds the window of the schedule that contains `today`.
    pub fn aligned(
        anchor: NaiveDate,
        period_days: u32,
        today: NaiveDate,
    ) -> Result<Self, CycleError> {
        Self::new(align_to_today(anchor, period_days, today)?, period_days)
    }

    pub fn for_cycle(cycle: &PayCycle, today: NaiveDate) -> Result<Self, CycleError> {
        let period = cycle.checked_period()?;
        Self::aligned(cycle.start_date, period, today)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    pub fn shifted(&self, direction: ShiftDirection) -> Result<Self, CycleError> {
        Self::new(shift(self.start, self.period_days, direction)?, self.period_days)
    }

    pub fn next(&self) -> Result<Self, CycleError> {
        self.shifted(ShiftDirection::Forward)
    }

    pub fn previous(&self) -> Result<Self, CycleError> {
        self.shifted(ShiftDirection::Backward)
    }
}

/// Returns the latest `anchor + k * period_days` (k may be negative) that is on or
/// before `today`, so the window starting there always contains `today`.
pub fn align_to_today(
    anchor: NaiveDate,
    period_days: u32,
    today: NaiveDate,
) -> Result<NaiveDate, CycleError> {
    let period = i64::from(ensure_period(period_days)?);
    let steps = (today - anchor).num_days().div_euclid(period);
    offset_days(anchor, steps * period)
}

/// End of the window starting at `start` (exclusive).
pub fn window_end(start: NaiveDate, period_days: u32) -> Result<NaiveDate, CycleError> {
    let period = ensure_period(period_days)?;
    offset_days(start, i64::from(period))
}

/// Moves a window start by one whole period.
pub fn shift(
    start: NaiveDate,
    period_days: u32,
    direction: ShiftDirection,
) -> Result<NaiveDate, CycleError> {
    let period = i64::from(ensure_period(period_days)?);
    match direction {
        ShiftDirection::Forward => offset_days(start, period),
        ShiftDirection::Backward => offset_days(start, -period),
    }
}

pub(crate) fn ensure_period(period_days: u32) -> Result<u32, CycleError> {
    if period_days == 0 {
        return Err(CycleError::InvalidRule(
            "period must be at least one day".into(),
        ));
    }
    Ok(period_days)
}

pub(crate) fn offset_days(date: NaiveDate, days: i64) -> Result<NaiveDate, CycleError> {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.ok_or(CycleError::DateOutOfRange { date, days })
}
