//! Expands a bill's fixed-interval schedule into the dates that land in a window.

use chrono::{Days, NaiveDate};

use super::window::{ensure_period, offset_days};
use crate::errors::CycleError;

/// Returns every due date in `[window_start, window_end)`, ascending.
///
/// Stepping starts at `anchor_due` and only moves forward: an anchor after the window
/// yields nothing for that window. The result is empty when the period is longer than
/// the window and no step lands inside it.
pub fn project(
    anchor_due: NaiveDate,
    period_days: u32,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Result<Vec<NaiveDate>, CycleError> {
    let period = ensure_period(period_days)?;
    let mut dates = Vec::new();
    if window_end <= window_start {
        return Ok(dates);
    }

    let mut due = first_on_or_after(anchor_due, period, window_start)?;
    while due < window_end {
        dates.push(due);
        match due.checked_add_days(Days::new(u64::from(period))) {
            Some(next) => due = next,
            None => break,
        }
    }
    Ok(dates)
}

/// Number of occurrences `project` would return, without allocating.
pub fn occurrence_count(
    anchor_due: NaiveDate,
    period_days: u32,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Result<usize, CycleError> {
    let period = i64::from(ensure_period(period_days)?);
    if window_end <= window_start {
        return Ok(0);
    }
    let first = first_on_or_after(anchor_due, period_days, window_start)?;
    if first >= window_end {
        return Ok(0);
    }
    let span = (window_end - first).num_days();
    Ok(((span + period - 1) / period) as usize)
}

/// Advances `anchor` by whole periods until it is no earlier than `floor`.
fn first_on_or_after(
    anchor: NaiveDate,
    period_days: u32,
    floor: NaiveDate,
) -> Result<NaiveDate, CycleError> {
    if anchor >= floor {
        return Ok(anchor);
    }
    let period = i64::from(period_days);
    let gap = (floor - anchor).num_days();
    let steps = (gap + period - 1) / period;
    offset_days(anchor, steps * period)
}
