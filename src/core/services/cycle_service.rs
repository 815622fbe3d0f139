//! Entry points the presentation layer calls to build a pay-cycle view.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    core::{
        aggregation::{aggregate, Occurrence, SkippedBill},
        window::{self, CycleWindow, ShiftDirection},
        CycleTotals,
    },
    domain::{Bill, BillCategory, PayCycle},
    errors::CycleError,
};

/// Result of computing one pay-cycle window.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CycleReport {
    pub cycle_id: Uuid,
    pub cycle_name: String,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub today: NaiveDate,
    pub occurrences: Vec<Occurrence>,
    pub totals: CycleTotals,
    pub category_totals: BTreeMap<BillCategory, f64>,
    pub skipped: Vec<SkippedBill>,
}

impl CycleReport {
    pub fn window(&self) -> Result<CycleWindow, CycleError> {
        let period = (self.window_end - self.window_start).num_days();
        CycleWindow::new(self.window_start, period as u32)
    }

    pub fn total(&self) -> f64 {
        self.totals.total
    }

    pub fn past_total(&self) -> f64 {
        self.totals.past_total
    }

    pub fn upcoming_total(&self) -> f64 {
        self.totals.upcoming_total
    }
}

pub struct CycleService;

impl CycleService {
    /// Computes the window containing `today` for `cycle` and everything due in it.
    pub fn compute_cycle(
        cycle: &PayCycle,
        bills: &[Bill],
        today: NaiveDate,
    ) -> Result<CycleReport, CycleError> {
        let window = CycleWindow::for_cycle(cycle, today)?;
        Ok(Self::compute_window(cycle, window, bills, today))
    }

    /// Computes an explicit window of `cycle`, typically one reached by shifting.
    pub fn compute_cycle_at(
        cycle: &PayCycle,
        window_start: NaiveDate,
        bills: &[Bill],
        today: NaiveDate,
    ) -> Result<CycleReport, CycleError> {
        let window = CycleWindow::new(window_start, cycle.checked_period()?)?;
        Ok(Self::compute_window(cycle, window, bills, today))
    }

    /// Moves a window start by one period in `direction`.
    pub fn shift_window(
        current_start: NaiveDate,
        period_days: u32,
        direction: ShiftDirection,
    ) -> Result<NaiveDate, CycleError> {
        window::shift(current_start, period_days, direction)
    }

    fn compute_window(
        cycle: &PayCycle,
        window: CycleWindow,
        bills: &[Bill],
        today: NaiveDate,
    ) -> CycleReport {
        let aggregation = aggregate(bills, &window, today);
        tracing::debug!(
            cycle = %cycle.name,
            start = %window.start,
            end = %window.end,
            occurrences = aggregation.occurrences.len(),
            "computed pay cycle window"
        );
        CycleReport {
            cycle_id: cycle.id,
            cycle_name: cycle.name.clone(),
            window_start: window.start,
            window_end: window.end,
            today,
            occurrences: aggregation.occurrences,
            totals: aggregation.totals,
            category_totals: aggregation.category_totals,
            skipped: aggregation.skipped,
        }
    }
}
