//! Navigation state for browsing a user's pay cycles window by window.

use chrono::NaiveDate;
use uuid::Uuid;

use super::{
    services::{CycleReport, CycleService},
    window::{CycleWindow, ShiftDirection},
};
use crate::{
    domain::{Bill, Identifiable, NamedEntity, PayCycle},
    errors::CycleError,
};

/// Holds the selected cycle and the window being viewed.
///
/// The tracker never reads the clock or the store itself: callers pass `today` and the
/// bill snapshot every time they ask for a report.
#[derive(Debug, Clone, Default)]
pub struct CycleTracker {
    cycles: Vec<PayCycle>,
    selected: Option<Uuid>,
    window: Option<CycleWindow>,
}

impl CycleTracker {
    /// Creates a tracker and selects the first cycle, if any.
    pub fn new(cycles: Vec<PayCycle>, today: NaiveDate) -> Result<Self, CycleError> {
        let mut tracker = Self {
            cycles,
            selected: None,
            window: None,
        };
        tracker.select_default(today)?;
        Ok(tracker)
    }

    pub fn cycles(&self) -> &[PayCycle] {
        &self.cycles
    }

    pub fn selected_cycle(&self) -> Option<&PayCycle> {
        let id = self.selected?;
        self.cycles.iter().find(|cycle| cycle.id() == id)
    }

    pub fn current_window(&self) -> Option<CycleWindow> {
        self.window
    }

    /// Selects a cycle and aligns its window to `today`.
    pub fn select(&mut self, cycle_id: Uuid, today: NaiveDate) -> Result<CycleWindow, CycleError> {
        let cycle = self
            .cycles
            .iter()
            .find(|cycle| cycle.id() == cycle_id)
            .ok_or_else(|| CycleError::CycleNotFound(cycle_id.to_string()))?;
        let window = CycleWindow::for_cycle(cycle, today)?;
        tracing::debug!(cycle = %cycle.name(), start = %window.start, "selected pay cycle");
        self.selected = Some(cycle_id);
        self.window = Some(window);
        Ok(window)
    }

    /// Selects a cycle by case-insensitive name.
    pub fn select_by_name(
        &mut self,
        name: &str,
        today: NaiveDate,
    ) -> Result<CycleWindow, CycleError> {
        let id = self
            .cycles
            .iter()
            .find(|cycle| cycle.name().eq_ignore_ascii_case(name.trim()))
            .map(Identifiable::id)
            .ok_or_else(|| CycleError::CycleNotFound(name.to_string()))?;
        self.select(id, today)
    }

    /// Selects the first cycle with a usable period. Cycles that cannot be aligned stay
    /// listed and only fail when picked explicitly.
    fn select_default(&mut self, today: NaiveDate) -> Result<Option<CycleWindow>, CycleError> {
        self.selected = None;
        self.window = None;
        let candidates: Vec<Uuid> = self
            .cycles
            .iter()
            .filter(|cycle| match cycle.checked_period() {
                Ok(_) => true,
                Err(err) => {
                    tracing::warn!(cycle = %cycle.name(), error = %err, "skipping pay cycle");
                    false
                }
            })
            .map(Identifiable::id)
            .collect();
        match candidates.first() {
            Some(id) => self.select(*id, today).map(Some),
            None => Ok(None),
        }
    }

    /// Replaces the cycle list after a reload. The current selection and window are
    /// kept when the cycle still exists with the same schedule.
    pub fn replace_cycles(
        &mut self,
        cycles: Vec<PayCycle>,
        today: NaiveDate,
    ) -> Result<(), CycleError> {
        let previous = self.selected_cycle().cloned();
        self.cycles = cycles;
        let Some(old) = previous else {
            return self.select_default(today).map(|_| ());
        };
        let unchanged = self.cycles.iter().any(|cycle| {
            cycle.id() == old.id()
                && cycle.start_date == old.start_date
                && cycle.period_days == old.period_days
        });
        if unchanged {
            return Ok(());
        }
        if self.cycles.iter().any(|cycle| cycle.id() == old.id()) {
            if let Err(err) = self.select(old.id(), today) {
                tracing::warn!(
                    cycle = %old.name(),
                    error = %err,
                    "selected pay cycle became unusable"
                );
                return self.select_default(today).map(|_| ());
            }
            Ok(())
        } else {
            self.select_default(today).map(|_| ())
        }
    }

    pub fn shift(&mut self, direction: ShiftDirection) -> Result<CycleWindow, CycleError> {
        let window = self.window.ok_or(CycleError::NoCycleSelected)?;
        let shifted = window.shifted(direction)?;
        self.window = Some(shifted);
        Ok(shifted)
    }

    pub fn next(&mut self) -> Result<CycleWindow, CycleError> {
        self.shift(ShiftDirection::Forward)
    }

    pub fn previous(&mut self) -> Result<CycleWindow, CycleError> {
        self.shift(ShiftDirection::Backward)
    }

    /// Re-aligns the selected cycle's window to `today`.
    pub fn reset(&mut self, today: NaiveDate) -> Result<CycleWindow, CycleError> {
        let id = self.selected.ok_or(CycleError::NoCycleSelected)?;
        self.select(id, today)
    }

    /// Computes the viewed window against a bill snapshot.
    pub fn report(&self, bills: &[Bill], today: NaiveDate) -> Result<CycleReport, CycleError> {
        let cycle = self.selected_cycle().ok_or(CycleError::NoCycleSelected)?;
        let window = self.window.ok_or(CycleError::NoCycleSelected)?;
        CycleService::compute_cycle_at(cycle, window.start, bills, today)
    }
}
