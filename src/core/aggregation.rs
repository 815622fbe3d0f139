//! Merges per-bill projections for one window and totals them against `today`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use super::{projection::project, window::CycleWindow};
use crate::{
    domain::{Amounted, Bill, BillCategory, Displayable, RecurrenceRule, StyleToken},
    errors::CycleError,
};

/// Whether an occurrence's due date is already behind `today`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum OccurrenceStatus {
    Past,
    Upcoming,
}

impl OccurrenceStatus {
    pub fn classify(due_date: NaiveDate, today: NaiveDate) -> Self {
        if due_date < today {
            OccurrenceStatus::Past
        } else {
            OccurrenceStatus::Upcoming
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OccurrenceStatus::Past => "Past due",
            OccurrenceStatus::Upcoming => "Upcoming",
        }
    }

    pub fn style_token(self) -> StyleToken {
        match self {
            OccurrenceStatus::Past => StyleToken::Red,
            OccurrenceStatus::Upcoming => StyleToken::Emerald,
        }
    }
}

/// One concrete due date of a bill inside a window.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Occurrence {
    pub bill_id: Uuid,
    pub bill_name: String,
    pub amount: f64,
    pub category: BillCategory,
    pub recurrence: RecurrenceRule,
    pub due_date: NaiveDate,
    pub is_past: bool,
}

impl Occurrence {
    fn from_bill(bill: &Bill, due_date: NaiveDate, today: NaiveDate) -> Self {
        Self {
            bill_id: bill.id,
            bill_name: bill.name.clone(),
            amount: bill.amount(),
            category: bill.category,
            recurrence: bill.recurrence,
            due_date,
            is_past: OccurrenceStatus::classify(due_date, today) == OccurrenceStatus::Past,
        }
    }

    pub fn status(&self) -> OccurrenceStatus {
        if self.is_past {
            OccurrenceStatus::Past
        } else {
            OccurrenceStatus::Upcoming
        }
    }
}

impl Amounted for Occurrence {
    fn amount(&self) -> f64 {
        self.amount
    }
}

/// Amount totals for a window. `upcoming_total` is always `total - past_total`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CycleTotals {
    pub total: f64,
    pub past_total: f64,
    pub upcoming_total: f64,
    pub past_count: usize,
    pub upcoming_count: usize,
}

impl CycleTotals {
    fn from_occurrences(occurrences: &[Occurrence]) -> Self {
        let mut totals = CycleTotals::default();
        for occurrence in occurrences {
            totals.total += occurrence.amount();
            if occurrence.is_past {
                totals.past_total += occurrence.amount();
                totals.past_count += 1;
            } else {
                totals.upcoming_count += 1;
            }
        }
        totals.upcoming_total = totals.total - totals.past_total;
        totals
    }
}

/// A bill left out of a window because its schedule could not be projected.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SkippedBill {
    pub bill_id: Uuid,
    pub bill_name: String,
    pub reason: String,
}

/// Everything due in one window, in due-date order.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Aggregation {
    pub occurrences: Vec<Occurrence>,
    pub totals: CycleTotals,
    pub category_totals: BTreeMap<BillCategory, f64>,
    pub skipped: Vec<SkippedBill>,
}

impl Aggregation {
    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }
}

/// Projects every recurring bill into `window` and totals the result.
///
/// One-off bills are ignored. A bill whose rule cannot be projected is recorded in
/// `skipped` and the rest of the set is still aggregated. Occurrences sharing a due date
/// keep the order of `bills`.
pub fn aggregate(bills: &[Bill], window: &CycleWindow, today: NaiveDate) -> Aggregation {
    let mut occurrences = Vec::new();
    let mut skipped = Vec::new();

    for bill in bills.iter().filter(|bill| bill.is_recurring) {
        match project_bill(bill, window) {
            Ok(dates) => {
                tracing::debug!(
                    bill = %bill.name,
                    occurrences = dates.len(),
                    "projected bill into window"
                );
                occurrences.extend(
                    dates
                        .into_iter()
                        .map(|due| Occurrence::from_bill(bill, due, today)),
                );
            }
            Err(err) => {
                tracing::warn!(bill = %bill.display_label(), error = %err, "skipping bill");
                skipped.push(SkippedBill {
                    bill_id: bill.id,
                    bill_name: bill.name.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    occurrences.sort_by_key(|occurrence| occurrence.due_date);
    let totals = CycleTotals::from_occurrences(&occurrences);
    let mut category_totals = BTreeMap::new();
    for occurrence in &occurrences {
        *category_totals.entry(occurrence.category).or_insert(0.0) += occurrence.amount();
    }

    Aggregation {
        occurrences,
        totals,
        category_totals,
        skipped,
    }
}

fn project_bill(bill: &Bill, window: &CycleWindow) -> Result<Vec<NaiveDate>, CycleError> {
    let period = bill.recurrence.period_days()?;
    project(bill.next_due_date, period, window.start, window.end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bill(name: &str, amount: f64, rule: RecurrenceRule, anchor: NaiveDate) -> Bill {
        Bill::new(Uuid::nil(), name, amount, rule, anchor)
    }

    #[test]
    fn splits_past_and_upcoming() {
        let window = CycleWindow::new(date(2024, 3, 1), 14).unwrap();
        let bills = vec![
            bill("Phone", 40.0, RecurrenceRule::Monthly, date(2024, 3, 2)),
            bill("Gym", 60.0, RecurrenceRule::Monthly, date(2024, 3, 10)),
        ];

        let result = aggregate(&bills, &window, date(2024, 3, 5));

        assert_eq!(result.totals.total, 100.0);
        assert_eq!(result.totals.past_total, 40.0);
        assert_eq!(result.totals.upcoming_total, 60.0);
        assert_eq!(result.totals.past_count, 1);
        assert_eq!(result.totals.upcoming_count, 1);
        assert_eq!(result.occurrences[0].status(), OccurrenceStatus::Past);
    }

    #[test]
    fn due_today_counts_as_upcoming() {
        let window = CycleWindow::new(date(2024, 3, 1), 14).unwrap();
        let bills = vec![bill("Rent", 900.0, RecurrenceRule::Monthly, date(2024, 3, 5))];
        let result = aggregate(&bills, &window, date(2024, 3, 5));
        assert!(!result.occurrences[0].is_past);
        assert_eq!(result.totals.upcoming_total, 900.0);
    }

    #[test]
    fn one_off_bills_are_ignored() {
        let window = CycleWindow::new(date(2024, 3, 1), 14).unwrap();
        let bills = vec![bill("Repair", 250.0, RecurrenceRule::Monthly, date(2024, 3, 3)).one_off()];
        let result = aggregate(&bills, &window, date(2024, 3, 1));
        assert!(result.is_empty());
        assert!(result.skipped.is_empty());
        assert_eq!(result.totals, CycleTotals::default());
    }

    #[test]
    fn invalid_rule_skips_only_that_bill() {
        let window = CycleWindow::new(date(2024, 3, 1), 14).unwrap();
        let bills = vec![
            bill("Broken", 10.0, RecurrenceRule::Custom(0), date(2024, 3, 2)),
            bill("Water", 30.0, RecurrenceRule::Weekly, date(2024, 3, 2)),
        ];
        let result = aggregate(&bills, &window, date(2024, 3, 1));
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].bill_name, "Broken");
        assert_eq!(result.occurrences.len(), 2);
        assert_eq!(result.totals.total, 60.0);
    }

    #[test]
    fn same_day_occurrences_keep_input_order() {
        let window = CycleWindow::new(date(2024, 3, 1), 7).unwrap();
        let bills = vec![
            bill("Zeta", 1.0, RecurrenceRule::Weekly, date(2024, 3, 4)),
            bill("Alpha", 2.0, RecurrenceRule::Weekly, date(2024, 3, 2)),
            bill("Beta", 3.0, RecurrenceRule::Weekly, date(2024, 3, 4)),
        ];
        let result = aggregate(&bills, &window, date(2024, 3, 1));
        let names: Vec<_> = result
            .occurrences
            .iter()
            .map(|o| o.bill_name.as_str())
            .collect();
        assert_eq!(names, vec!["Alpha", "Zeta", "Beta"]);
    }

    #[test]
    fn totals_by_category() {
        let window = CycleWindow::new(date(2024, 3, 1), 14).unwrap();
        let bills = vec![
            bill("Rent", 800.0, RecurrenceRule::Monthly, date(2024, 3, 1))
                .with_category(BillCategory::Housing),
            bill("Power", 50.0, RecurrenceRule::Weekly, date(2024, 3, 1))
                .with_category(BillCategory::Utilities),
        ];
        let result = aggregate(&bills, &window, date(2024, 3, 1));
        assert_eq!(result.category_totals[&BillCategory::Housing], 800.0);
        assert_eq!(result.category_totals[&BillCategory::Utilities], 100.0);
        assert!(!result.category_totals.contains_key(&BillCategory::Loan));
    }
}
