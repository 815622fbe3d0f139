use chrono::{Days, NaiveDate};
use paycycle_core::{
    aggregate, align_to_today, core::occurrence_count, project, shift, Bill, CycleWindow,
    RecurrenceRule, ShiftDirection,
};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn plus(date: NaiveDate, days: u64) -> NaiveDate {
    date + Days::new(days)
}

#[test]
fn fortnightly_scenario_yields_single_occurrence() {
    let dates = project(date(2024, 1, 1), 14, date(2024, 2, 1), date(2024, 2, 15)).unwrap();
    assert_eq!(dates, vec![date(2024, 2, 12)]);
}

#[test]
fn monthly_scenario_uses_thirty_day_period() {
    let period = RecurrenceRule::Monthly.period_days().unwrap();
    let dates = project(date(2024, 1, 10), period, date(2024, 1, 1), date(2024, 1, 31)).unwrap();
    assert_eq!(dates, vec![date(2024, 1, 10)]);
}

#[test]
fn alignment_scenario_picks_latest_step_not_after_today() {
    let start = align_to_today(date(2024, 1, 1), 14, date(2024, 3, 20)).unwrap();
    assert_eq!(start, date(2024, 3, 11));
    assert!(start <= date(2024, 3, 20));
    assert!(plus(start, 14) > date(2024, 3, 20));
}

#[test]
fn projected_dates_stay_in_window_with_constant_gap() {
    let window_start = date(2024, 2, 1);
    for period in 1u32..=60 {
        for window_len in [1u64, 7, 14, 15, 30, 31, 60] {
            let window_end = plus(window_start, window_len);
            for anchor_shift in (0u64..120).step_by(7) {
                let anchor = window_start - Days::new(anchor_shift);
                let dates = project(anchor, period, window_start, window_end).unwrap();

                assert!(dates.iter().all(|d| *d >= window_start && *d < window_end));
                assert!(dates
                    .windows(2)
                    .all(|pair| (pair[1] - pair[0]).num_days() == i64::from(period)));
                assert_eq!(
                    dates.len(),
                    occurrence_count(anchor, period, window_start, window_end).unwrap()
                );
                assert_eq!(
                    dates,
                    project(anchor, period, window_start, window_end).unwrap()
                );
            }
        }
    }
}

#[test]
fn align_then_shift_round_trips() {
    let anchor = date(2023, 6, 15);
    for period in [1u32, 7, 14, 15, 30, 90] {
        for today_offset in (0u64..500).step_by(11) {
            let start = align_to_today(anchor, period, plus(anchor, today_offset)).unwrap();
            let forward = shift(start, period, ShiftDirection::Forward).unwrap();
            assert_eq!(
                shift(forward, period, ShiftDirection::Backward).unwrap(),
                start
            );
        }
    }
}

#[test]
fn totals_always_balance() {
    let user = Uuid::new_v4();
    let bills: Vec<Bill> = (0..12)
        .map(|idx| {
            let rule = match idx % 4 {
                0 => RecurrenceRule::Weekly,
                1 => RecurrenceRule::Fortnightly,
                2 => RecurrenceRule::Monthly,
                _ => RecurrenceRule::Custom(3 + idx),
            };
            Bill::new(
                user,
                format!("Bill {idx}"),
                12.5 * f64::from(idx + 1),
                rule,
                plus(date(2024, 1, 1), u64::from(idx) * 3),
            )
        })
        .collect();

    let window = CycleWindow::new(date(2024, 2, 5), 30).unwrap();
    for today_offset in 0..35u64 {
        let today = plus(window.start, today_offset);
        let result = aggregate(&bills, &window, today);
        let totals = &result.totals;
        assert_eq!(totals.total, totals.past_total + totals.upcoming_total);
        assert_eq!(
            totals.past_count + totals.upcoming_count,
            result.occurrences.len()
        );
        assert!(result
            .occurrences
            .windows(2)
            .all(|pair| pair[0].due_date <= pair[1].due_date));
    }
}

#[test]
fn past_and_upcoming_scenario() {
    let user = Uuid::new_v4();
    let window = CycleWindow::new(date(2024, 4, 1), 14).unwrap();
    let bills = vec![
        Bill::new(user, "Insurance", 40.0, RecurrenceRule::Monthly, date(2024, 4, 2)),
        Bill::new(user, "Streaming", 60.0, RecurrenceRule::Monthly, date(2024, 4, 12)),
    ];
    let result = aggregate(&bills, &window, date(2024, 4, 8));
    assert_eq!(result.totals.total, 100.0);
    assert_eq!(result.totals.past_total, 40.0);
    assert_eq!(result.totals.upcoming_total, 60.0);
}
