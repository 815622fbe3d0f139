use assert_cmd::Command;
use chrono::NaiveDate;
use paycycle_core::{
    storage::{json_backend::save_records_to_path, Records},
    Bill, BillCategory, PayCycle, RecurrenceRule,
};
use predicates::{prelude::PredicateBooleanExt, str::contains};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seed_home(home: &std::path::Path, user: Uuid) {
    let records = Records {
        bills: vec![
            Bill::new(user, "Internet", 75.0, RecurrenceRule::Fortnightly, date(2024, 1, 1))
                .with_category(BillCategory::Utilities),
            Bill::new(user, "Rent", 1200.0, RecurrenceRule::Monthly, date(2024, 1, 3))
                .with_category(BillCategory::Housing),
        ],
        pay_cycles: vec![PayCycle::new(user, "Main Job", date(2024, 1, 1), 14)],
    };
    save_records_to_path(&records, &home.join("data").join("records.json")).unwrap();
}

#[test]
fn script_mode_shows_current_cycle() {
    let home = tempfile::tempdir().unwrap();
    let user = Uuid::new_v4();
    seed_home(home.path(), user);

    let input = format!("user {user}\ntoday 2024-03-20\nselect \"Main Job\"\nexit\n");

    let mut cmd = Command::cargo_bin("paycycle_cli").unwrap();
    cmd.env("PAYCYCLE_CLI_SCRIPT", "1")
        .env("PAYCYCLE_HOME", home.path())
        .env("NO_COLOR", "1")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("=== Main Job: 2024-03-11 to 2024-03-25 ==="))
        .stdout(contains("Internet"))
        .stdout(contains("Past Due: $75.00"));
}

#[test]
fn script_mode_navigates_and_reports_errors() {
    let home = tempfile::tempdir().unwrap();
    let user = Uuid::new_v4();
    seed_home(home.path(), user);

    let input = format!("show\nuser {user}\ntoday 2024-03-20\nprev\nbogus\nexit\n");

    let mut cmd = Command::cargo_bin("paycycle_cli").unwrap();
    cmd.env("PAYCYCLE_CLI_SCRIPT", "1")
        .env("PAYCYCLE_HOME", home.path())
        .env("NO_COLOR", "1")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("2024-02-26 to 2024-03-11").and(contains("Rent")))
        .stderr(contains("No user selected").and(contains("Unknown command `bogus`")));
}
