//! Plain-text rendering of cycles, bills and window reports.

use std::{
    io::IsTerminal,
    sync::{OnceLock, RwLock},
};

use colored::{Color, Colorize};

use crate::{
    config::Config,
    core::CycleReport,
    domain::{Amounted, Bill, Displayable, NamedEntity, PayCycle, StyleToken},
};

#[derive(Clone, Copy, Debug, Default)]
pub struct OutputPreferences {
    pub use_color: bool,
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

/// Derives output preferences from the config and the terminal.
pub fn configure(config: &Config) {
    let stdout_tty = std::io::stdout().is_terminal();
    let no_color = std::env::var_os("NO_COLOR").is_some();
    let prefs = OutputPreferences {
        use_color: config.ui_color_enabled && stdout_tty && !no_color,
    };
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
}

fn preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn token_color(token: StyleToken) -> Color {
    match token {
        StyleToken::Orange => Color::TrueColor {
            r: 251,
            g: 146,
            b: 60,
        },
        StyleToken::Yellow => Color::Yellow,
        StyleToken::Blue => Color::Blue,
        StyleToken::Green => Color::Green,
        StyleToken::Purple => Color::Magenta,
        StyleToken::Red => Color::Red,
        StyleToken::Emerald => Color::BrightGreen,
        StyleToken::Slate => Color::BrightBlack,
    }
}

fn paint(text: &str, token: StyleToken) -> String {
    if preferences().use_color {
        text.color(token_color(token)).to_string()
    } else {
        text.to_string()
    }
}

pub fn format_amount(amount: f64, config: &Config) -> String {
    format!("{}{:.2}", config.currency_symbol(), amount)
}

pub fn line(text: &str) {
    println!("{text}");
}

pub fn section(title: &str) {
    let text = format!("=== {} ===", title.trim());
    if preferences().use_color {
        println!("{}", text.bold());
    } else {
        println!("{text}");
    }
}

pub fn info(message: &str) {
    println!("INFO: {message}");
}

pub fn success(message: &str) {
    println!("{}", paint(&format!("SUCCESS: {message}"), StyleToken::Emerald));
}

pub fn warning(message: &str) {
    println!("{}", paint(&format!("WARNING: {message}"), StyleToken::Yellow));
}

pub fn error(message: &str) {
    eprintln!("{}", paint(&format!("ERROR: {message}"), StyleToken::Red));
}

pub fn cycle_row(position: usize, cycle: &PayCycle, selected: bool) -> String {
    let marker = if selected { ">" } else { " " };
    format!("{marker} {position:>2}. {}", cycle.display_label())
}

pub fn bill_row(bill: &Bill, config: &Config) -> String {
    let recurring = if bill.is_recurring { "" } else { " (one-off)" };
    format!(
        "  {}  {:<20} {:<14} {:<14} {:>10}{recurring}",
        bill.next_due_date,
        bill.name(),
        bill.recurrence.label(),
        paint(bill.category.label(), bill.category.style_token()),
        format_amount(bill.amount(), config),
    )
}

/// Renders a window report as text lines.
pub fn render_report(report: &CycleReport, config: &Config) -> Vec<String> {
    let mut lines = vec![
        format!(
            "=== {}: {} to {} ===",
            report.cycle_name, report.window_start, report.window_end
        ),
        format!(
            "Total Bills: {}   Past Due: {}   Upcoming: {}",
            format_amount(report.totals.total, config),
            paint(
                &format_amount(report.totals.past_total, config),
                StyleToken::Red
            ),
            paint(
                &format_amount(report.totals.upcoming_total, config),
                StyleToken::Emerald
            ),
        ),
    ];

    if report.occurrences.is_empty() {
        lines.push("No bills scheduled for this pay cycle.".into());
    }
    for occurrence in &report.occurrences {
        let status = occurrence.status();
        lines.push(format!(
            "  {} {}  {:<20} {:<14} {:<14} {:>10}",
            paint("●", status.style_token()),
            occurrence.due_date,
            occurrence.bill_name,
            occurrence.recurrence.label(),
            paint(occurrence.category.label(), occurrence.category.style_token()),
            format_amount(occurrence.amount, config),
        ));
    }
    for skipped in &report.skipped {
        lines.push(format!(
            "WARNING: skipped {}: {}",
            skipped.bill_name, skipped.reason
        ));
    }
    lines
}

pub fn print_report(report: &CycleReport, config: &Config) {
    for text in render_report(report, config) {
        println!("{text}");
    }
}
