use chrono::NaiveDate;
use uuid::Uuid;

use super::{output, CliError, CommandError, LoopControl};
use crate::{
    config::{Config, ConfigManager},
    core::{Clock, CycleTracker, SystemClock},
    domain::{Bill, Identifiable, NamedEntity, PayCycle},
    errors::CycleError,
    storage::{JsonRecordStore, RecordStore},
};

const COMMANDS: &[(&str, &str)] = &[
    ("help", "Show this list"),
    ("user <uuid>", "Switch to another user's records"),
    ("cycles", "List pay cycles, newest first"),
    ("bills", "List bills by next due date"),
    ("select <name|#>", "Select a pay cycle and jump to the current window"),
    ("next", "Move to the following window"),
    ("prev", "Move to the preceding window"),
    ("reset", "Jump back to the window containing today"),
    ("show", "Show bills due in the current window"),
    ("today <YYYY-MM-DD|system>", "Pin or release the reference date"),
    ("version", "Show build information"),
    ("exit", "Leave the shell"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Shell session state. Every command reloads what it needs from the store.
pub struct ShellContext {
    pub mode: CliMode,
    pub running: bool,
    config: Config,
    store: Box<dyn RecordStore>,
    clock: Box<dyn Clock>,
    pinned_today: Option<NaiveDate>,
    user: Option<Uuid>,
    tracker: CycleTracker,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let manager = ConfigManager::new()?;
        let config = manager.load()?;
        let data_dir = config.resolve_data_dir(manager.base_dir());
        let store = JsonRecordStore::new(&data_dir)?;
        tracing::info!(path = %store.path().display(), "record store opened");
        let user = std::env::var("PAYCYCLE_USER")
            .ok()
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
            .or(config.default_user);
        Self::with_parts(mode, config, Box::new(store), Box::new(SystemClock), user)
    }

    pub fn with_parts(
        mode: CliMode,
        config: Config,
        store: Box<dyn RecordStore>,
        clock: Box<dyn Clock>,
        user: Option<Uuid>,
    ) -> Result<Self, CliError> {
        output::configure(&config);
        let mut context = Self {
            mode,
            running: true,
            config,
            store,
            clock,
            pinned_today: None,
            user: None,
            tracker: CycleTracker::default(),
        };
        if let Some(user) = user {
            if let Err(err) = context.switch_user(user) {
                tracing::warn!(%user, error = %err, "could not load user on startup");
                output::warning(&format!("Could not load user {user}: {err}"));
            }
        }
        Ok(context)
    }

    pub fn today(&self) -> NaiveDate {
        self.pinned_today.unwrap_or_else(|| self.clock.today())
    }

    pub fn tracker(&self) -> &CycleTracker {
        &self.tracker
    }

    pub fn prompt(&self) -> String {
        match self.tracker.selected_cycle() {
            Some(cycle) => format!("paycycle [{}]> ", cycle.name()),
            None => "paycycle> ".into(),
        }
    }

    pub fn report_error(&self, err: CommandError) {
        output::error(&err.to_string());
    }

    pub fn dispatch(
        &mut self,
        command: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        match command {
            "help" | "?" => self.cmd_help(),
            "user" => self.cmd_user(args),
            "cycles" => self.cmd_cycles(),
            "bills" => self.cmd_bills(),
            "select" => self.cmd_select(args),
            "next" => self.cmd_shift(true),
            "prev" | "previous" => self.cmd_shift(false),
            "reset" => self.cmd_reset(),
            "show" => self.cmd_show(),
            "today" => self.cmd_today(args),
            "version" => self.cmd_version(),
            "exit" | "quit" => return Ok(LoopControl::Exit),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }?;
        Ok(LoopControl::Continue)
    }

    fn switch_user(&mut self, user: Uuid) -> Result<(), CycleError> {
        let cycles = self.store.list_pay_cycles(user)?;
        self.tracker = CycleTracker::new(cycles, self.today())?;
        self.user = Some(user);
        tracing::info!(%user, "switched user");
        Ok(())
    }

    fn require_user(&self) -> Result<Uuid, CommandError> {
        self.user.ok_or(CommandError::NoUser)
    }

    fn reload_cycles(&mut self) -> Result<(), CommandError> {
        let user = self.require_user()?;
        let cycles = self.store.list_pay_cycles(user)?;
        let today = self.today();
        self.tracker.replace_cycles(cycles, today)?;
        Ok(())
    }

    fn cmd_help(&self) -> Result<(), CommandError> {
        output::section("Commands");
        for (usage, description) in COMMANDS {
            output::line(&format!("  {usage:<28} {description}"));
        }
        Ok(())
    }

    fn cmd_user(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let raw = args
            .first()
            .ok_or_else(|| CommandError::InvalidArguments("usage: user <uuid>".into()))?;
        let user = Uuid::parse_str(raw)
            .map_err(|err| CommandError::InvalidArguments(format!("invalid user id: {err}")))?;
        self.switch_user(user)?;
        output::success(&format!(
            "Loaded {} pay cycle(s) for user {user}.",
            self.tracker.cycles().len()
        ));
        Ok(())
    }

    fn cmd_cycles(&mut self) -> Result<(), CommandError> {
        self.reload_cycles()?;
        let selected = self.tracker.selected_cycle().map(Identifiable::id);
        let cycles: &[PayCycle] = self.tracker.cycles();
        if cycles.is_empty() {
            output::warning("No pay cycle configured.");
            return Ok(());
        }
        output::section("Pay cycles");
        for (idx, cycle) in cycles.iter().enumerate() {
            output::line(&output::cycle_row(idx + 1, cycle, Some(cycle.id()) == selected));
        }
        Ok(())
    }

    fn cmd_bills(&self) -> Result<(), CommandError> {
        let user = self.require_user()?;
        let bills: Vec<Bill> = self.store.list_bills(user)?;
        if bills.is_empty() {
            output::info("No bills yet.");
            return Ok(());
        }
        output::section("Bills");
        for bill in &bills {
            output::line(&output::bill_row(bill, &self.config));
        }
        Ok(())
    }

    fn cmd_select(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let target = args.join(" ");
        if target.trim().is_empty() {
            return Err(CommandError::InvalidArguments("usage: select <name|#>".into()));
        }
        self.reload_cycles()?;
        let today = self.today();
        let window = match target.trim().parse::<usize>() {
            Ok(position) => {
                let id = self
                    .tracker
                    .cycles()
                    .get(position.wrapping_sub(1))
                    .map(Identifiable::id)
                    .ok_or_else(|| {
                        CommandError::InvalidArguments(format!("no pay cycle #{position}"))
                    })?;
                self.tracker.select(id, today)?
            }
            Err(_) => self.tracker.select_by_name(&target, today)?,
        };
        output::success(&format!("Viewing {} to {}.", window.start, window.end));
        self.cmd_show()
    }

    fn cmd_shift(&mut self, forward: bool) -> Result<(), CommandError> {
        if forward {
            self.tracker.next()?;
        } else {
            self.tracker.previous()?;
        }
        self.cmd_show()
    }

    fn cmd_reset(&mut self) -> Result<(), CommandError> {
        let today = self.today();
        self.tracker.reset(today)?;
        self.cmd_show()
    }

    fn cmd_show(&self) -> Result<(), CommandError> {
        let user = self.require_user()?;
        let bills = self.store.list_recurring_bills(user)?;
        let report = self.tracker.report(&bills, self.today())?;
        output::print_report(&report, &self.config);
        Ok(())
    }

    fn cmd_today(&mut self, args: &[&str]) -> Result<(), CommandError> {
        match args.first().copied() {
            None => {}
            Some("system") => self.pinned_today = None,
            Some(raw) => {
                let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|err| {
                    CommandError::InvalidArguments(format!("invalid date `{raw}`: {err}"))
                })?;
                self.pinned_today = Some(date);
            }
        }
        let today = self.today();
        if self.tracker.selected_cycle().is_some() {
            self.tracker.reset(today)?;
        }
        output::info(&format!("Today is {today}."));
        Ok(())
    }

    fn cmd_version(&self) -> Result<(), CommandError> {
        output::line(&format!(
            "paycycle {} ({} {}, built {} for {} with {})",
            env!("CARGO_PKG_VERSION"),
            env!("PAYCYCLE_BUILD_HASH"),
            env!("PAYCYCLE_BUILD_STATUS"),
            env!("PAYCYCLE_BUILD_TIMESTAMP"),
            env!("PAYCYCLE_BUILD_TARGET"),
            env!("PAYCYCLE_BUILD_RUSTC"),
        ));
        Ok(())
    }
}
