//! Pay cycles: the recurring windows bills are grouped into.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{Displayable, Identifiable, NamedEntity, OwnedByUser};
use crate::errors::CycleError;

pub const DEFAULT_CYCLE_DAYS: u32 = 14;

/// A user's pay schedule, anchored on `start_date` and repeating every `period_days`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PayCycle {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    #[serde(rename = "frequency_days")]
    pub period_days: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PayCycle {
    pub fn new(
        user_id: Uuid,
        name: impl Into<String>,
        start_date: NaiveDate,
        period_days: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            start_date,
            period_days,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn from_preset(
        user_id: Uuid,
        name: impl Into<String>,
        start_date: NaiveDate,
        preset: PayCyclePreset,
    ) -> Result<Self, CycleError> {
        Ok(Self::new(user_id, name, start_date, preset.days()?))
    }

    /// Returns the period length, failing for cycles stored with a zero-day period.
    pub fn checked_period(&self) -> Result<u32, CycleError> {
        if self.period_days == 0 {
            return Err(CycleError::InvalidCycle {
                name: self.name.clone(),
            });
        }
        Ok(self.period_days)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Identifiable for PayCycle {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for PayCycle {
    fn name(&self) -> &str {
        &self.name
    }
}

impl OwnedByUser for PayCycle {
    fn user_id(&self) -> Uuid {
        self.user_id
    }
}

impl Displayable for PayCycle {
    fn display_label(&self) -> String {
        format!(
            "{} (starts {}, every {} days)",
            self.name, self.start_date, self.period_days
        )
    }
}

/// Pay schedules offered when setting up a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayCyclePreset {
    Weekly,
    #[default]
    BiWeekly,
    SemiMonthly,
    Monthly,
    Custom(u32),
}

impl PayCyclePreset {
    /// Builds a custom preset, rejecting day counts below one.
    pub fn custom(days: u32) -> Result<Self, CycleError> {
        let preset = PayCyclePreset::Custom(days);
        preset.days()?;
        Ok(preset)
    }

    /// Day count for the preset.
    pub fn days(self) -> Result<u32, CycleError> {
        match self {
            PayCyclePreset::Weekly => Ok(7),
            PayCyclePreset::BiWeekly => Ok(DEFAULT_CYCLE_DAYS),
            PayCyclePreset::SemiMonthly => Ok(15),
            PayCyclePreset::Monthly => Ok(30),
            PayCyclePreset::Custom(0) => Err(CycleError::Validation(
                "custom pay cycle needs at least one day".into(),
            )),
            PayCyclePreset::Custom(days) => Ok(days),
        }
    }

    pub fn label(self) -> String {
        match self {
            PayCyclePreset::Weekly => "Weekly (7 days)".into(),
            PayCyclePreset::BiWeekly => "Bi-weekly (14 days)".into(),
            PayCyclePreset::SemiMonthly => "Semi-monthly (15 days)".into(),
            PayCyclePreset::Monthly => "Monthly (30 days)".into(),
            PayCyclePreset::Custom(days) => format!("Custom ({days} days)"),
        }
    }
}
