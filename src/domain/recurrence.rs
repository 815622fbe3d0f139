use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CycleError;

pub const WEEKLY_DAYS: u32 = 7;
pub const FORTNIGHTLY_DAYS: u32 = 14;
/// Monthly bills step by a flat 30 days rather than by calendar month.
pub const MONTHLY_DAYS: u32 = 30;

/// Repeat interval of a bill.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(
    tag = "frequency_type",
    content = "frequency_days",
    rename_all = "lowercase"
)]
pub enum RecurrenceRule {
    Weekly,
    Fortnightly,
    #[default]
    Monthly,
    Custom(u32),
}

impl RecurrenceRule {
    /// Builds a custom rule, rejecting day counts below one.
    pub fn custom(days: u32) -> Result<Self, CycleError> {
        let rule = RecurrenceRule::Custom(days);
        rule.period_days()?;
        Ok(rule)
    }

    /// Returns the number of days between two consecutive occurrences.
    pub fn period_days(&self) -> Result<u32, CycleError> {
        match *self {
            RecurrenceRule::Weekly => Ok(WEEKLY_DAYS),
            RecurrenceRule::Fortnightly => Ok(FORTNIGHTLY_DAYS),
            RecurrenceRule::Monthly => Ok(MONTHLY_DAYS),
            RecurrenceRule::Custom(0) => Err(CycleError::InvalidRule(
                "custom recurrence needs at least one day".into(),
            )),
            RecurrenceRule::Custom(days) => Ok(days),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.period_days().is_ok()
    }

    /// Rebuilds a rule from the record-store column pair.
    pub fn from_parts(frequency_type: &str, frequency_days: Option<u32>) -> Result<Self, CycleError> {
        match frequency_type.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(RecurrenceRule::Weekly),
            "fortnightly" => Ok(RecurrenceRule::Fortnightly),
            "monthly" => Ok(RecurrenceRule::Monthly),
            "custom" => {
                let days = frequency_days.ok_or_else(|| {
                    CycleError::InvalidRule("custom recurrence is missing its day count".into())
                })?;
                RecurrenceRule::custom(days)
            }
            other => Err(CycleError::InvalidRule(format!(
                "unknown frequency type `{other}`"
            ))),
        }
    }

    /// Lowercase tag matching the stored `frequency_type` column.
    pub fn frequency_type(&self) -> &'static str {
        match self {
            RecurrenceRule::Weekly => "weekly",
            RecurrenceRule::Fortnightly => "fortnightly",
            RecurrenceRule::Monthly => "monthly",
            RecurrenceRule::Custom(_) => "custom",
        }
    }

    pub fn label(&self) -> String {
        match self {
            RecurrenceRule::Weekly => "Weekly".into(),
            RecurrenceRule::Fortnightly => "Fortnightly".into(),
            RecurrenceRule::Monthly => "Monthly".into(),
            RecurrenceRule::Custom(1) => "Every day".into(),
            RecurrenceRule::Custom(days) => format!("Every {days} days"),
        }
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_days_matches_fixed_table() {
        assert_eq!(RecurrenceRule::Weekly.period_days().unwrap(), 7);
        assert_eq!(RecurrenceRule::Fortnightly.period_days().unwrap(), 14);
        assert_eq!(RecurrenceRule::Monthly.period_days().unwrap(), 30);
        assert_eq!(RecurrenceRule::Custom(45).period_days().unwrap(), 45);
        assert_eq!(RecurrenceRule::Custom(1).period_days().unwrap(), 1);
    }

    #[test]
    fn zero_day_custom_rule_is_rejected() {
        assert!(matches!(
            RecurrenceRule::Custom(0).period_days(),
            Err(CycleError::InvalidRule(_))
        ));
        assert!(RecurrenceRule::custom(0).is_err());
        assert!(!RecurrenceRule::Custom(0).is_valid());
    }

    #[test]
    fn from_parts_requires_days_for_custom() {
        assert_eq!(
            RecurrenceRule::from_parts("Fortnightly", None).unwrap(),
            RecurrenceRule::Fortnightly
        );
        assert_eq!(
            RecurrenceRule::from_parts("custom", Some(10)).unwrap(),
            RecurrenceRule::Custom(10)
        );
        assert!(RecurrenceRule::from_parts("custom", None).is_err());
        assert!(RecurrenceRule::from_parts("custom", Some(0)).is_err());
        assert!(RecurrenceRule::from_parts("yearly", None).is_err());
    }

    #[test]
    fn serializes_with_store_column_names() {
        let json = serde_json::to_value(RecurrenceRule::Custom(10)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "frequency_type": "custom", "frequency_days": 10 })
        );
        let weekly: RecurrenceRule =
            serde_json::from_value(serde_json::json!({ "frequency_type": "weekly" })).unwrap();
        assert_eq!(weekly, RecurrenceRule::Weekly);
    }
}
