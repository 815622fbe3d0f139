//! Bill records owned by a user.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    category::BillCategory,
    common::{Amounted, Displayable, Identifiable, NamedEntity, OwnedByUser},
    recurrence::RecurrenceRule,
};

/// A bill as stored for a user. `next_due_date` anchors every projected occurrence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub category: BillCategory,
    #[serde(default)]
    pub recurrence: RecurrenceRule,
    pub next_due_date: NaiveDate,
    /// Day-of-month hint captured for monthly bills. Projection ignores it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_day: Option<u32>,
    #[serde(default = "Bill::default_recurring")]
    pub is_recurring: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bill {
    pub fn new(
        user_id: Uuid,
        name: impl Into<String>,
        amount: f64,
        recurrence: RecurrenceRule,
        next_due_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            amount,
            category: BillCategory::default(),
            recurrence,
            next_due_date,
            due_day: None,
            is_recurring: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_category(mut self, category: BillCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_due_day(mut self, due_day: u32) -> Self {
        self.due_day = Some(due_day);
        self
    }

    /// Marks the bill as a one-off payment.
    pub fn one_off(mut self) -> Self {
        self.is_recurring = false;
        self
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn default_recurring() -> bool {
        true
    }
}

impl Identifiable for Bill {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Bill {
    fn name(&self) -> &str {
        &self.name
    }
}

impl OwnedByUser for Bill {
    fn user_id(&self) -> Uuid {
        self.user_id
    }
}

impl Amounted for Bill {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Bill {
    fn display_label(&self) -> String {
        format!("{} ({}, {})", self.name, self.category, self.recurrence)
    }
}
