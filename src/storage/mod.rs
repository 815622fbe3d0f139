//! Adapters for the record store that owns bills and pay cycles.

pub mod json_backend;
pub mod memory;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{Bill, Identifiable, OwnedByUser, PayCycle},
    errors::CycleError,
};

pub type Result<T> = std::result::Result<T, CycleError>;

/// Per-user access to stored bills and pay cycles.
///
/// Listings follow the store's ordering contract: bills by `next_due_date` ascending and
/// pay cycles newest first.
pub trait RecordStore: Send + Sync {
    fn list_bills(&self, user_id: Uuid) -> Result<Vec<Bill>>;
    fn list_pay_cycles(&self, user_id: Uuid) -> Result<Vec<PayCycle>>;
    fn save_bill(&self, bill: &Bill) -> Result<()>;
    fn delete_bill(&self, user_id: Uuid, bill_id: Uuid) -> Result<()>;
    fn save_pay_cycle(&self, cycle: &PayCycle) -> Result<()>;
    fn delete_pay_cycle(&self, user_id: Uuid, cycle_id: Uuid) -> Result<()>;

    /// Bills the tracker projects: only those flagged recurring.
    fn list_recurring_bills(&self, user_id: Uuid) -> Result<Vec<Bill>> {
        Ok(self
            .list_bills(user_id)?
            .into_iter()
            .filter(|bill| bill.is_recurring)
            .collect())
    }
}

/// Serialized shape shared by the store backends.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Records {
    #[serde(default)]
    pub bills: Vec<Bill>,
    #[serde(default)]
    pub pay_cycles: Vec<PayCycle>,
}

impl Records {
    pub fn bills_for(&self, user_id: Uuid) -> Vec<Bill> {
        let mut bills = owned_by(&self.bills, user_id);
        bills.sort_by_key(|bill| bill.next_due_date);
        bills
    }

    pub fn pay_cycles_for(&self, user_id: Uuid) -> Vec<PayCycle> {
        let mut cycles = owned_by(&self.pay_cycles, user_id);
        cycles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        cycles
    }

    pub fn upsert_bill(&mut self, bill: &Bill) {
        upsert(&mut self.bills, bill);
    }

    pub fn remove_bill(&mut self, user_id: Uuid, bill_id: Uuid) -> Result<()> {
        if !remove_owned(&mut self.bills, user_id, bill_id) {
            return Err(CycleError::BillNotFound(bill_id));
        }
        Ok(())
    }

    pub fn upsert_pay_cycle(&mut self, cycle: &PayCycle) {
        upsert(&mut self.pay_cycles, cycle);
    }

    pub fn remove_pay_cycle(&mut self, user_id: Uuid, cycle_id: Uuid) -> Result<()> {
        if !remove_owned(&mut self.pay_cycles, user_id, cycle_id) {
            return Err(CycleError::CycleNotFound(cycle_id.to_string()));
        }
        Ok(())
    }
}

fn owned_by<T: OwnedByUser + Clone>(items: &[T], user_id: Uuid) -> Vec<T> {
    items
        .iter()
        .filter(|item| item.user_id() == user_id)
        .cloned()
        .collect()
}

fn upsert<T: Identifiable + Clone>(items: &mut Vec<T>, record: &T) {
    match items.iter_mut().find(|existing| existing.id() == record.id()) {
        Some(existing) => *existing = record.clone(),
        None => items.push(record.clone()),
    }
}

/// Removes the record with `id` owned by `user_id`; returns whether one was removed.
fn remove_owned<T>(items: &mut Vec<T>, user_id: Uuid, id: Uuid) -> bool
where
    T: Identifiable + OwnedByUser,
{
    let before = items.len();
    items.retain(|item| !(item.id() == id && item.user_id() == user_id));
    items.len() != before
}

pub use json_backend::JsonRecordStore;
pub use memory::MemoryRecordStore;
