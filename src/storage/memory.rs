use std::sync::RwLock;

use uuid::Uuid;

use super::{RecordStore, Records, Result};
use crate::{
    domain::{Bill, PayCycle},
    errors::CycleError,
};

/// Process-local store, used by tests and scripted runs.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<Records>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Records) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&Records) -> T) -> Result<T> {
        let guard = self.records.read().map_err(|_| poisoned())?;
        Ok(f(&guard))
    }

    fn write<T>(&self, f: impl FnOnce(&mut Records) -> Result<T>) -> Result<T> {
        let mut guard = self.records.write().map_err(|_| poisoned())?;
        f(&mut guard)
    }
}

fn poisoned() -> CycleError {
    CycleError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        "record store lock poisoned",
    ))
}

impl RecordStore for MemoryRecordStore {
    fn list_bills(&self, user_id: Uuid) -> Result<Vec<Bill>> {
        self.read(|records| records.bills_for(user_id))
    }

    fn list_pay_cycles(&self, user_id: Uuid) -> Result<Vec<PayCycle>> {
        self.read(|records| records.pay_cycles_for(user_id))
    }

    fn save_bill(&self, bill: &Bill) -> Result<()> {
        self.write(|records| {
            records.upsert_bill(bill);
            Ok(())
        })
    }

    fn delete_bill(&self, user_id: Uuid, bill_id: Uuid) -> Result<()> {
        self.write(|records| records.remove_bill(user_id, bill_id))
    }

    fn save_pay_cycle(&self, cycle: &PayCycle) -> Result<()> {
        self.write(|records| {
            records.upsert_pay_cycle(cycle);
            Ok(())
        })
    }

    fn delete_pay_cycle(&self, user_id: Uuid, cycle_id: Uuid) -> Result<()> {
        self.write(|records| records.remove_pay_cycle(user_id, cycle_id))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::*;
    use crate::domain::RecurrenceRule;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn listings_are_scoped_and_ordered() {
        let store = MemoryRecordStore::new();
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();

        let late = Bill::new(user, "Late", 5.0, RecurrenceRule::Weekly, date(2024, 5, 1));
        let early = Bill::new(user, "Early", 5.0, RecurrenceRule::Weekly, date(2024, 1, 1));
        let foreign = Bill::new(other, "Foreign", 5.0, RecurrenceRule::Weekly, date(2024, 1, 1));
        for bill in [&late, &early, &foreign] {
            store.save_bill(bill).unwrap();
        }

        let mut older = PayCycle::new(user, "Older", date(2024, 1, 1), 14);
        older.created_at -= Duration::days(3);
        let newer = PayCycle::new(user, "Newer", date(2024, 1, 1), 7);
        store.save_pay_cycle(&older).unwrap();
        store.save_pay_cycle(&newer).unwrap();

        let bills = store.list_bills(user).unwrap();
        let names: Vec<_> = bills.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Early", "Late"]);

        let cycles = store.list_pay_cycles(user).unwrap();
        assert_eq!(cycles[0].name, "Newer");
        assert!(store.list_pay_cycles(other).unwrap().is_empty());
    }

    #[test]
    fn recurring_listing_drops_one_off_bills() {
        let store = MemoryRecordStore::new();
        let user = Uuid::new_v4();
        let once = Bill::new(user, "Once", 9.0, RecurrenceRule::Monthly, date(2024, 1, 1)).one_off();
        let rent = Bill::new(user, "Rent", 9.0, RecurrenceRule::Monthly, date(2024, 1, 1));
        store.save_bill(&once).unwrap();
        store.save_bill(&rent).unwrap();

        let recurring = store.list_recurring_bills(user).unwrap();
        assert_eq!(recurring.len(), 1);
        assert_eq!(recurring[0].name, "Rent");
    }

    #[test]
    fn delete_respects_ownership() {
        let store = MemoryRecordStore::new();
        let user = Uuid::new_v4();
        let bill = Bill::new(user, "Rent", 9.0, RecurrenceRule::Monthly, date(2024, 1, 1));
        store.save_bill(&bill).unwrap();

        assert!(matches!(
            store.delete_bill(Uuid::new_v4(), bill.id),
            Err(CycleError::BillNotFound(_))
        ));
        store.delete_bill(user, bill.id).unwrap();
        assert!(store.list_bills(user).unwrap().is_empty());
    }
}
