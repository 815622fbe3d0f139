use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use uuid::Uuid;

use super::{RecordStore, Records, Result};
use crate::{
    domain::{Bill, PayCycle},
    errors::CycleError,
    utils::{ensure_dir, write_file_atomically},
};

const RECORDS_FILE: &str = "records.json";

/// Filesystem-backed JSON store holding every user's records in one document.
#[derive(Debug)]
pub struct JsonRecordStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonRecordStore {
    /// Opens (without creating) the records document inside `data_dir`.
    pub fn new(data_dir: &Path) -> Result<Self> {
        ensure_dir(data_dir)?;
        Ok(Self::at_path(data_dir.join(RECORDS_FILE)))
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Records> {
        load_records_from_path(&self.path)
    }

    fn update<T>(&self, f: impl FnOnce(&mut Records) -> Result<T>) -> Result<T> {
        let _guard = self.write_lock.lock().map_err(|_| {
            CycleError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "record store lock poisoned",
            ))
        })?;
        let mut records = self.load()?;
        let value = f(&mut records)?;
        save_records_to_path(&records, &self.path)?;
        Ok(value)
    }
}

impl RecordStore for JsonRecordStore {
    fn list_bills(&self, user_id: Uuid) -> Result<Vec<Bill>> {
        Ok(self.load()?.bills_for(user_id))
    }

    fn list_pay_cycles(&self, user_id: Uuid) -> Result<Vec<PayCycle>> {
        Ok(self.load()?.pay_cycles_for(user_id))
    }

    fn save_bill(&self, bill: &Bill) -> Result<()> {
        self.update(|records| {
            records.upsert_bill(bill);
            Ok(())
        })?;
        tracing::info!(bill = %bill.name, "bill saved");
        Ok(())
    }

    fn delete_bill(&self, user_id: Uuid, bill_id: Uuid) -> Result<()> {
        self.update(|records| records.remove_bill(user_id, bill_id))?;
        tracing::info!(%bill_id, "bill deleted");
        Ok(())
    }

    fn save_pay_cycle(&self, cycle: &PayCycle) -> Result<()> {
        self.update(|records| {
            records.upsert_pay_cycle(cycle);
            Ok(())
        })?;
        tracing::info!(cycle = %cycle.name, "pay cycle saved");
        Ok(())
    }

    fn delete_pay_cycle(&self, user_id: Uuid, cycle_id: Uuid) -> Result<()> {
        self.update(|records| records.remove_pay_cycle(user_id, cycle_id))?;
        tracing::info!(%cycle_id, "pay cycle deleted");
        Ok(())
    }
}

/// Reads a records document. A missing file is an empty store.
pub fn load_records_from_path(path: &Path) -> Result<Records> {
    if !path.exists() {
        return Ok(Records::default());
    }
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Writes a records document through a temporary file so readers never see partial JSON.
pub fn save_records_to_path(records: &Records, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(records)?;
    write_file_atomically(path, &json)?;
    Ok(())
}
