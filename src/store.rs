//! Payroll record storage.
//!
//! Confirmation needs a transactional boundary around the whole batch and a
//! uniqueness guarantee on `(employee_id, period)`. The [`PayrollStore`]
//! trait is the persistence seam; [`InMemoryPayrollStore`] is the reference
//! implementation, serializing batches behind a single lock so duplicate
//! detection and insertion are one atomic step.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{EngineError, EngineResult};
use crate::models::{PayPeriod, PayrollRecord};

/// Storage seam for confirmed payroll records.
///
/// Implementations must make `insert_batch` atomic (all records or none)
/// and enforce uniqueness on `(employee_id, period)` at the storage level:
/// of two concurrent batches claiming the same key, exactly one succeeds.
pub trait PayrollStore: Send + Sync {
    /// Persists a batch of records atomically.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateConfirmation` when any record's
    /// `(employee_id, period)` already exists (the whole batch is
    /// rejected), or `Persistence` on storage failure. After an error,
    /// zero records from this batch are stored.
    fn insert_batch(&self, records: Vec<PayrollRecord>) -> EngineResult<()>;

    /// Fetches a confirmed record by its key.
    fn get(&self, employee_id: &str, period: PayPeriod) -> EngineResult<Option<PayrollRecord>>;

    /// Lists all confirmed records for a period.
    fn list_for_period(&self, period: PayPeriod) -> EngineResult<Vec<PayrollRecord>>;
}

/// In-memory reference store.
///
/// A single mutex around the record map gives the batch its transaction:
/// the whole batch is validated against existing keys, then inserted,
/// without releasing the lock in between.
#[derive(Debug, Default)]
pub struct InMemoryPayrollStore {
    records: Mutex<HashMap<(String, PayPeriod), PayrollRecord>>,
}

impl InMemoryPayrollStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PayrollStore for InMemoryPayrollStore {
    fn insert_batch(&self, records: Vec<PayrollRecord>) -> EngineResult<()> {
        let mut map = self.records.lock().map_err(|_| EngineError::Persistence {
            message: "payroll store lock poisoned".to_string(),
        })?;

        // Validate every key first; nothing is inserted if any key exists.
        let mut batch_keys = Vec::with_capacity(records.len());
        for record in &records {
            let key = (record.employee_id.clone(), record.period);
            if map.contains_key(&key) || batch_keys.contains(&key) {
                return Err(EngineError::DuplicateConfirmation {
                    employee_id: record.employee_id.clone(),
                    period: record.period,
                });
            }
            batch_keys.push(key);
        }

        for record in records {
            map.insert((record.employee_id.clone(), record.period), record);
        }
        Ok(())
    }

    fn get(&self, employee_id: &str, period: PayPeriod) -> EngineResult<Option<PayrollRecord>> {
        let map = self.records.lock().map_err(|_| EngineError::Persistence {
            message: "payroll store lock poisoned".to_string(),
        })?;
        Ok(map.get(&(employee_id.to_string(), period)).cloned())
    }

    fn list_for_period(&self, period: PayPeriod) -> EngineResult<Vec<PayrollRecord>> {
        let map = self.records.lock().map_err(|_| EngineError::Persistence {
            message: "payroll store lock poisoned".to_string(),
        })?;
        let mut records: Vec<PayrollRecord> = map
            .values()
            .filter(|r| r.period == period)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));
        Ok(records)
    }
}
