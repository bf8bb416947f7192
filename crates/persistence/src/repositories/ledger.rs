//! Points ledger repository, one document per user.

use std::sync::{Arc, Mutex, PoisonError};

use domain::errors::DomainError;
use domain::models::PointsLedger;
use uuid::Uuid;

use crate::store::StorageBackend;

/// Document key for a user's ledger.
pub fn ledger_key(user_id: Uuid) -> String {
    format!("recyclehub_ledger_{user_id}")
}

/// Repository for per-user points ledgers.
///
/// Each user's balance and history form one JSON document. A mutation is a
/// full read-modify-write of that document under the write lock, so balance
/// and history always change together.
pub struct LedgerRepository {
    store: Arc<dyn StorageBackend>,
    write_lock: Mutex<()>,
}

impl LedgerRepository {
    /// Creates a new LedgerRepository over the given backend.
    pub fn new(store: Arc<dyn StorageBackend>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Loads a user's ledger; users without one get a fresh zero-balance
    /// ledger (balances start at 0 on account creation).
    pub fn load(&self, user_id: Uuid) -> Result<PointsLedger, DomainError> {
        let key = ledger_key(user_id);
        match self.store.load(&key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| DomainError::Storage(format!("corrupt document at {key}: {e}"))),
            None => Ok(PointsLedger::new(user_id)),
        }
    }

    /// Runs one atomic read-modify-write cycle over a user's ledger.
    pub fn mutate<T, F>(&self, user_id: Uuid, apply: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut PointsLedger) -> Result<T, DomainError>,
    {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut ledger = self.load(user_id)?;
        let result = apply(&mut ledger)?;
        let key = ledger_key(user_id);
        let raw = serde_json::to_string(&ledger)
            .map_err(|e| DomainError::Storage(format!("failed to encode {key}: {e}")))?;
        self.store.save(&key, &raw)?;
        tracing::debug!(user_id = %user_id, balance = ledger.balance, "ledger updated");
        Ok(result)
    }
}
