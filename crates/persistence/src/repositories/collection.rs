//! Collection request repository over the shared collections document.

use std::sync::{Arc, Mutex, PoisonError};

use domain::errors::DomainError;
use domain::models::{CollectionRequest, CollectionStatus};
use uuid::Uuid;

use crate::store::StorageBackend;

/// Document key holding every collection request.
pub const COLLECTIONS_KEY: &str = "recyclehub_collections";

/// Repository for collection requests.
///
/// All requests live in one JSON document; every mutation is a full
/// read-modify-write cycle under the repository's write lock, so cycles
/// never interleave within a process.
pub struct CollectionRepository {
    store: Arc<dyn StorageBackend>,
    write_lock: Mutex<()>,
}

impl CollectionRepository {
    /// Creates a new CollectionRepository over the given backend.
    pub fn new(store: Arc<dyn StorageBackend>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Reads the full collections document; an absent document is empty.
    pub fn read_all(&self) -> Result<Vec<CollectionRequest>, DomainError> {
        match self.store.load(COLLECTIONS_KEY)? {
            Some(raw) => decode(COLLECTIONS_KEY, &raw),
            None => Ok(Vec::new()),
        }
    }

    /// Runs one atomic read-modify-write cycle over the whole document.
    ///
    /// The closure may insert, change, or remove requests; the document is
    /// saved only when it returns `Ok`.
    pub fn mutate<T, F>(&self, apply: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut Vec<CollectionRequest>) -> Result<T, DomainError>,
    {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut all = self.read_all()?;
        let result = apply(&mut all)?;
        let raw = serde_json::to_string(&all)
            .map_err(|e| DomainError::Storage(format!("failed to encode {COLLECTIONS_KEY}: {e}")))?;
        self.store.save(COLLECTIONS_KEY, &raw)?;
        tracing::debug!(requests = all.len(), "collections document updated");
        Ok(result)
    }

    /// Find a request by id.
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<CollectionRequest>, DomainError> {
        Ok(self.read_all()?.into_iter().find(|c| c.id == id))
    }

    /// List the requests created by a requester.
    pub fn list_by_requester(&self, requester_id: Uuid) -> Result<Vec<CollectionRequest>, DomainError> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|c| c.requester_id == requester_id)
            .collect())
    }

    /// List requests still awaiting a collector whose address contains the
    /// given city substring (case-insensitive).
    pub fn list_available_by_city(&self, city: &str) -> Result<Vec<CollectionRequest>, DomainError> {
        let needle = city.to_lowercase();
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|c| {
                c.status == CollectionStatus::Requested
                    && c.address.to_lowercase().contains(&needle)
            })
            .collect())
    }

    /// List the requests assigned to a collector.
    pub fn list_by_collector(&self, collector_id: Uuid) -> Result<Vec<CollectionRequest>, DomainError> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|c| c.collector_id == Some(collector_id))
            .collect())
    }
}

fn decode<T: serde::de::DeserializeOwned>(key: &str, raw: &str) -> Result<T, DomainError> {
    serde_json::from_str(raw)
        .map_err(|e| DomainError::Storage(format!("corrupt document at {key}: {e}")))
}
